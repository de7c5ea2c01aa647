use crate::core::models::features::{AromaticRing, ChargeCenter, ChargeGroup};
use crate::core::models::interactions::PiCation;
use crate::core::utils::geometry::{euclidean3d, fold_angle, projection, vecangle, vector};
use crate::engine::config::DetectionConfig;
use nalgebra::{Point3, Vector3};
use std::collections::HashSet;
use tracing::{debug, instrument, trace};

// Normal of the plane spanned by the three substituents of a tertiary amine.
fn amine_normal(neighbors: &[Point3<f64>; 3]) -> Vector3<f64> {
    let [n0, n1, n2] = neighbors;
    vector(n0, n1).cross(&vector(n2, n0))
}

// A tertiary amine is only paired with the first ring whose gate it passes.
#[instrument(skip_all, name = "pication_task", fields(protein_charged))]
pub fn pication(
    rings: &[AromaticRing],
    charges: &[ChargeCenter],
    protein_charged: bool,
    config: &DetectionConfig,
) -> Vec<PiCation> {
    let mut contacts = Vec::new();
    let mut exhausted: HashSet<usize> = HashSet::new();

    for ring in rings {
        for (ci, charge) in charges.iter().enumerate() {
            if exhausted.contains(&ci) {
                continue;
            }
            let distance = euclidean3d(&ring.center, &charge.center);
            let proj = projection(&ring.normal, &ring.center, &charge.center);
            let offset = euclidean3d(&proj, &ring.center);
            if !(distance < config.pication_dist_max && offset < config.pistack_offset_max) {
                continue;
            }

            let residue = match &charge.group {
                ChargeGroup::TertiaryAmine { neighbors } => {
                    exhausted.insert(ci);
                    let angle = fold_angle(vecangle(&ring.normal, &amine_normal(neighbors)));
                    if angle <= config.pication_amine_angle_max {
                        ring.residue().cloned()
                    } else {
                        continue;
                    }
                }
                _ if protein_charged => charge.residue().cloned(),
                _ => ring.residue().cloned(),
            };

            trace!(distance, offset, group = charge.group.label(), "Pi-cation accepted.");
            contacts.push(PiCation {
                ring: ring.clone(),
                charge: charge.clone(),
                distance,
                offset,
                protein_charged,
                residue,
            });
        }
    }

    debug!(count = contacts.len(), "Pi-cation interactions detected.");
    contacts
}
