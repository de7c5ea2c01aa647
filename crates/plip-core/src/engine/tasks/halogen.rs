use crate::core::models::features::{HalogenAcceptor, HalogenDonor};
use crate::core::models::interactions::HalogenBond;
use crate::core::utils::geometry::{euclidean3d, vecangle, vector};
use crate::engine::config::DetectionConfig;
use itertools::Itertools;
use tracing::{debug, instrument, trace};

#[inline]
fn within(value: f64, ideal: f64, dev: f64) -> bool {
    ideal - dev < value && value < ideal + dev
}

#[instrument(skip_all, name = "halogen_task")]
pub fn halogen(
    acceptors: &[HalogenAcceptor],
    donors: &[HalogenDonor],
    config: &DetectionConfig,
) -> Vec<HalogenBond> {
    let mut bonds = Vec::new();
    for (acc, don) in acceptors.iter().cartesian_product(donors.iter()) {
        let distance = euclidean3d(&acc.oxygen.position, &don.halogen.position);
        if distance < config.halogen_dist_max {
            let acceptor_angle = vecangle(
                &vector(&acc.oxygen.position, &acc.partner.position),
                &vector(&acc.oxygen.position, &don.halogen.position),
            );
            let donor_angle = vecangle(
                &vector(&don.halogen.position, &acc.oxygen.position),
                &vector(&don.halogen.position, &don.carbon.position),
            );
            let dev = config.halogen_angle_dev;
            if within(acceptor_angle, config.halogen_acc_angle, dev)
                && within(donor_angle, config.halogen_don_angle, dev)
            {
                trace!(
                    oxygen = acc.oxygen.idx,
                    halogen = don.halogen.idx,
                    distance,
                    "Halogen bond accepted."
                );
                bonds.push(HalogenBond {
                    acceptor: acc.clone(),
                    donor: don.clone(),
                    distance,
                    donor_angle,
                    acceptor_angle,
                    residue: acc.oxygen.residue.clone(),
                    sidechain: acc.oxygen.is_sidechain,
                });
            }
        }
    }

    debug!(count = bonds.len(), "Halogen bonds detected.");
    bonds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::{Atom, ResidueInfo};
    use nalgebra::{Point3, Vector3};

    const TOLERANCE: f64 = 1e-9;

    fn unit_in_xy(degrees: f64) -> Vector3<f64> {
        let r = degrees.to_radians();
        Vector3::new(r.cos(), r.sin(), 0.0)
    }

    // Oxygen at the origin, halogen on +x at `distance`, with the Y-O...X and
    // C-X...O angles set to the requested values.
    fn pair(distance: f64, acc_angle: f64, don_angle: f64) -> (HalogenAcceptor, HalogenDonor) {
        let o = Point3::origin();
        let x = Point3::new(distance, 0.0, 0.0);
        let y = o + unit_in_xy(acc_angle) * 1.23;
        let c = x + unit_in_xy(180.0 - don_angle) * 1.75;
        let acceptor = HalogenAcceptor {
            oxygen: Atom::new(1, "O", o)
                .with_residue(ResidueInfo::new("GLY", 45, 'A'))
                .with_sidechain(false),
            partner: Atom::new(0, "C", y),
        };
        let donor = HalogenDonor {
            halogen: Atom::new(10, "CL", x),
            carbon: Atom::new(11, "C", c),
        };
        (acceptor, donor)
    }

    #[test]
    fn ideal_geometry_at_three_angstrom_is_detected() {
        let (acc, don) = pair(3.0, 120.0, 165.0);
        let bonds = halogen(&[acc], &[don], &DetectionConfig::default());
        assert_eq!(bonds.len(), 1);
        let bond = &bonds[0];
        assert!((bond.distance - 3.0).abs() < TOLERANCE);
        assert!((bond.acceptor_angle - 120.0).abs() < 1e-6);
        assert!((bond.donor_angle - 165.0).abs() < 1e-6);
        assert_eq!(bond.residue, Some(ResidueInfo::new("GLY", 45, 'A')));
        assert!(!bond.sidechain);
    }

    #[test]
    fn angles_outside_the_deviation_window_are_rejected() {
        let (acc, don) = pair(3.0, 85.0, 165.0);
        assert!(halogen(&[acc], &[don], &DetectionConfig::default()).is_empty());

        let (acc, don) = pair(3.0, 120.0, 130.0);
        assert!(halogen(&[acc], &[don], &DetectionConfig::default()).is_empty());
    }

    #[test]
    fn distant_halogens_are_ignored() {
        let (acc, don) = pair(4.2, 120.0, 165.0);
        assert!(halogen(&[acc], &[don], &DetectionConfig::default()).is_empty());
    }
}
