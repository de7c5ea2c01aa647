use crate::core::models::features::HydrophobicAtom;
use crate::core::models::interactions::HydrophobicContact;
use crate::core::utils::geometry::euclidean3d;
use crate::engine::config::DetectionConfig;
use itertools::Itertools;
use tracing::{debug, instrument};

#[instrument(skip_all, name = "hydrophobic_task")]
pub fn hydrophobic_interactions(
    bs_atoms: &[HydrophobicAtom],
    lig_atoms: &[HydrophobicAtom],
    config: &DetectionConfig,
) -> Vec<HydrophobicContact> {
    let contacts: Vec<HydrophobicContact> = bs_atoms
        .iter()
        .cartesian_product(lig_atoms.iter())
        .filter_map(|(a, b)| {
            let distance = euclidean3d(&a.atom.position, &b.atom.position);
            (distance < config.hydroph_dist_max).then(|| HydrophobicContact {
                bs_atom: a.atom.clone(),
                lig_atom: b.atom.clone(),
                distance,
                residue: a.atom.residue.clone(),
            })
        })
        .collect();

    debug!(count = contacts.len(), "Hydrophobic contacts detected.");
    contacts
}
