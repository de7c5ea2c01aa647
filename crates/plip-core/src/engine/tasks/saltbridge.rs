use crate::core::models::features::ChargeCenter;
use crate::core::models::interactions::SaltBridge;
use crate::core::utils::geometry::euclidean3d;
use crate::engine::config::DetectionConfig;
use itertools::Itertools;
use tracing::{debug, instrument};

#[instrument(skip_all, name = "saltbridge_task", fields(protein_is_positive))]
pub fn saltbridge(
    positive: &[ChargeCenter],
    negative: &[ChargeCenter],
    protein_is_positive: bool,
    config: &DetectionConfig,
) -> Vec<SaltBridge> {
    let bridges: Vec<SaltBridge> = positive
        .iter()
        .cartesian_product(negative.iter())
        .filter_map(|(pc, nc)| {
            let distance = euclidean3d(&pc.center, &nc.center);
            (distance < config.saltbridge_dist_max).then(|| {
                let protein_side = if protein_is_positive { pc } else { nc };
                SaltBridge {
                    positive: pc.clone(),
                    negative: nc.clone(),
                    distance,
                    protein_is_positive,
                    residue: protein_side.residue().cloned(),
                }
            })
        })
        .collect();

    debug!(count = bridges.len(), "Salt bridges detected.");
    bridges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::{Atom, ResidueInfo};
    use crate::core::models::features::{Charge, ChargeGroup};
    use nalgebra::Point3;

    fn center(
        residue: ResidueInfo,
        position: Point3<f64>,
        charge: Charge,
        group: ChargeGroup,
    ) -> ChargeCenter {
        ChargeCenter {
            atoms: vec![Atom::new(0, "N", position).with_residue(residue)],
            center: position,
            charge,
            group,
        }
    }

    #[test]
    fn lysine_and_ligand_carboxylate_at_three_angstrom_form_a_bridge() {
        let lys = center(
            ResidueInfo::new("LYS", 12, 'A'),
            Point3::origin(),
            Charge::Positive,
            ChargeGroup::Residue,
        );
        let carboxylate = center(
            ResidueInfo::new("LIG", 1, 'A'),
            Point3::new(0.0, 3.0, 0.0),
            Charge::Negative,
            ChargeGroup::Carboxylate,
        );

        let bridges = saltbridge(&[lys], &[carboxylate], true, &DetectionConfig::default());

        assert_eq!(bridges.len(), 1);
        assert!((bridges[0].distance - 3.0).abs() < 1e-12);
        assert!(bridges[0].protein_is_positive);
        assert_eq!(bridges[0].residue, Some(ResidueInfo::new("LYS", 12, 'A')));
    }

    #[test]
    fn ligand_positive_side_takes_residue_from_negative_center() {
        let amine = center(
            ResidueInfo::new("LIG", 1, 'A'),
            Point3::origin(),
            Charge::Positive,
            ChargeGroup::QuaternaryAmine,
        );
        let asp = center(
            ResidueInfo::new("ASP", 88, 'B'),
            Point3::new(4.0, 0.0, 0.0),
            Charge::Negative,
            ChargeGroup::Residue,
        );
        let bridges = saltbridge(&[amine], &[asp], false, &DetectionConfig::default());
        assert_eq!(bridges[0].residue, Some(ResidueInfo::new("ASP", 88, 'B')));
    }

    #[test]
    fn centers_at_the_cutoff_are_not_bridged() {
        let pos = center(
            ResidueInfo::new("ARG", 2, 'A'),
            Point3::origin(),
            Charge::Positive,
            ChargeGroup::Residue,
        );
        let neg = center(
            ResidueInfo::new("LIG", 1, 'A'),
            Point3::new(5.5, 0.0, 0.0),
            Charge::Negative,
            ChargeGroup::Phosphate,
        );
        assert!(saltbridge(&[pos], &[neg], true, &DetectionConfig::default()).is_empty());
    }
}
