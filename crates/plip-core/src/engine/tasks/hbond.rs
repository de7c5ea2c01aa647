use crate::core::models::features::{Acceptor, DonorPair};
use crate::core::models::interactions::HydrogenBond;
use crate::core::utils::geometry::{euclidean3d, vecangle, vector};
use crate::engine::config::DetectionConfig;
use itertools::Itertools;
use tracing::{debug, instrument, trace};

#[instrument(skip_all, name = "hbond_task", fields(protein_is_donor))]
pub fn hbonds(
    acceptors: &[Acceptor],
    donor_pairs: &[DonorPair],
    protein_is_donor: bool,
    config: &DetectionConfig,
) -> Vec<HydrogenBond> {
    let mut bonds = Vec::new();
    for (acc, don) in acceptors.iter().cartesian_product(donor_pairs.iter()) {
        let distance_ad = euclidean3d(&acc.atom.position, &don.donor.position);
        if distance_ad < config.hbond_dist_max {
            let h_to_d = vector(&don.hydrogen.position, &don.donor.position);
            let h_to_a = vector(&don.hydrogen.position, &acc.atom.position);
            let angle = vecangle(&h_to_d, &h_to_a);
            if angle > config.hbond_don_angle_min {
                let protein_atom = if protein_is_donor {
                    &don.donor
                } else {
                    &acc.atom
                };
                trace!(
                    acceptor = acc.atom.idx,
                    donor = don.donor.idx,
                    distance_ad,
                    angle,
                    "Hydrogen bond accepted."
                );
                bonds.push(HydrogenBond {
                    acceptor: acc.atom.clone(),
                    donor: don.donor.clone(),
                    hydrogen: don.hydrogen.clone(),
                    distance_ah: euclidean3d(&acc.atom.position, &don.hydrogen.position),
                    distance_ad,
                    angle,
                    protein_is_donor,
                    residue: protein_atom.residue.clone(),
                    sidechain: protein_atom.is_sidechain,
                });
            }
        }
    }

    debug!(count = bonds.len(), "Hydrogen bonds detected.");
    bonds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::{Atom, ResidueInfo};
    use crate::engine::config::DetectionConfigBuilder;
    use nalgebra::Point3;

    const TOLERANCE: f64 = 1e-9;

    fn acceptor(idx: usize, position: Point3<f64>) -> Acceptor {
        Acceptor {
            atom: Atom::new(idx, "O", position).with_residue(ResidueInfo::new("ASP", 30, 'A')),
        }
    }

    // Donor on the x axis with its hydrogen at 1 A; the acceptor sits at
    // `distance` from the donor, rotated so that D-H...A equals `angle`.
    fn donor_pair_with_acceptor(distance: f64, angle: f64) -> (DonorPair, Acceptor) {
        let donor = Atom::new(1, "N", Point3::origin())
            .with_residue(ResidueInfo::new("LYS", 7, 'B'))
            .with_sidechain(true);
        let hydrogen = Atom::new(2, "H", Point3::new(1.0, 0.0, 0.0));
        // Law of sines on triangle D-H-A with |DH| = 1 and |DA| = distance.
        let theta = angle.to_radians();
        let sin_dah = theta.sin() / distance;
        let dah = sin_dah.asin();
        let adh = std::f64::consts::PI - theta - dah;
        let acc_pos = Point3::new(distance * adh.cos(), distance * adh.sin(), 0.0);
        (DonorPair { donor, hydrogen }, acceptor(3, acc_pos))
    }

    #[test]
    fn linear_hbond_within_distance_is_detected_with_protein_donor_annotation() {
        let (don, acc) = donor_pair_with_acceptor(3.0, 180.0);
        let bonds = hbonds(&[acc], &[don], true, &DetectionConfig::default());
        assert_eq!(bonds.len(), 1);
        let bond = &bonds[0];
        assert!((bond.distance_ad - 3.0).abs() < TOLERANCE);
        assert!((bond.distance_ah - 2.0).abs() < TOLERANCE);
        assert!((bond.angle - 180.0).abs() < 1e-4);
        assert_eq!(bond.residue, Some(ResidueInfo::new("LYS", 7, 'B')));
        assert!(bond.sidechain);
        assert!(bond.protein_is_donor);
    }

    #[test]
    fn ligand_donor_takes_annotation_from_acceptor() {
        let (don, acc) = donor_pair_with_acceptor(3.0, 150.0);
        let bonds = hbonds(&[acc], &[don], false, &DetectionConfig::default());
        assert_eq!(bonds.len(), 1);
        assert_eq!(bonds[0].residue, Some(ResidueInfo::new("ASP", 30, 'A')));
        assert!(!bonds[0].sidechain);
    }

    #[test]
    fn angle_equal_to_minimum_is_excluded() {
        let (don, acc) = donor_pair_with_acceptor(3.0, 120.0);
        let measured = {
            let h_to_d = vector(&don.hydrogen.position, &don.donor.position);
            let h_to_a = vector(&don.hydrogen.position, &acc.atom.position);
            vecangle(&h_to_d, &h_to_a)
        };
        let at_boundary = DetectionConfigBuilder::new()
            .hbond_don_angle_min(measured)
            .build()
            .unwrap();
        assert!(hbonds(&[acc.clone()], &[don.clone()], true, &at_boundary).is_empty());

        let just_below = DetectionConfigBuilder::new()
            .hbond_don_angle_min(measured - 1e-6)
            .build()
            .unwrap();
        assert_eq!(hbonds(&[acc], &[don], true, &just_below).len(), 1);
    }

    #[test]
    fn too_distant_or_bent_pairs_are_rejected() {
        let (don, acc) = donor_pair_with_acceptor(4.5, 170.0);
        assert!(hbonds(&[acc], &[don], true, &DetectionConfig::default()).is_empty());

        let (don, acc) = donor_pair_with_acceptor(3.0, 90.0);
        assert!(hbonds(&[acc], &[don], true, &DetectionConfig::default()).is_empty());
    }
}
