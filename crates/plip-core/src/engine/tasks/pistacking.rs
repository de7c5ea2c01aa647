use crate::core::models::features::AromaticRing;
use crate::core::models::interactions::{PiStack, StackingType};
use crate::core::utils::geometry::{euclidean3d, fold_angle, projection, vecangle};
use crate::engine::config::DetectionConfig;
use itertools::Itertools;
use tracing::{debug, instrument};

// Center distance, folded normal angle and the smaller of the two offsets.
pub fn ring_pair_geometry(r: &AromaticRing, l: &AromaticRing) -> (f64, f64, f64) {
    let distance = euclidean3d(&r.center, &l.center);
    let angle = fold_angle(vecangle(&r.normal, &l.normal));

    let proj1 = projection(&l.normal, &l.center, &r.center);
    let proj2 = projection(&r.normal, &r.center, &l.center);
    let offset = euclidean3d(&proj1, &l.center).min(euclidean3d(&proj2, &r.center));

    (distance, angle, offset)
}

#[instrument(skip_all, name = "pistacking_task")]
pub fn pistacking(
    rings_bs: &[AromaticRing],
    rings_lig: &[AromaticRing],
    config: &DetectionConfig,
) -> Vec<PiStack> {
    let mut stacks = Vec::new();
    for (r, l) in rings_bs.iter().cartesian_product(rings_lig.iter()) {
        let (distance, angle, offset) = ring_pair_geometry(r, l);
        if distance < config.pistack_dist_max && offset < config.pistack_offset_max {
            let dev = config.pistack_ang_dev;
            let parallel = (0.0..dev).contains(&angle);
            let t_shaped = 90.0 - dev < angle && angle < 90.0 + dev;
            for (accepted, stacking) in [
                (parallel, StackingType::Parallel),
                (t_shaped, StackingType::TShaped),
            ] {
                if accepted {
                    stacks.push(PiStack {
                        protein_ring: r.clone(),
                        ligand_ring: l.clone(),
                        distance,
                        angle,
                        offset,
                        stacking,
                        residue: r.residue().cloned(),
                    });
                }
            }
        }
    }

    debug!(count = stacks.len(), "Pi-stacking interactions detected.");
    stacks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::{Atom, ResidueInfo};
    use crate::engine::config::DetectionConfigBuilder;
    use nalgebra::{Point3, Vector3};

    const TOLERANCE: f64 = 1e-9;

    fn ring(center: Point3<f64>, normal: Vector3<f64>) -> AromaticRing {
        AromaticRing {
            atoms: vec![
                Atom::new(0, "C", center).with_residue(ResidueInfo::new("PHE", 99, 'A')),
            ],
            center,
            normal,
        }
    }

    #[test]
    fn face_to_face_rings_stack_in_parallel() {
        let bs = ring(Point3::origin(), Vector3::z());
        let lig = ring(Point3::new(0.5, 0.0, 3.6), -Vector3::z());
        let stacks = pistacking(&[bs], &[lig], &DetectionConfig::default());
        assert_eq!(stacks.len(), 1);
        let stack = &stacks[0];
        assert_eq!(stack.stacking, StackingType::Parallel);
        assert!(stack.angle.abs() < TOLERANCE);
        assert!((stack.offset - 0.5).abs() < TOLERANCE);
        assert_eq!(stack.residue.as_ref().map(|r| r.number), Some(99));
    }

    #[test]
    fn exactly_coplanar_rings_count_as_parallel() {
        let bs = ring(Point3::origin(), Vector3::z());
        let lig = ring(Point3::new(0.0, 0.0, 3.8), Vector3::z());
        let stacks = pistacking(&[bs], &[lig], &DetectionConfig::default());
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks[0].angle, 0.0);
        assert_eq!(stacks[0].stacking, StackingType::Parallel);
    }

    #[test]
    fn edge_to_face_rings_stack_t_shaped() {
        let bs = ring(Point3::origin(), Vector3::z());
        let lig = ring(Point3::new(0.0, 0.0, 5.0), Vector3::x());
        let stacks = pistacking(&[bs], &[lig], &DetectionConfig::default());
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks[0].stacking, StackingType::TShaped);
        assert!((stacks[0].angle - 90.0).abs() < TOLERANCE);
    }

    #[test]
    fn wide_angle_tolerance_reports_both_modes_independently() {
        let config = DetectionConfigBuilder::new()
            .pistack_ang_dev(50.0)
            .build()
            .unwrap();
        let tilted = Vector3::new(1.0, 0.0, 1.0);
        let bs = ring(Point3::origin(), Vector3::z());
        let lig = ring(Point3::new(0.0, 0.0, 4.0), tilted);
        let kinds: Vec<StackingType> = pistacking(&[bs], &[lig], &config)
            .iter()
            .map(|s| s.stacking)
            .collect();
        assert_eq!(kinds, vec![StackingType::Parallel, StackingType::TShaped]);
    }

    #[test]
    fn large_offset_or_distance_prevents_stacking() {
        let bs = ring(Point3::origin(), Vector3::z());
        let slipped = ring(Point3::new(3.0, 0.0, 3.5), Vector3::z());
        let far = ring(Point3::new(0.0, 0.0, 8.0), Vector3::z());
        assert!(pistacking(&[bs], &[slipped, far], &DetectionConfig::default()).is_empty());
    }

    #[test]
    fn ring_pair_geometry_is_symmetric_and_folded() {
        let a = ring(Point3::new(0.2, -0.4, 0.1), Vector3::new(0.1, 0.2, 1.0));
        let b = ring(Point3::new(1.1, 0.7, 3.9), Vector3::new(-0.3, 0.9, -0.8));
        let (d1, a1, o1) = ring_pair_geometry(&a, &b);
        let (d2, a2, o2) = ring_pair_geometry(&b, &a);
        assert!((d1 - d2).abs() < TOLERANCE);
        assert!((a1 - a2).abs() < TOLERANCE);
        assert!((o1 - o2).abs() < TOLERANCE);
        assert!((0.0..=90.0).contains(&a1));
    }
}
