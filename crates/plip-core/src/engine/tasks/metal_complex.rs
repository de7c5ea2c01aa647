use crate::core::models::features::{MetalBindingTarget, MetalCenter, TargetLocation};
use crate::core::models::interactions::{Geometry, MetalComplex, coordination_label};
use crate::core::utils::geometry::{euclidean3d, vecangle, vector};
use crate::engine::config::DetectionConfig;
use crate::engine::progress::ProgressReporter;
use nalgebra::{Point3, Vector3};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Score of a signature row that could not be matched to any target.
const NO_MATCH: f64 = 999.0;

/// An idealized coordination polyhedron.
///
/// Each signature row lists the angles one vertex sees towards all other
/// vertices; `(n, row)` repeats a row for `n` equivalent vertices.
struct Polyhedron {
    geometry: Geometry,
    coordination: usize,
    signature: &'static [(usize, &'static [f64])],
}

impl Polyhedron {
    fn rows(&self) -> impl Iterator<Item = &'static [f64]> + '_ {
        self.signature
            .iter()
            .flat_map(|&(n, row)| std::iter::repeat_n(row, n))
    }
}

// Highest coordination first; the order matters for the stable ranking below.
const POLYHEDRA: [Polyhedron; 8] = [
    Polyhedron {
        geometry: Geometry::Octahedral,
        coordination: 6,
        signature: &[(6, &[90.0, 90.0, 90.0, 90.0, 180.0])],
    },
    Polyhedron {
        geometry: Geometry::TrigonalBipyramidal,
        coordination: 5,
        signature: &[
            (3, &[120.0, 120.0, 90.0, 90.0]),
            (2, &[90.0, 90.0, 90.0, 180.0]),
        ],
    },
    Polyhedron {
        geometry: Geometry::SquarePyramidal,
        coordination: 5,
        signature: &[
            (4, &[90.0, 90.0, 90.0, 180.0]),
            (1, &[90.0, 90.0, 90.0, 90.0]),
        ],
    },
    Polyhedron {
        geometry: Geometry::Tetrahedral,
        coordination: 4,
        signature: &[(4, &[109.5, 109.5, 109.5, 109.5])],
    },
    Polyhedron {
        geometry: Geometry::SquarePlanar,
        coordination: 4,
        signature: &[(4, &[90.0, 90.0, 90.0, 90.0])],
    },
    Polyhedron {
        geometry: Geometry::TrigonalPlanar,
        coordination: 3,
        signature: &[(3, &[120.0, 120.0])],
    },
    Polyhedron {
        geometry: Geometry::TrigonalPyramidal,
        coordination: 3,
        signature: &[(3, &[109.5, 109.5])],
    },
    Polyhedron {
        geometry: Geometry::Linear,
        coordination: 2,
        signature: &[(2, &[180.0])],
    },
];

/// Outcome of fitting the observed contacts of one metal.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub geometry: Geometry,
    /// `None` when no geometry could be assigned.
    pub coordination: Option<usize>,
    pub rms: f64,
    /// Atom indices of targets superfluous for the chosen geometry.
    pub excluded: Vec<usize>,
}

impl Classification {
    fn unclassified() -> Self {
        Self {
            geometry: Geometry::Unclassified,
            coordination: None,
            rms: 0.0,
            excluded: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct Candidate {
    geometry: Geometry,
    coordination: usize,
    rms: f64,
    excluded: Vec<usize>,
}

/// Observed angles of one target: the target's atom index and the angles
/// between its direction vectors and those of every other target.
type ObservedAngles = (usize, Vec<f64>);

fn observed_angles(
    metal: &Point3<f64>,
    targets: &[(&MetalBindingTarget, f64)],
) -> Vec<ObservedAngles> {
    let mut vectors: BTreeMap<usize, Vec<Vector3<f64>>> = BTreeMap::new();
    for (target, _) in targets {
        vectors
            .entry(target.atom.idx)
            .or_default()
            .push(vector(metal, &target.atom.position));
    }

    vectors
        .iter()
        .map(|(&idx, own)| {
            let angles = own
                .iter()
                .flat_map(|v| {
                    vectors
                        .iter()
                        .filter(move |&(&other, _)| other != idx)
                        .flat_map(|(_, others)| others.iter())
                        .map(move |w| vecangle(v, w))
                })
                .collect();
            (idx, angles)
        })
        .collect()
}

// Greedy pairing of ideal angles with unused observed angles, best match first.
fn target_score(ideal: &[f64], observed: &[f64]) -> f64 {
    let mut used = vec![false; observed.len()];
    let mut sum_sq = 0.0;
    for &ideal_angle in ideal {
        let mut best: Option<(usize, f64)> = None;
        for (j, &angle) in observed.iter().enumerate() {
            if used[j] {
                continue;
            }
            let diff = (ideal_angle - angle).abs();
            if diff < best.map_or(NO_MATCH, |(_, d)| d) {
                best = Some((j, diff));
            }
        }
        if let Some((j, diff)) = best {
            used[j] = true;
            sum_sq += diff * diff;
        }
    }
    sum_sq.sqrt()
}

fn fit(polyhedron: &Polyhedron, observed: &[ObservedAngles]) -> Candidate {
    let mut used = vec![false; observed.len()];
    let mut scores = Vec::new();
    for row in polyhedron.rows() {
        let mut best: Option<usize> = None;
        let mut best_score = NO_MATCH;
        for (k, (_, angles)) in observed.iter().enumerate() {
            if used[k] {
                continue;
            }
            let score = target_score(row, angles);
            if score < best_score {
                best_score = score;
                best = Some(k);
            }
        }
        if let Some(k) = best {
            used[k] = true;
        }
        scores.push(best_score);
    }

    let rms = scores.iter().sum::<f64>() / scores.len() as f64;
    let excluded = observed
        .iter()
        .zip(&used)
        .filter(|(_, used)| !**used)
        .map(|((idx, _), _)| *idx)
        .collect();

    Candidate {
        geometry: polyhedron.geometry,
        coordination: polyhedron.coordination,
        rms,
        excluded,
    }
}

// Candidates closest to the observed partner count come first. A candidate is
// kept when the next one is clearly worse, the next one is taken when it is
// good in absolute terms, otherwise the search moves on.
fn select_candidate(
    mut candidates: Vec<Candidate>,
    num_targets: usize,
    config: &DetectionConfig,
) -> Option<Candidate> {
    candidates.sort_by_key(|c| num_targets.abs_diff(c.coordination));
    let chosen = candidates.windows(2).enumerate().find_map(|(i, pair)| {
        let (this, next) = (&pair[0], &pair[1]);
        if next.rms - this.rms > config.metal_rms_margin {
            Some(i)
        } else if next.rms < config.metal_rms_cutoff {
            Some(i + 1)
        } else {
            None
        }
    })?;
    Some(candidates.swap_remove(chosen))
}

/// Fits an idealized coordination geometry to the contacts of one metal.
///
/// `targets` holds every target within range together with its distance.
/// A single target cannot define a geometry and yields coordination 1.
pub fn classify_geometry(
    metal: &Point3<f64>,
    targets: &[(&MetalBindingTarget, f64)],
    config: &DetectionConfig,
) -> Classification {
    if targets.len() == 1 {
        return Classification {
            geometry: Geometry::Unclassified,
            coordination: Some(1),
            rms: 0.0,
            excluded: Vec::new(),
        };
    }

    let observed = observed_angles(metal, targets);
    let candidates = POLYHEDRA.iter().map(|p| fit(p, &observed)).collect();
    match select_candidate(candidates, targets.len(), config) {
        Some(best) => Classification {
            geometry: best.geometry,
            coordination: Some(best.coordination),
            rms: best.rms,
            excluded: best.excluded,
        },
        None => Classification::unclassified(),
    }
}

struct MetalContacts<'a> {
    metal: &'a MetalCenter,
    targets: Vec<(&'a MetalBindingTarget, f64)>,
}

fn group_contacts<'a>(
    metals: &'a [MetalCenter],
    targets: &'a [MetalBindingTarget],
    config: &DetectionConfig,
) -> Vec<MetalContacts<'a>> {
    let mut groups: Vec<MetalContacts<'a>> = Vec::new();
    let mut slot_of: HashMap<usize, usize> = HashMap::new();
    for metal in metals {
        for target in targets {
            let distance = euclidean3d(&metal.atom.position, &target.atom.position);
            if distance < config.metal_dist_max {
                let slot = *slot_of.entry(metal.atom.idx).or_insert_with(|| {
                    groups.push(MetalContacts {
                        metal,
                        targets: Vec::new(),
                    });
                    groups.len() - 1
                });
                groups[slot].targets.push((target, distance));
            }
        }
    }
    groups
}

// Metals coordinated only by water still consume a complex number.
#[instrument(skip_all, name = "metal_complex_task")]
pub fn metal_complexation(
    metals: &[MetalCenter],
    targets: &[MetalBindingTarget],
    config: &DetectionConfig,
    reporter: &ProgressReporter,
) -> Vec<MetalComplex> {
    let groups = group_contacts(metals, targets, config);

    #[cfg(not(feature = "parallel"))]
    let iterator = groups.iter();

    #[cfg(feature = "parallel")]
    let iterator = groups.par_iter();

    let classifications: Vec<Classification> = iterator
        .map(|group| classify_geometry(&group.metal.atom.position, &group.targets, config))
        .collect();

    let mut complexes = Vec::new();
    for (i, (group, class)) in groups.iter().zip(classifications).enumerate() {
        let complex_num = i + 1;
        if group
            .targets
            .iter()
            .all(|(t, _)| t.location == TargetLocation::Water)
        {
            debug!(complex_num, "Skipping metal complex with water-only targets.");
            continue;
        }

        let metal_type = &group.metal.atom.element;
        let coordination = coordination_label(class.coordination);
        debug!(
            metal = group.metal.atom.idx,
            geometry = %class.geometry,
            rms = class.rms,
            excluded = class.excluded.len(),
            "Metal geometry assigned."
        );
        reporter.message(format!(
            "Metal ion {} complexed with {} geometry (coo. number {}/ {} observed).",
            metal_type,
            class.geometry,
            coordination,
            group.targets.len()
        ));

        for (target, distance) in &group.targets {
            if class.excluded.contains(&target.atom.idx) {
                continue;
            }
            complexes.push(MetalComplex {
                metal: group.metal.atom.clone(),
                metal_type: metal_type.clone(),
                target: (*target).clone(),
                coordination: class.coordination,
                distance: *distance,
                geometry: class.geometry,
                rms: class.rms,
                num_partners: group.targets.len(),
                complex_num,
                residue: target.residue().cloned(),
            });
        }
    }

    debug!(count = complexes.len(), "Metal complex contacts detected.");
    complexes
}
