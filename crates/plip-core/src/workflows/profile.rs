use crate::core::models::atom::{Atom, ResidueInfo};
use crate::core::models::features::{
    Acceptor, AromaticRing, ChargeCenter, DonorPair, HalogenAcceptor, HalogenDonor,
    HydrophobicAtom, MetalBindingTarget, MetalCenter, Water,
};
use crate::core::models::interactions::{
    HalogenBond, HydrogenBond, HydrophobicContact, Interaction, InteractionKind, MetalComplex,
    PiCation, PiStack, SaltBridge, WaterBridge,
};
use crate::engine::config::DetectionConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks;
use nalgebra::Point3;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::join;

#[cfg(not(feature = "parallel"))]
fn join<A, B>(a: impl FnOnce() -> A, b: impl FnOnce() -> B) -> (A, B) {
    (a(), b())
}

/// Pre-classified features of the protein binding site.
#[derive(Debug, Clone, Default)]
pub struct BindingSiteFeatures {
    pub hydrophobic_atoms: Vec<HydrophobicAtom>,
    pub acceptors: Vec<Acceptor>,
    pub donors: Vec<DonorPair>,
    pub rings: Vec<AromaticRing>,
    pub positive_charges: Vec<ChargeCenter>,
    pub negative_charges: Vec<ChargeCenter>,
    pub halogen_acceptors: Vec<HalogenAcceptor>,
    pub waters: Vec<Water>,
    pub metal_binding: Vec<MetalBindingTarget>,
}

/// Pre-classified features of the ligand, including the metal ions that are
/// part of it.
#[derive(Debug, Clone, Default)]
pub struct LigandFeatures {
    pub hydrophobic_atoms: Vec<HydrophobicAtom>,
    pub acceptors: Vec<Acceptor>,
    pub donors: Vec<DonorPair>,
    pub rings: Vec<AromaticRing>,
    pub positive_charges: Vec<ChargeCenter>,
    pub negative_charges: Vec<ChargeCenter>,
    pub halogen_donors: Vec<HalogenDonor>,
    pub metals: Vec<MetalCenter>,
    pub metal_binding: Vec<MetalBindingTarget>,
}

/// All interactions detected between one binding site and one ligand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionProfile {
    pub saltbridges_protein_positive: Vec<SaltBridge>,
    pub saltbridges_ligand_positive: Vec<SaltBridge>,
    pub hbonds_ligand_donor: Vec<HydrogenBond>,
    pub hbonds_protein_donor: Vec<HydrogenBond>,
    pub pi_stacking: Vec<PiStack>,
    /// Ligand ring with a charged protein group.
    pub pication_ligand_ring: Vec<PiCation>,
    /// Protein ring with a charged ligand group.
    pub pication_protein_ring: Vec<PiCation>,
    pub hydrophobic_contacts: Vec<HydrophobicContact>,
    pub halogen_bonds: Vec<HalogenBond>,
    pub water_bridges: Vec<WaterBridge>,
    pub metal_complexes: Vec<MetalComplex>,
}

impl InteractionProfile {
    /// Every record as an [`Interaction`], in detection order.
    pub fn interactions(&self) -> Vec<Interaction> {
        fn wrap<T>(records: &[T]) -> impl Iterator<Item = Interaction> + '_
        where
            T: Clone + Into<Interaction>,
        {
            records.iter().cloned().map(Into::into)
        }

        wrap(&self.saltbridges_protein_positive)
            .chain(wrap(&self.saltbridges_ligand_positive))
            .chain(wrap(&self.hbonds_ligand_donor))
            .chain(wrap(&self.hbonds_protein_donor))
            .chain(wrap(&self.pi_stacking))
            .chain(wrap(&self.pication_ligand_ring))
            .chain(wrap(&self.pication_protein_ring))
            .chain(wrap(&self.hydrophobic_contacts))
            .chain(wrap(&self.halogen_bonds))
            .chain(wrap(&self.water_bridges))
            .chain(wrap(&self.metal_complexes))
            .collect()
    }

    pub fn counts(&self) -> BTreeMap<InteractionKind, usize> {
        let mut counts = BTreeMap::new();
        for interaction in self.interactions() {
            *counts.entry(interaction.kind()).or_insert(0) += 1;
        }
        counts
    }

    pub fn is_empty(&self) -> bool {
        self.interactions().is_empty()
    }

    /// Protein residues taking part in at least one interaction, sorted and
    /// deduplicated.
    pub fn interacting_residues(&self) -> Vec<ResidueInfo> {
        self.interactions()
            .iter()
            .filter_map(|i| i.residue().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn is_finite(point: &Point3<f64>) -> bool {
    point.coords.iter().all(|c| c.is_finite())
}

fn check_atoms<'a, T: 'a>(
    feature: &'static str,
    items: &'a [T],
    atoms: impl Fn(&'a T) -> Vec<&'a Atom>,
) -> Result<(), EngineError> {
    for (index, item) in items.iter().enumerate() {
        if !atoms(item).into_iter().all(|a| is_finite(&a.position)) {
            return Err(EngineError::InvalidFeature {
                feature,
                index,
                reason: "non-finite atom coordinates",
            });
        }
    }
    Ok(())
}

fn check_rings(rings: &[AromaticRing]) -> Result<(), EngineError> {
    check_atoms("aromatic ring", rings, |r| r.atoms.iter().collect())?;
    for (index, ring) in rings.iter().enumerate() {
        let reason = if !is_finite(&ring.center) || !ring.normal.iter().all(|c| c.is_finite()) {
            Some("non-finite center or normal")
        } else if ring.normal.norm() == 0.0 {
            Some("zero-length normal")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(EngineError::InvalidFeature {
                feature: "aromatic ring",
                index,
                reason,
            });
        }
    }
    Ok(())
}

fn check_charges(charges: &[ChargeCenter]) -> Result<(), EngineError> {
    check_atoms("charge center", charges, |c| c.atoms.iter().collect())?;
    match charges.iter().position(|c| !is_finite(&c.center)) {
        Some(index) => Err(EngineError::InvalidFeature {
            feature: "charge center",
            index,
            reason: "non-finite center",
        }),
        None => Ok(()),
    }
}

fn validate_site(site: &BindingSiteFeatures) -> Result<(), EngineError> {
    check_atoms("hydrophobic atom", &site.hydrophobic_atoms, |h| vec![&h.atom])?;
    check_atoms("acceptor", &site.acceptors, |a| vec![&a.atom])?;
    check_atoms("donor", &site.donors, |d| vec![&d.donor, &d.hydrogen])?;
    check_rings(&site.rings)?;
    check_charges(&site.positive_charges)?;
    check_charges(&site.negative_charges)?;
    check_atoms("halogen acceptor", &site.halogen_acceptors, |h| {
        vec![&h.oxygen, &h.partner]
    })?;
    check_atoms("water", &site.waters, |w| vec![&w.oxygen])?;
    check_atoms("metal binding target", &site.metal_binding, |t| vec![&t.atom])
}

fn validate_ligand(ligand: &LigandFeatures) -> Result<(), EngineError> {
    check_atoms("hydrophobic atom", &ligand.hydrophobic_atoms, |h| vec![&h.atom])?;
    check_atoms("acceptor", &ligand.acceptors, |a| vec![&a.atom])?;
    check_atoms("donor", &ligand.donors, |d| vec![&d.donor, &d.hydrogen])?;
    check_rings(&ligand.rings)?;
    check_charges(&ligand.positive_charges)?;
    check_charges(&ligand.negative_charges)?;
    check_atoms("halogen donor", &ligand.halogen_donors, |h| {
        vec![&h.halogen, &h.carbon]
    })?;
    check_atoms("metal", &ligand.metals, |m| vec![&m.atom])?;
    check_atoms("metal binding target", &ligand.metal_binding, |t| vec![&t.atom])
}

struct PolarContacts {
    saltbridges_protein_positive: Vec<SaltBridge>,
    saltbridges_ligand_positive: Vec<SaltBridge>,
    hbonds_ligand_donor: Vec<HydrogenBond>,
    hbonds_protein_donor: Vec<HydrogenBond>,
    halogen_bonds: Vec<HalogenBond>,
    water_bridges: Vec<WaterBridge>,
}

struct ApolarContacts {
    pi_stacking: Vec<PiStack>,
    pication_ligand_ring: Vec<PiCation>,
    pication_protein_ring: Vec<PiCation>,
    hydrophobic_contacts: Vec<HydrophobicContact>,
}

fn detect_polar(
    site: &BindingSiteFeatures,
    ligand: &LigandFeatures,
    config: &DetectionConfig,
    reporter: &ProgressReporter,
) -> PolarContacts {
    let saltbridges_protein_positive = tasks::saltbridge::saltbridge(
        &site.positive_charges,
        &ligand.negative_charges,
        true,
        config,
    );
    let saltbridges_ligand_positive = tasks::saltbridge::saltbridge(
        &ligand.positive_charges,
        &site.negative_charges,
        false,
        config,
    );
    reporter.report(Progress::TaskIncrement);
    let hbonds_ligand_donor =
        tasks::hbond::hbonds(&site.acceptors, &ligand.donors, false, config);
    let hbonds_protein_donor =
        tasks::hbond::hbonds(&ligand.acceptors, &site.donors, true, config);
    reporter.report(Progress::TaskIncrement);
    let halogen_bonds =
        tasks::halogen::halogen(&site.halogen_acceptors, &ligand.halogen_donors, config);
    reporter.report(Progress::TaskIncrement);
    let water_bridges = tasks::water_bridge::water_bridges(
        &site.acceptors,
        &ligand.acceptors,
        &site.donors,
        &ligand.donors,
        &site.waters,
        config,
    );
    reporter.report(Progress::TaskIncrement);

    PolarContacts {
        saltbridges_protein_positive,
        saltbridges_ligand_positive,
        hbonds_ligand_donor,
        hbonds_protein_donor,
        halogen_bonds,
        water_bridges,
    }
}

fn detect_apolar(
    site: &BindingSiteFeatures,
    ligand: &LigandFeatures,
    config: &DetectionConfig,
    reporter: &ProgressReporter,
) -> ApolarContacts {
    let pi_stacking = tasks::pistacking::pistacking(&site.rings, &ligand.rings, config);
    reporter.report(Progress::TaskIncrement);
    let pication_ligand_ring =
        tasks::pication::pication(&ligand.rings, &site.positive_charges, true, config);
    let pication_protein_ring =
        tasks::pication::pication(&site.rings, &ligand.positive_charges, false, config);
    reporter.report(Progress::TaskIncrement);
    let hydrophobic_contacts = tasks::hydrophobic::hydrophobic_interactions(
        &site.hydrophobic_atoms,
        &ligand.hydrophobic_atoms,
        config,
    );
    reporter.report(Progress::TaskIncrement);

    ApolarContacts {
        pi_stacking,
        pication_ligand_ring,
        pication_protein_ring,
        hydrophobic_contacts,
    }
}

const DETECTION_STEPS: u64 = 7;

/// Runs every detector for one binding site / ligand pair.
///
/// The configuration and all feature coordinates are validated up front;
/// detection itself cannot fail.
#[instrument(skip_all, name = "profile_workflow")]
pub fn run(
    site: &BindingSiteFeatures,
    ligand: &LigandFeatures,
    config: &DetectionConfig,
    reporter: &ProgressReporter,
) -> Result<InteractionProfile, EngineError> {
    // === Phase 1: Validation ===
    reporter.report(Progress::PhaseStart { name: "Validation" });
    config.validate()?;
    validate_site(site)?;
    validate_ligand(ligand)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Pairwise contacts ===
    reporter.report(Progress::PhaseStart {
        name: "Interaction Detection",
    });
    info!("Detecting pairwise contacts between binding site and ligand.");
    reporter.report(Progress::TaskStart {
        total_steps: DETECTION_STEPS,
    });
    let (polar, apolar) = join(
        || detect_polar(site, ligand, config, reporter),
        || detect_apolar(site, ligand, config, reporter),
    );
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Metal complexes ===
    reporter.report(Progress::PhaseStart {
        name: "Metal Complexation",
    });
    info!(
        metals = ligand.metals.len(),
        "Classifying metal coordination geometries."
    );
    let targets: Vec<MetalBindingTarget> = ligand
        .metal_binding
        .iter()
        .chain(&site.metal_binding)
        .cloned()
        .collect();
    let metal_complexes =
        tasks::metal_complex::metal_complexation(&ligand.metals, &targets, config, reporter);
    reporter.report(Progress::PhaseFinish);

    let profile = InteractionProfile {
        saltbridges_protein_positive: polar.saltbridges_protein_positive,
        saltbridges_ligand_positive: polar.saltbridges_ligand_positive,
        hbonds_ligand_donor: polar.hbonds_ligand_donor,
        hbonds_protein_donor: polar.hbonds_protein_donor,
        pi_stacking: apolar.pi_stacking,
        pication_ligand_ring: apolar.pication_ligand_ring,
        pication_protein_ring: apolar.pication_protein_ring,
        hydrophobic_contacts: apolar.hydrophobic_contacts,
        halogen_bonds: polar.halogen_bonds,
        water_bridges: polar.water_bridges,
        metal_complexes,
    };

    info!(
        total = profile.interactions().len(),
        residues = profile.interacting_residues().len(),
        "Interaction profiling complete."
    );
    Ok(profile)
}
