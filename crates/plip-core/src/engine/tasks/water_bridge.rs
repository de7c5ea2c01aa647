use crate::core::models::features::{Acceptor, DonorPair, Water};
use crate::core::models::interactions::WaterBridge;
use crate::core::utils::geometry::{euclidean3d, vecangle, vector};
use crate::engine::config::DetectionConfig;
use itertools::Itertools;
use tracing::{debug, instrument, trace};

struct AcceptorLeg<'a> {
    acceptor: &'a Acceptor,
    water: &'a Water,
    distance: f64,
}

struct DonorLeg<'a> {
    donor: &'a DonorPair,
    water: &'a Water,
    distance: f64,
    angle: f64,
}

fn in_bridge_range(distance: f64, config: &DetectionConfig) -> bool {
    (config.water_bridge_mindist..=config.water_bridge_maxdist).contains(&distance)
}

fn acceptor_legs<'a>(
    acceptors: &'a [Acceptor],
    water: &'a Water,
    config: &DetectionConfig,
    legs: &mut Vec<AcceptorLeg<'a>>,
) {
    for acceptor in acceptors {
        let distance = euclidean3d(&acceptor.atom.position, &water.oxygen.position);
        if in_bridge_range(distance, config) {
            legs.push(AcceptorLeg {
                acceptor,
                water,
                distance,
            });
        }
    }
}

fn donor_legs<'a>(
    donors: &'a [DonorPair],
    water: &'a Water,
    config: &DetectionConfig,
    legs: &mut Vec<DonorLeg<'a>>,
) {
    for donor in donors {
        let distance = euclidean3d(&donor.donor.position, &water.oxygen.position);
        let angle = vecangle(
            &vector(&donor.hydrogen.position, &donor.donor.position),
            &vector(&donor.hydrogen.position, &water.oxygen.position),
        );
        if in_bridge_range(distance, config) && angle > config.water_bridge_theta_min {
            legs.push(DonorLeg {
                donor,
                water,
                distance,
                angle,
            });
        }
    }
}

fn bridge(
    acc: &AcceptorLeg<'_>,
    don: &DonorLeg<'_>,
    protein_is_donor: bool,
    config: &DetectionConfig,
) -> Option<WaterBridge> {
    if acc.water.oxygen.idx != don.water.oxygen.idx {
        return None;
    }
    let oxygen = &acc.water.oxygen;
    let water_angle = vecangle(
        &vector(&acc.acceptor.atom.position, &oxygen.position),
        &vector(&oxygen.position, &don.donor.hydrogen.position),
    );
    if !(config.water_bridge_omega_min < water_angle && water_angle < config.water_bridge_omega_max)
    {
        return None;
    }

    let protein_atom = if protein_is_donor {
        &don.donor.donor
    } else {
        &acc.acceptor.atom
    };
    trace!(
        acceptor = acc.acceptor.atom.idx,
        donor = don.donor.donor.idx,
        water = oxygen.idx,
        water_angle,
        "Water bridge accepted."
    );
    Some(WaterBridge {
        acceptor: acc.acceptor.atom.clone(),
        donor: don.donor.donor.clone(),
        hydrogen: don.donor.hydrogen.clone(),
        water: oxygen.clone(),
        distance_aw: acc.distance,
        distance_dw: don.distance,
        donor_angle: don.angle,
        water_angle,
        protein_is_donor,
        residue: protein_atom.residue.clone(),
    })
}

// Legs are joined only through the same water oxygen.
#[instrument(skip_all, name = "water_bridge_task")]
pub fn water_bridges(
    bs_acceptors: &[Acceptor],
    lig_acceptors: &[Acceptor],
    bs_donors: &[DonorPair],
    lig_donors: &[DonorPair],
    waters: &[Water],
    config: &DetectionConfig,
) -> Vec<WaterBridge> {
    let mut lig_aw = Vec::new();
    let mut prot_aw = Vec::new();
    let mut lig_dw = Vec::new();
    let mut prot_dw = Vec::new();
    for water in waters {
        acceptor_legs(lig_acceptors, water, config, &mut lig_aw);
        acceptor_legs(bs_acceptors, water, config, &mut prot_aw);
        donor_legs(lig_donors, water, config, &mut lig_dw);
        donor_legs(bs_donors, water, config, &mut prot_dw);
    }

    let protein_donates = lig_aw
        .iter()
        .cartesian_product(prot_dw.iter())
        .filter_map(|(acc, don)| bridge(acc, don, true, config));
    let ligand_donates = prot_aw
        .iter()
        .cartesian_product(lig_dw.iter())
        .filter_map(|(acc, don)| bridge(acc, don, false, config));
    let bridges: Vec<WaterBridge> = protein_donates.chain(ligand_donates).collect();

    debug!(count = bridges.len(), "Water bridges detected.");
    bridges
}
