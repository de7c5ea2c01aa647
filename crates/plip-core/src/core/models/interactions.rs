use super::atom::{Atom, ResidueInfo};
use super::features::{
    AromaticRing, ChargeCenter, HalogenAcceptor, HalogenDonor, MetalBindingTarget,
};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct HydrophobicContact {
    pub bs_atom: Atom,
    pub lig_atom: Atom,
    pub distance: f64,
    pub residue: Option<ResidueInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HydrogenBond {
    pub acceptor: Atom,
    pub donor: Atom,
    pub hydrogen: Atom,
    pub distance_ah: f64,
    pub distance_ad: f64,
    /// Donor angle D-H...A in degrees.
    pub angle: f64,
    pub protein_is_donor: bool,
    pub residue: Option<ResidueInfo>,
    /// Whether the protein-side atom is a side-chain atom.
    pub sidechain: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackingType {
    Parallel,
    TShaped,
}

impl fmt::Display for StackingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackingType::Parallel => f.write_str("P"),
            StackingType::TShaped => f.write_str("T"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PiStack {
    pub protein_ring: AromaticRing,
    pub ligand_ring: AromaticRing,
    pub distance: f64,
    /// Angle between ring normals, folded into `[0, 90]`.
    pub angle: f64,
    pub offset: f64,
    pub stacking: StackingType,
    pub residue: Option<ResidueInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PiCation {
    pub ring: AromaticRing,
    pub charge: ChargeCenter,
    pub distance: f64,
    pub offset: f64,
    pub protein_charged: bool,
    pub residue: Option<ResidueInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaltBridge {
    pub positive: ChargeCenter,
    pub negative: ChargeCenter,
    pub distance: f64,
    pub protein_is_positive: bool,
    pub residue: Option<ResidueInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HalogenBond {
    pub acceptor: HalogenAcceptor,
    pub donor: HalogenDonor,
    pub distance: f64,
    /// Angle C-X...O in degrees.
    pub donor_angle: f64,
    /// Angle Y-O...X in degrees.
    pub acceptor_angle: f64,
    pub residue: Option<ResidueInfo>,
    pub sidechain: bool,
}

/// A first-degree water bridge: acceptor ... water ... H-donor.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterBridge {
    pub acceptor: Atom,
    pub donor: Atom,
    pub hydrogen: Atom,
    pub water: Atom,
    pub distance_aw: f64,
    pub distance_dw: f64,
    pub donor_angle: f64,
    pub water_angle: f64,
    pub protein_is_donor: bool,
    pub residue: Option<ResidueInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Geometry {
    Linear,
    TrigonalPlanar,
    TrigonalPyramidal,
    Tetrahedral,
    SquarePlanar,
    TrigonalBipyramidal,
    SquarePyramidal,
    Octahedral,
    /// No idealized polyhedron could be assigned.
    Unclassified,
}

impl Geometry {
    pub fn label(&self) -> &'static str {
        match self {
            Geometry::Linear => "linear",
            Geometry::TrigonalPlanar => "trigonal.planar",
            Geometry::TrigonalPyramidal => "trigonal.pyramidal",
            Geometry::Tetrahedral => "tetrahedral",
            Geometry::SquarePlanar => "square.planar",
            Geometry::TrigonalBipyramidal => "trigonal.bipyramidal",
            Geometry::SquarePyramidal => "square.pyramidal",
            Geometry::Octahedral => "octahedral",
            Geometry::Unclassified => "NA",
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetalComplex {
    pub metal: Atom,
    pub metal_type: String,
    pub target: MetalBindingTarget,
    /// Coordination number of the chosen geometry, `None` when unclassified.
    pub coordination: Option<usize>,
    pub distance: f64,
    pub geometry: Geometry,
    pub rms: f64,
    /// Number of observed partners within range, excluded ones included.
    pub num_partners: usize,
    /// 1-based index shared by all records of the same metal.
    pub complex_num: usize,
    pub residue: Option<ResidueInfo>,
}

/// Coordination number as reported, `NA` when no geometry was assigned.
pub fn coordination_label(coordination: Option<usize>) -> String {
    coordination.map_or_else(|| "NA".to_string(), |c| c.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InteractionKind {
    Hydrophobic,
    HydrogenBond,
    PiStack,
    PiCation,
    SaltBridge,
    HalogenBond,
    WaterBridge,
    MetalComplex,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Hydrophobic(HydrophobicContact),
    HydrogenBond(HydrogenBond),
    PiStack(PiStack),
    PiCation(PiCation),
    SaltBridge(SaltBridge),
    HalogenBond(HalogenBond),
    WaterBridge(WaterBridge),
    MetalComplex(MetalComplex),
}

impl Interaction {
    pub fn kind(&self) -> InteractionKind {
        match self {
            Interaction::Hydrophobic(_) => InteractionKind::Hydrophobic,
            Interaction::HydrogenBond(_) => InteractionKind::HydrogenBond,
            Interaction::PiStack(_) => InteractionKind::PiStack,
            Interaction::PiCation(_) => InteractionKind::PiCation,
            Interaction::SaltBridge(_) => InteractionKind::SaltBridge,
            Interaction::HalogenBond(_) => InteractionKind::HalogenBond,
            Interaction::WaterBridge(_) => InteractionKind::WaterBridge,
            Interaction::MetalComplex(_) => InteractionKind::MetalComplex,
        }
    }

    /// Protein-side residue the contact is attributed to.
    pub fn residue(&self) -> Option<&ResidueInfo> {
        match self {
            Interaction::Hydrophobic(i) => i.residue.as_ref(),
            Interaction::HydrogenBond(i) => i.residue.as_ref(),
            Interaction::PiStack(i) => i.residue.as_ref(),
            Interaction::PiCation(i) => i.residue.as_ref(),
            Interaction::SaltBridge(i) => i.residue.as_ref(),
            Interaction::HalogenBond(i) => i.residue.as_ref(),
            Interaction::WaterBridge(i) => i.residue.as_ref(),
            Interaction::MetalComplex(i) => i.residue.as_ref(),
        }
    }
}

macro_rules! impl_from_record {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Interaction {
                fn from(record: $variant) -> Self {
                    Interaction::$variant(record)
                }
            }
        )*
    };
}

impl From<HydrophobicContact> for Interaction {
    fn from(record: HydrophobicContact) -> Self {
        Interaction::Hydrophobic(record)
    }
}

impl_from_record!(
    HydrogenBond,
    PiStack,
    PiCation,
    SaltBridge,
    HalogenBond,
    WaterBridge,
    MetalComplex,
);
