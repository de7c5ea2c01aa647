use super::atom::{Atom, ResidueInfo};
use nalgebra::{Point3, Vector3};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct HydrophobicAtom {
    pub atom: Atom,
}

/// A hydrogen bond acceptor atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Acceptor {
    pub atom: Atom,
}

/// A hydrogen bond donor together with one of its hydrogens.
#[derive(Debug, Clone, PartialEq)]
pub struct DonorPair {
    pub donor: Atom,
    pub hydrogen: Atom,
}

/// An aromatic ring with its precomputed center and plane normal.
#[derive(Debug, Clone, PartialEq)]
pub struct AromaticRing {
    pub atoms: Vec<Atom>,
    pub center: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl AromaticRing {
    pub fn residue(&self) -> Option<&ResidueInfo> {
        self.atoms.first().and_then(|a| a.residue.as_ref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charge {
    Positive,
    Negative,
}

/// Chemical group a charge center was perceived from.
///
/// Only [`ChargeGroup::TertiaryAmine`] changes detection behaviour; it carries
/// the positions of the three substituents bonded to the charged nitrogen.
#[derive(Debug, Clone, PartialEq)]
pub enum ChargeGroup {
    TertiaryAmine { neighbors: [Point3<f64>; 3] },
    QuaternaryAmine,
    Guanidine,
    Amidine,
    Sulfonium,
    Carboxylate,
    Phosphate,
    SulfonicAcid,
    Sulfate,
    /// Charged amino-acid side chain (Lys, Arg, His, Asp, Glu).
    Residue,
    Other,
}

impl ChargeGroup {
    pub fn label(&self) -> &'static str {
        match self {
            ChargeGroup::TertiaryAmine { .. } => "tertamine",
            ChargeGroup::QuaternaryAmine => "quartamine",
            ChargeGroup::Guanidine => "guanidine",
            ChargeGroup::Amidine => "amidine",
            ChargeGroup::Sulfonium => "sulfonium",
            ChargeGroup::Carboxylate => "carboxylate",
            ChargeGroup::Phosphate => "phosphate",
            ChargeGroup::SulfonicAcid => "sulfonicacid",
            ChargeGroup::Sulfate => "sulfate",
            ChargeGroup::Residue => "residue",
            ChargeGroup::Other => "other",
        }
    }
}

/// A center of positive or negative charge, possibly spread over several atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeCenter {
    pub atoms: Vec<Atom>,
    pub center: Point3<f64>,
    pub charge: Charge,
    pub group: ChargeGroup,
}

impl ChargeCenter {
    pub fn residue(&self) -> Option<&ResidueInfo> {
        self.atoms.first().and_then(|a| a.residue.as_ref())
    }
}

/// Halogen bond acceptor: an oxygen and the atom Y it is bonded to (Y-O).
#[derive(Debug, Clone, PartialEq)]
pub struct HalogenAcceptor {
    pub oxygen: Atom,
    pub partner: Atom,
}

/// Halogen bond donor: a halogen and the carbon it is bonded to (C-X).
#[derive(Debug, Clone, PartialEq)]
pub struct HalogenDonor {
    pub halogen: Atom,
    pub carbon: Atom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Water {
    pub oxygen: Atom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetalCenter {
    pub atom: Atom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetLocation {
    Ligand,
    Protein,
    Water,
}

impl fmt::Display for TargetLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TargetLocation::Ligand => "ligand",
            TargetLocation::Protein => "protein.sidechain",
            TargetLocation::Water => "water",
        };
        f.write_str(label)
    }
}

/// An atom able to coordinate a metal ion.
#[derive(Debug, Clone, PartialEq)]
pub struct MetalBindingTarget {
    pub atom: Atom,
    /// Functional class of the binding atom (e.g., "carboxylate", "water").
    pub target_type: String,
    pub location: TargetLocation,
}

impl MetalBindingTarget {
    pub fn residue(&self) -> Option<&ResidueInfo> {
        self.atom.residue.as_ref()
    }
}
