use super::registry::{DNA_RESIDUES, RNA_RESIDUES, UNSUPPORTED, is_metal_ion, is_nucleotide};
use crate::core::models::atom::ResidueInfo;
use crate::core::utils::cluster::UnionFind;
use std::collections::HashSet;
use std::fmt;

/// Whether a HET code can be treated as a small-molecule ligand.
pub fn is_ligand(hetid: &str) -> bool {
    let h = hetid.trim().to_ascii_uppercase();
    !(h == "HOH" || UNSUPPORTED.contains(h.as_str()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LigandKind {
    SmallMolecule,
    Polymer,
    Dna,
    Rna,
    Ion,
}

impl LigandKind {
    fn label(&self) -> &'static str {
        match self {
            LigandKind::SmallMolecule => "SMALLMOLECULE",
            LigandKind::Polymer => "POLYMER",
            LigandKind::Dna => "DNA",
            LigandKind::Rna => "RNA",
            LigandKind::Ion => "ION",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LigandClass {
    pub kind: LigandKind,
    /// A metal ion is part of a larger (composite) ligand.
    pub with_ion: bool,
}

impl fmt::Display for LigandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.label())?;
        if self.with_ion && self.kind != LigandKind::Ion {
            f.write_str("+ION")?;
        }
        Ok(())
    }
}

/// Classifies a (composite) ligand by the HET codes of its residues.
pub fn classify_by_name<S: AsRef<str>>(names: &[S]) -> LigandClass {
    let names: Vec<&str> = names.iter().map(|n| n.as_ref().trim()).collect();

    let kind = if names.len() > 3 {
        if names.iter().any(|n| RNA_RESIDUES.contains(*n)) {
            LigandKind::Rna
        } else if names.iter().any(|n| DNA_RESIDUES.contains(*n)) {
            LigandKind::Dna
        } else {
            LigandKind::Polymer
        }
    } else {
        LigandKind::SmallMolecule
    };

    if names.iter().any(|n| is_metal_ion(n)) {
        if names.len() == 1 {
            return LigandClass {
                kind: LigandKind::Ion,
                with_ion: false,
            };
        }
        return LigandClass {
            kind,
            with_ion: true,
        };
    }
    LigandClass {
        kind,
        with_ion: false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CovalentLinkage {
    pub from: ResidueInfo,
    pub to: ResidueInfo,
}

/// Links consecutive nucleotides of the same chain, in input order.
///
/// Structure files rarely record the phosphodiester bonds of DNA/RNA ligands
/// as explicit linkages; these are needed to stitch the strand into one ligand.
pub fn nucleotide_linkage(residues: &[ResidueInfo]) -> Vec<CovalentLinkage> {
    let mut chains: Vec<(char, Vec<&ResidueInfo>)> = Vec::new();
    for residue in residues.iter().filter(|r| is_nucleotide(&r.name)) {
        match chains.iter_mut().find(|(chain, _)| *chain == residue.chain) {
            Some((_, members)) => members.push(residue),
            None => chains.push((residue.chain, vec![residue])),
        }
    }

    chains
        .iter()
        .flat_map(|(_, members)| {
            members.windows(2).map(|pair| CovalentLinkage {
                from: pair[0].clone(),
                to: pair[1].clone(),
            })
        })
        .collect()
}

/// Groups het residues into composite ligands along covalent linkages.
///
/// Linkages touching a residue outside `residues` are ignored; residues without
/// any linkage form singleton groups. Groups follow the order of `residues`.
pub fn composite_ligands(
    residues: &[ResidueInfo],
    linkages: &[CovalentLinkage],
) -> Vec<Vec<ResidueInfo>> {
    let known: HashSet<&ResidueInfo> = residues.iter().collect();
    let mut forest = UnionFind::new();
    for residue in residues {
        forest.insert(residue.clone());
    }
    for link in linkages {
        if known.contains(&link.from) && known.contains(&link.to) {
            forest.union(link.from.clone(), link.to.clone());
        }
    }
    forest.clusters()
}
