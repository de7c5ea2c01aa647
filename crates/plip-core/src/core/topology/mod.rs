//! Static residue-name knowledge and ligand-level bookkeeping.
//!
//! [`registry`] holds compile-time sets of metal ions, nucleotides and HET codes
//! that are never treated as ligands. [`ligand`] uses them to classify ligands
//! by name and to assemble composite ligands from covalently linked residues.

pub mod ligand;
pub mod registry;
