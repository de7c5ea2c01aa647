//! # PLIP Core Library
//!
//! Detection of non-covalent protein-ligand interactions from pre-classified
//! chemical features: hydrophobic contacts, hydrogen bonds, pi-stacking,
//! pi-cation interactions, salt bridges, halogen bonds, water bridges and
//! metal complexes, including the assignment of coordination geometries.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (atoms, features and
//!   interaction records), geometric primitives, union-find clustering and
//!   static residue-name registries.
//!
//! - **[`engine`]: The Logic Core.** Detection thresholds, one pure detector
//!   per interaction kind and the metal coordination classifier. Detectors
//!   share no state and can run in any order.
//!
//! - **[`workflows`]: The Public API.** Runs every detector for a binding
//!   site and ligand and aggregates the results into an interaction profile.
//!
//! Structure parsing and chemical perception (ring detection, atom typing,
//! donor/acceptor assignment) happen upstream; this crate never re-derives
//! chemistry from coordinates.

pub mod core;
pub mod engine;
pub mod workflows;
