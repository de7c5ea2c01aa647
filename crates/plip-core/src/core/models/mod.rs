//! # Models Module
//!
//! Immutable data handed to the detectors by the perception stage, and the
//! records the detectors hand back.
//!
//! - **Atoms** ([`atom`]) - Atom identity, coordinates and residue metadata
//! - **Features** ([`features`]) - Pre-classified chemical groupings over atoms
//!   (rings, charge centers, donors, acceptors, waters, metals)
//! - **Interactions** ([`interactions`]) - One typed record per detected contact,
//!   plus the [`interactions::Interaction`] enum covering every kind

pub mod atom;
pub mod features;
pub mod interactions;
