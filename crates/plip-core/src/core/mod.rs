//! # Core Module
//!
//! Stateless building blocks shared by every detector.
//!
//! ## Overview
//!
//! Nothing in this module performs chemical perception. Atoms, rings, charge
//! centers and the other features arrive already classified from an external
//! toolkit; the core only describes them and provides the math that the
//! detectors in [`crate::engine`] are written against.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, pre-classified features and
//!   interaction records
//! - **Structural Knowledge** ([`topology`]) - Residue-name registries and ligand
//!   classification helpers
//! - **Utilities** ([`utils`]) - Geometric primitives and union-find clustering

pub mod models;
pub mod topology;
pub mod utils;
