//! # Workflows Module
//!
//! High-level entry points that tie the detectors of [`crate::engine`] together.
//!
//! ## Overview
//!
//! A workflow takes the complete feature sets of one binding site and one
//! ligand, validates them together with the configuration, runs every detector
//! and hands back an aggregated result. Progress is reported phase by phase
//! through a [`ProgressReporter`](crate::engine::progress::ProgressReporter).
//!
//! ## Architecture
//!
//! - **Interaction Profile** ([`profile`]) - All non-covalent interactions of a
//!   protein-ligand pair, with per-kind counts and the interacting residues

pub mod profile;
