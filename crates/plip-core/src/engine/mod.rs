//! # Engine Module
//!
//! Detection logic for protein-ligand interactions.
//!
//! ## Overview
//!
//! The engine turns feature sets of a binding site and a ligand into typed
//! interaction records. Detectors are stateless and never depend on one
//! another, which keeps each of them independently testable and lets the
//! workflow layer run them in any order or in parallel.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Distance and angle thresholds, TOML loading and validation
//! - **Detectors** ([`tasks`]) - One module per interaction kind, plus the metal
//!   coordination-geometry classifier
//! - **Progress Monitoring** ([`progress`]) - Optional sink for phase events and messages
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod config;
pub mod error;
pub mod progress;
pub mod tasks;
