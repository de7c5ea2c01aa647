//! Interaction detectors.
//!
//! Every detector is a pure function over pre-classified feature slices and a
//! [`DetectionConfig`](crate::engine::config::DetectionConfig). Pairs are
//! scanned as a cartesian product with the first argument as the outer loop,
//! so output order is fully determined by input order. Nothing is
//! deduplicated: a pair qualifying under several criteria yields several
//! records.

pub mod halogen;
pub mod hbond;
pub mod hydrophobic;
pub mod metal_complex;
pub mod pication;
pub mod pistacking;
pub mod saltbridge;
pub mod water_bridge;
