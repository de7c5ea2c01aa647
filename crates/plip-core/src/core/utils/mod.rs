pub mod cluster;
pub mod geometry;
