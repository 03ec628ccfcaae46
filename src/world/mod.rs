//! World generation: the starting grid, buildings and hazard seeding.

pub mod generator;
pub mod tables;

pub use generator::WorldGenerator;
