//! Movement rules and the engine facade.
//!
//! `movement` resolves a single step: discovery, hazards, the elevator,
//! passability, mining costs and tile effects. `RulesEngine` bundles it
//! with world generation, hazards and trade behind one seam.

pub mod engine;
pub mod movement;
pub mod passability;

pub use engine::{Engine, RulesEngine};
pub use movement::move_player;
pub use passability::check_passable;
