//! Core simulation types: positions, tiles, grid, inventory, state, RNG,
//! configuration and events.
//!
//! Nothing in here advances the game. The operations that do live in
//! `rules`, `hazards` and `economy`, and all of them consume and produce
//! the types defined here.

pub mod config;
pub mod event;
pub mod grid;
pub mod inventory;
pub mod position;
pub mod rng;
pub mod state;
pub mod tile;
pub mod transition;

pub use config::{
    BuildingKind, BuildingPlacement, EconomyConfig, GameConfig, HazardConfig, ShopResolution, WorldConfig,
};
pub use event::{AudioCapability, DamageCause, GameEvent, SoundCue, Tone};
pub use grid::Grid;
pub use inventory::{Inventory, InventoryEntry, ItemKind};
pub use position::{Direction, Position};
pub use rng::{GameRng, GameRngState};
pub use state::{Elevator, GameState, HighScoreEntry, MessageLog, MinedMineral};
pub use tile::{Tile, TileKind, MAX_LEVEL};
pub use transition::{Events, Transition};
