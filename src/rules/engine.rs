//! The rules seam between drivers and the simulation.
//!
//! `RulesEngine` lists every transition a driver can ask for. [`Engine`]
//! implements it with the standard rules; a driver that wants to alter one
//! rule can wrap `Engine` and override a single method.

use crate::core::{Direction, GameConfig, GameRng, GameState, ItemKind, Transition};
use crate::economy::{buy_item, sell_item};
use crate::error::MinerResult;
use crate::hazards;
use crate::world::WorldGenerator;

use super::movement::move_player;

/// Rules engine trait.
///
/// All transitions take the current state by reference and return a new
/// one; none of them mutate their input.
pub trait RulesEngine {
    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Build a fresh world and starting state.
    fn generate(&self, rng: &mut GameRng) -> GameState;

    /// Move the player one step.
    fn move_player(&self, state: &GameState, direction: Direction) -> Transition;

    /// Advance hazards at driver time `now_ms`.
    fn tick(&self, state: &GameState, now_ms: u64, rng: &mut GameRng) -> Transition;

    /// Buy one unit of `item` at the open shop.
    fn buy_item(&self, state: &GameState, item: ItemKind) -> Transition;

    /// Sell one unit of `item` at the open shop.
    fn sell_item(&self, state: &GameState, item: ItemKind) -> Transition;

    // === Convenience Methods ===

    /// Move by a raw input delta.
    ///
    /// Anything other than a single orthogonal step changes nothing.
    fn move_by(&self, state: &GameState, dx: i32, dy: i32) -> Transition {
        match Direction::from_delta(dx, dy) {
            Some(direction) => self.move_player(state, direction),
            None => Transition::unchanged(state),
        }
    }

    /// Flip the debug flag that reveals every tile.
    fn toggle_show_all_blocks(&self, state: &GameState) -> Transition {
        let mut next = state.clone();
        next.show_all_blocks = !next.show_all_blocks;
        Transition::new(next)
    }

    /// True once the game has ended.
    fn is_terminal(&self, state: &GameState) -> bool {
        state.game_over
    }
}

/// The standard rules.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: GameConfig,
}

impl Engine {
    /// Create an engine after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MinerError::InvalidConfig`] if the configuration
    /// does not describe a playable world.
    pub fn new(config: GameConfig) -> MinerResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Engine with the default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }
}

impl RulesEngine for Engine {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn generate(&self, rng: &mut GameRng) -> GameState {
        WorldGenerator::new(&self.config).generate(rng)
    }

    fn move_player(&self, state: &GameState, direction: Direction) -> Transition {
        move_player(&self.config, state, direction)
    }

    fn tick(&self, state: &GameState, now_ms: u64, rng: &mut GameRng) -> Transition {
        hazards::tick(&self.config, state, now_ms, rng)
    }

    fn buy_item(&self, state: &GameState, item: ItemKind) -> Transition {
        buy_item(state, item)
    }

    fn sell_item(&self, state: &GameState, item: ItemKind) -> Transition {
        sell_item(state, item)
    }
}
