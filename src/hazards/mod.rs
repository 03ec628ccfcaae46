//! Per-tick hazard simulation: water first, then cave-ins.

pub mod cave_in;
pub mod water;

pub use cave_in::{collapse, is_collapse_ready};
pub use water::diffuse;

use crate::core::{GameConfig, GameRng, GameState, Transition};

/// Advance the hazards if at least `config.tick_interval_ms` has passed
/// since the last tick.
///
/// `now_ms` is the driver's clock. Early calls and calls on a finished game
/// return the state unchanged.
pub fn tick(config: &GameConfig, state: &GameState, now_ms: u64, rng: &mut GameRng) -> Transition {
    if state.game_over || now_ms.saturating_sub(state.last_update) < config.tick_interval_ms {
        return Transition::unchanged(state);
    }

    let mut transition = Transition::new(state.clone());
    let next = &mut transition.state;
    next.last_update = now_ms;

    let wetted = diffuse(&config.hazards, &mut next.grid);
    let collapsed = collapse(config, next, rng, &mut transition.events);
    tracing::trace!(now_ms, wetted, collapsed, "hazard tick");

    transition
}
