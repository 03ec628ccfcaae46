//! # miner-vga
//!
//! Deterministic simulation core for a tile-grid mining game.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: every operation takes the current
//!    [`GameState`] by reference and returns a [`Transition`] holding the
//!    new state, the events it produced and an optional [`Rejection`].
//!    Nothing is mutated in place and nothing fails with an error.
//!
//! 2. **Injected Randomness**: world generation and hazards draw from a
//!    [`GameRng`] passed in by the caller. A seed fully determines a game.
//!
//! 3. **Side Effects as Data**: sounds and log lines are requests carried
//!    by [`GameEvent`]s and the message log. The driver decides what to do
//!    with them.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: the grid, inventory and message log
//!   are `im` vectors, so cloning a state is O(1) and a tile write copies
//!   one chunk.
//!
//! - **Configuration**: every constant lives in [`GameConfig`], loadable
//!   from TOML.
//!
//! ## Modules
//!
//! - `core`: positions, tiles, grid, inventory, state, RNG, config, events
//! - `world`: world generator and block tables
//! - `rules`: movement, passability and the `RulesEngine` facade
//! - `hazards`: water diffusion and cave-ins
//! - `economy`: shops, buying and selling
//! - `session`: command loop with history, replay and checkpoints
//!
//! ```
//! use miner_vga::{Command, Direction, Session};
//!
//! let mut session = Session::with_seed(42);
//! let t = session.apply(Command::Move(Direction::Right));
//! assert_eq!(t.state.player.x, 11);
//!
//! session.apply(Command::Tick { now_ms: 100 });
//! assert_eq!(session.history().len(), 2);
//! ```

pub mod core;
pub mod economy;
pub mod error;
pub mod hazards;
pub mod rules;
pub mod session;
pub mod world;

// Re-export commonly used types
pub use crate::core::{
    AudioCapability, DamageCause, Direction, GameConfig, GameEvent, GameRng, GameRngState, GameState, Grid,
    HighScoreEntry, Inventory, ItemKind, Position, SoundCue, Tile, TileKind, Tone, Transition,
};

pub use crate::economy::{Shop, ShopKind};

pub use crate::error::{MinerError, MinerResult, Rejection};

pub use crate::rules::{Engine, RulesEngine};

pub use crate::session::{Checkpoint, Command, CommandRecord, Session};

pub use crate::world::WorldGenerator;
