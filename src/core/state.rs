//! Game state: the root aggregate handed to the renderer each frame.
//!
//! ## GameState
//!
//! Everything the simulation knows:
//! - Player position, health, lives, money, score
//! - The tile grid and elevator carriage
//! - Inventory and the open shop, if any
//! - A short message log, newest first
//!
//! Transitions never mutate a state in place. They clone it (O(1) thanks to
//! the `im` collections inside), change the copy and hand it back.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::event::{DamageCause, GameEvent};
use super::grid::Grid;
use super::inventory::{Inventory, ItemKind};
use super::position::Position;
use super::tile::TileKind;
use crate::economy::Shop;
use crate::error::MinerResult;

/// The elevator carriage. Its column never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elevator {
    /// Current carriage position.
    pub position: Position,
}

/// The most recently mined mineral, kept for effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinedMineral {
    /// Where it was.
    pub position: Position,
    /// Which mineral.
    pub kind: TileKind,
}

/// Bounded message log, newest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    entries: Vector<String>,
    capacity: usize,
}

impl MessageLog {
    /// Create an empty log holding at most `capacity` messages.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vector::new(),
            capacity: capacity.max(1),
        }
    }

    /// Add a message, dropping the oldest beyond capacity.
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_front(message.into());
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// The newest message.
    #[must_use]
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Messages, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of messages held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no messages are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Record an external high-score store accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreEntry {
    /// Name entered by the player.
    pub player_name: String,
    /// Final score.
    pub score: i64,
    /// Level reached.
    pub level: u32,
}

/// Complete simulation state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Player position. Always inside the grid.
    pub player: Position,
    /// The world.
    pub grid: Grid,
    /// Points from minerals.
    pub score: i64,
    /// Current level.
    pub level: u32,
    /// Remaining lives.
    pub lives: u32,
    /// Health, `0..=100`.
    pub health: i32,
    /// Money, never negative.
    pub money: i64,
    /// Set once health runs out.
    pub game_over: bool,
    /// Tools and minerals.
    pub inventory: Inventory,
    /// Shop the player is standing in, if any.
    pub active_shop: Option<Shop>,
    /// True while the player is in the surface band.
    pub is_above_ground: bool,
    /// Elevator carriage.
    pub elevator: Elevator,
    /// Debug flag: render every tile regardless of discovery.
    pub show_all_blocks: bool,
    /// Player-facing messages.
    pub messages: MessageLog,
    /// Timestamp of the last hazard tick, in driver milliseconds.
    pub last_update: u64,
    /// Most recently mined mineral.
    pub last_mined_mineral: Option<MinedMineral>,
}

impl GameState {
    /// Starting state for `grid` with the player at `player`.
    ///
    /// Money, health, lives and tools come from `config.economy`; the
    /// elevator waits at the top of the shaft.
    #[must_use]
    pub fn new(config: &GameConfig, grid: Grid, player: Position) -> Self {
        let economy = &config.economy;

        let mut inventory = Inventory::new();
        if economy.starting_pickaxes > 0 {
            inventory.add(ItemKind::Pickaxe, economy.starting_pickaxes, economy.pickaxe_price);
        }
        if economy.starting_dynamite > 0 {
            inventory.add(ItemKind::Dynamite, economy.starting_dynamite, economy.dynamite_price);
        }

        Self {
            player,
            grid,
            score: 0,
            level: 1,
            lives: economy.starting_lives,
            health: economy.starting_health,
            money: economy.starting_money,
            game_over: false,
            inventory,
            active_shop: None,
            is_above_ground: !config.world.is_underground(player.y),
            elevator: Elevator {
                position: config.world.elevator_start(),
            },
            show_all_blocks: false,
            messages: MessageLog::new(config.message_log_capacity),
            last_update: 0,
            last_mined_mineral: None,
        }
    }

    /// True if the renderer should draw the tile at `pos`.
    #[must_use]
    pub fn is_visible(&self, pos: Position) -> bool {
        self.show_all_blocks || self.grid.get(pos).is_some_and(|t| t.discovered)
    }

    /// Append a player-facing message.
    pub fn log(&mut self, message: impl Into<String>) {
        self.messages.push(message);
    }

    /// Remove health, ending the game when it runs out.
    ///
    /// Events are appended to `events`. Does nothing once the game is over.
    pub fn apply_damage(&mut self, amount: i32, cause: DamageCause, events: &mut impl Extend<GameEvent>) {
        if self.game_over {
            return;
        }

        self.health -= amount;
        events.extend([GameEvent::Damage { amount, cause }]);

        if self.health <= 0 {
            self.health = 0;
            self.game_over = true;
            self.log(match cause {
                DamageCause::Drowning => "You drowned! Game over.",
                DamageCause::CaveIn => "You were crushed by a cave-in! Game over.",
            });
            events.extend([GameEvent::GameOver]);
            tracing::info!(score = self.score, ?cause, "game over");
        } else {
            self.log(match cause {
                DamageCause::Drowning => format!("You're drowning! -{amount} health"),
                DamageCause::CaveIn => format!("Cave-in! Falling rocks hit you. -{amount} health"),
            });
        }
    }

    /// The record to submit to a high-score store.
    #[must_use]
    pub fn high_score_entry(&self, player_name: impl Into<String>) -> HighScoreEntry {
        HighScoreEntry {
            player_name: player_name.into(),
            score: self.score,
            level: self.level,
        }
    }

    /// Encode the state for transfer across a process or language boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn to_bytes(&self) -> MinerResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a state produced by [`GameState::to_bytes`].
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid encoded state.
    pub fn from_bytes(bytes: &[u8]) -> MinerResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
