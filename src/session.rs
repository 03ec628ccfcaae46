//! Driver-facing game session.
//!
//! A [`Session`] owns the rules engine, the two RNG streams and the current
//! state. Drivers feed it [`Command`]s (one input or timer tick at a time)
//! and read back the resulting [`Transition`]. Every applied command is
//! recorded, so a session can be replayed from its seed or checkpointed
//! and resumed elsewhere.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Direction, GameRng, GameRngState, GameState, ItemKind, Transition};
use crate::error::{MinerResult, Rejection};
use crate::rules::{Engine, RulesEngine};

/// One driver input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Step the player.
    Move(Direction),
    /// Buy one unit at the open shop.
    Buy(ItemKind),
    /// Sell one unit at the open shop.
    Sell(ItemKind),
    /// Flip the reveal-all debug flag.
    ToggleShowAllBlocks,
    /// Timer tick at driver time `now_ms`.
    Tick {
        /// Driver clock in milliseconds.
        now_ms: u64,
    },
    /// Throw the current world away and generate a new one.
    Reset,
}

/// Record of an applied command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// The command applied.
    pub command: Command,

    /// Position in the session history.
    pub sequence: u32,
}

impl CommandRecord {
    /// Create a new command record.
    #[must_use]
    pub fn new(command: Command, sequence: u32) -> Self {
        Self { command, sequence }
    }
}

/// Everything needed to resume a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Seed the session was created with.
    pub seed: u64,
    /// Current state.
    pub state: GameState,
    /// Position of the world generation stream.
    pub world_rng: GameRngState,
    /// Position of the hazard stream.
    pub hazard_rng: GameRngState,
    /// Commands applied so far.
    pub history: Vector<CommandRecord>,
}

impl Checkpoint {
    /// Encode with bincode.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn to_bytes(&self) -> MinerResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by [`Checkpoint::to_bytes`].
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid checkpoint.
    pub fn from_bytes(bytes: &[u8]) -> MinerResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// A running game.
#[derive(Clone, Debug)]
pub struct Session<R: RulesEngine = Engine> {
    engine: R,
    seed: u64,
    world_rng: GameRng,
    hazard_rng: GameRng,
    state: GameState,
    history: Vector<CommandRecord>,
    next_sequence: u32,
}

impl<R: RulesEngine> Session<R> {
    /// Start a session with a freshly generated world.
    pub fn new(engine: R, seed: u64) -> Self {
        let base = GameRng::new(seed);
        let mut world_rng = base.for_context("world");
        let hazard_rng = base.for_context("hazards");
        let state = engine.generate(&mut world_rng);

        Self {
            engine,
            seed,
            world_rng,
            hazard_rng,
            state,
            history: Vector::new(),
            next_sequence: 0,
        }
    }

    /// Rebuild a session by applying `commands` to a fresh one.
    ///
    /// The same engine, seed and commands always produce the same state.
    pub fn replay(engine: R, seed: u64, commands: impl IntoIterator<Item = Command>) -> Self {
        let mut session = Self::new(engine, seed);
        for command in commands {
            session.apply(command);
        }
        session
    }

    /// Resume from a checkpoint.
    pub fn from_checkpoint(engine: R, checkpoint: Checkpoint) -> Self {
        let next_sequence = checkpoint.history.back().map_or(0, |r| r.sequence + 1);
        Self {
            engine,
            seed: checkpoint.seed,
            world_rng: GameRng::from_state(&checkpoint.world_rng),
            hazard_rng: GameRng::from_state(&checkpoint.hazard_rng),
            state: checkpoint.state,
            history: checkpoint.history,
            next_sequence,
        }
    }

    /// The rules in use.
    pub fn engine(&self) -> &R {
        &self.engine
    }

    /// Seed the session was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Commands applied so far, oldest first.
    pub fn history(&self) -> &Vector<CommandRecord> {
        &self.history
    }

    /// Apply one command and return what happened.
    ///
    /// Once the game is over, everything except [`Command::Reset`] is
    /// refused and left out of the history.
    pub fn apply(&mut self, command: Command) -> Transition {
        if self.engine.is_terminal(&self.state) && command != Command::Reset {
            return Transition::rejected(self.state.clone(), Rejection::GameOver);
        }

        let transition = match command {
            Command::Move(direction) => self.engine.move_player(&self.state, direction),
            Command::Buy(item) => self.engine.buy_item(&self.state, item),
            Command::Sell(item) => self.engine.sell_item(&self.state, item),
            Command::ToggleShowAllBlocks => self.engine.toggle_show_all_blocks(&self.state),
            Command::Tick { now_ms } => self.engine.tick(&self.state, now_ms, &mut self.hazard_rng),
            Command::Reset => {
                tracing::info!(seed = self.seed, commands = self.history.len(), "session reset");
                Transition::new(self.engine.generate(&mut self.world_rng))
            }
        };

        self.history.push_back(CommandRecord::new(command, self.next_sequence));
        self.next_sequence += 1;
        self.state = transition.state.clone();
        transition
    }

    /// Shorthand for [`Command::Reset`].
    pub fn reset(&mut self) -> Transition {
        self.apply(Command::Reset)
    }

    /// Capture everything needed to resume this session.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            seed: self.seed,
            state: self.state.clone(),
            world_rng: self.world_rng.state(),
            hazard_rng: self.hazard_rng.state(),
            history: self.history.clone(),
        }
    }
}

impl Session<Engine> {
    /// Session with the default rules.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Engine::with_defaults(), seed)
    }
}
