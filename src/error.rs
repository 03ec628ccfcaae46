//! Error and rejection types.
//!
//! Simulation transitions never fail. A refused action comes back as the
//! unchanged state plus a [`Rejection`], whose `Display` text doubles as the
//! message shown to the player. [`MinerError`] only covers the edges of the
//! crate: loading configuration and moving snapshots across a boundary.

use thiserror::Error;

use crate::core::ItemKind;

/// Errors raised outside the simulation itself.
#[derive(Error, Debug)]
pub enum MinerError {
    /// A configuration value is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A checkpoint could not be encoded or decoded.
    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),
}

/// Result type for fallible edge operations.
pub type MinerResult<T> = Result<T, MinerError>;

/// Why an action was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The target lies outside the grid.
    #[error("that way leads out of the mine")]
    OutOfBounds,

    /// The target is above the highest row the player may stand on.
    #[error("you can't climb any higher")]
    AboveSkyCeiling,

    /// The target is a wall.
    #[error("A solid wall blocks the way.")]
    Wall,

    /// Rock needs dynamite.
    #[error("This rock is too hard! You need dynamite.")]
    NeedDynamite,

    /// Dirt needs a pickaxe.
    #[error("You need a pickaxe to dig through dirt.")]
    NeedPickaxe,

    /// Unstable ground or standing water.
    #[error("This ground is too unstable to mine!")]
    TooUnstable,

    /// Not enough money for a mining cost, fare or purchase.
    #[error("Not enough money for {purpose}! Need ${needed}.")]
    InsufficientFunds {
        /// What the money was for.
        purpose: &'static str,
        /// The amount required.
        needed: i64,
    },

    /// Buying or selling without an open shop.
    #[error("no shop is open")]
    NoShop,

    /// The open shop does not stock this item.
    #[error("{0} is not sold here")]
    NotForSale(ItemKind),

    /// Selling at a shop that does not buy minerals.
    #[error("this shop does not buy minerals")]
    WrongShop,

    /// Selling an item the player does not hold.
    #[error("you have no {0} to sell")]
    NothingToSell(ItemKind),

    /// Tools can never be sold back.
    #[error("tools can't be sold")]
    ToolNotSellable,

    /// The game has ended.
    #[error("the game is over")]
    GameOver,
}

impl Rejection {
    /// Whether this rejection is reported in the player's message log.
    ///
    /// Bounds and shop-state refusals are silent no-ops.
    #[must_use]
    pub fn is_logged(&self) -> bool {
        matches!(
            self,
            Rejection::Wall
                | Rejection::NeedDynamite
                | Rejection::NeedPickaxe
                | Rejection::TooUnstable
                | Rejection::InsufficientFunds { .. }
        )
    }
}
