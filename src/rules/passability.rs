//! Can the player enter a tile?
//!
//! | kind                          | rule                       |
//! |-------------------------------|----------------------------|
//! | wall                          | never                      |
//! | rock                          | needs dynamite             |
//! | dirt                          | needs a pickaxe            |
//! | unstable dirt/rock, water     | never ("too unstable")     |
//! | empty, buildings, minerals    | always                     |

use crate::core::{Inventory, ItemKind, Tile, TileKind};
use crate::error::Rejection;

/// Check whether `tile` can be entered with `inventory`.
///
/// # Errors
///
/// Returns the [`Rejection`] explaining why the tile is blocked.
pub fn check_passable(tile: &Tile, inventory: &Inventory) -> Result<(), Rejection> {
    match tile.kind {
        TileKind::Wall => Err(Rejection::Wall),
        TileKind::Rock if !inventory.has(ItemKind::Dynamite) => Err(Rejection::NeedDynamite),
        TileKind::Dirt if !inventory.has(ItemKind::Pickaxe) => Err(Rejection::NeedPickaxe),
        TileKind::UnstableDirt | TileKind::UnstableRock | TileKind::Water => Err(Rejection::TooUnstable),
        TileKind::Empty
        | TileKind::Dirt
        | TileKind::Rock
        | TileKind::Gold
        | TileKind::Silver
        | TileKind::Platinum
        | TileKind::Bank
        | TileKind::Shop
        | TileKind::Saloon
        | TileKind::Hospital => Ok(()),
    }
}
