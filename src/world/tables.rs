//! Fixed probability tables for block generation.
//!
//! Hazard carve-outs (water, unstable ground) are rolled first with a chance
//! that grows with depth; only when neither hits is [`BASE_TABLE`] drawn.
//! Cave-ins backfill from [`POST_COLLAPSE_TABLE`], which has no open space
//! and leans toward hazards and minerals.

use crate::core::TileKind;

/// Initial underground draw, weights in percent.
pub const BASE_TABLE: [(TileKind, u32); 6] = [
    (TileKind::Dirt, 50),
    (TileKind::Rock, 20),
    (TileKind::Gold, 10),
    (TileKind::Silver, 5),
    (TileKind::Platinum, 3),
    (TileKind::Empty, 12),
];

/// Backfill after a collapse, weights in percent.
pub const POST_COLLAPSE_TABLE: [(TileKind, u32); 8] = [
    (TileKind::Dirt, 22),
    (TileKind::Rock, 18),
    (TileKind::UnstableDirt, 15),
    (TileKind::UnstableRock, 12),
    (TileKind::Water, 5),
    (TileKind::Gold, 12),
    (TileKind::Silver, 10),
    (TileKind::Platinum, 6),
];

/// Share of unstable carve-outs that are rock rather than dirt.
pub const UNSTABLE_ROCK_SHARE: f64 = 0.4;

/// Half-width of the uniform noise added to seeded stability.
pub const STABILITY_NOISE: i32 = 10;

/// Chance of a water tile at the given depth fraction.
#[must_use]
pub fn water_chance(depth: f64) -> f64 {
    0.02 + 0.03 * depth
}

/// Chance of unstable ground at the given depth fraction.
#[must_use]
pub fn unstable_chance(depth: f64) -> f64 {
    0.05 + 0.15 * depth
}

/// Mean stability at the given depth fraction: 100 at the surface, 30 at
/// the bottom.
#[must_use]
pub fn mean_stability(depth: f64) -> i32 {
    // depth is within 0..=1, so the result is within 30..=100
    (100.0 - 70.0 * depth).round() as i32
}
