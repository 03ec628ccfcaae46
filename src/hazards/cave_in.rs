//! Cave-ins.
//!
//! Unstable ground with low stability and material resting on top of it
//! collapses. Every collapse-ready tile is found before any of them is
//! processed, so one collapse never triggers another in the same tick.
//! Chains happen across ticks through instability spreading to the
//! neighbours of each collapse.

use rustc_hash::FxHashSet;

use crate::core::{
    DamageCause, Direction, Events, GameConfig, GameEvent, GameRng, GameState, Grid, Position, Tile, TileKind,
    MAX_LEVEL,
};
use crate::world::tables::POST_COLLAPSE_TABLE;

/// True if the tile at `pos` will collapse on the next cave-in pass.
#[must_use]
pub fn is_collapse_ready(grid: &Grid, pos: Position, threshold: u8) -> bool {
    let Some(tile) = grid.get(pos) else {
        return false;
    };
    tile.kind.is_unstable()
        && tile.stability_level() < threshold
        && grid
            .get(pos.step(Direction::Up))
            .is_some_and(|above| above.kind != TileKind::Empty)
}

/// Run one cave-in pass over the underground rows of `state`.
///
/// Returns the number of tiles that collapsed.
pub fn collapse(config: &GameConfig, state: &mut GameState, rng: &mut GameRng, events: &mut Events) -> usize {
    let world = &config.world;
    let hazards = &config.hazards;

    let mut batch = Vec::new();
    for y in world.surface_row..world.height - 1 {
        for x in 1..world.width - 1 {
            let pos = Position::new(x, y);
            if is_collapse_ready(&state.grid, pos, hazards.collapse_threshold) {
                batch.push(pos);
            }
        }
    }
    if batch.is_empty() {
        return 0;
    }

    let origins: FxHashSet<Position> = batch.iter().copied().collect();
    for &origin in &batch {
        if let Some(tile) = state.grid.get_mut(origin) {
            tile.clear();
        }
        events.push(GameEvent::CaveIn { origin });

        let refilled = backfill(config, state, &origins, origin, rng);
        tracing::trace!(%origin, refilled, "cave-in");

        if state.player.manhattan(origin) <= hazards.cave_in_damage_distance {
            state.apply_damage(hazards.cave_in_damage, DamageCause::CaveIn, events);
        }

        spread_instability(config, &mut state.grid, origin, rng);
    }

    batch.len()
}

/// Refill the empty cells around `origin` with fresh material.
fn backfill(
    config: &GameConfig,
    state: &mut GameState,
    origins: &FxHashSet<Position>,
    origin: Position,
    rng: &mut GameRng,
) -> usize {
    let world = &config.world;
    let radius = config.hazards.cave_in_radius;
    let mut refilled = 0;

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let pos = origin.offset(dx, dy);
            if !state.grid.in_bounds(pos)
                || state.grid.is_border(pos)
                || pos.x == world.shaft_x
                || !world.is_underground(pos.y)
                || pos == state.player
                || origins.contains(&pos)
            {
                continue;
            }
            if state.grid.kind_at(pos) != Some(TileKind::Empty) {
                continue;
            }

            let kind = rng.pick_weighted(&POST_COLLAPSE_TABLE).unwrap_or(TileKind::Dirt);
            let tile = if kind == TileKind::Water {
                Tile::water(i32::from(MAX_LEVEL))
            } else {
                Tile::new(kind)
            };
            state.grid.set(pos, tile.discovered());
            refilled += 1;
        }
    }

    refilled
}

/// Weaken the plain dirt and rock around `origin`.
fn spread_instability(config: &GameConfig, grid: &mut Grid, origin: Position, rng: &mut GameRng) {
    let chance = config.hazards.instability_spread_chance;
    let penalty = i32::from(config.hazards.instability_spread_penalty);

    for neighbor in origin.neighbors4() {
        let Some(tile) = grid.get_mut(neighbor) else {
            continue;
        };
        let Some(unstable) = tile.kind.unstable_variant() else {
            continue;
        };
        if rng.chance(chance) {
            tile.kind = unstable;
            let stability = i32::from(tile.stability_level()) - penalty;
            tile.set_stability_level(stability);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HazardConfig;

    /// 12x12 world, surface rows 1..=2, shaft at x=9, solid dirt below.
    fn test_config(spread: f64) -> GameConfig {
        let mut config = GameConfig::default();
        config.world.width = 12;
        config.world.height = 12;
        config.world.surface_row = 3;
        config.world.sky_ceiling = 2;
        config.world.shaft_x = 9;
        config.world.buildings.clear();
        config.with_hazards(HazardConfig {
            instability_spread_chance: spread,
            ..HazardConfig::default()
        })
    }

    fn solid_state(config: &GameConfig, player: Position) -> GameState {
        let world = &config.world;
        let grid = Grid::from_fn(world.width, world.height, |p| {
            if p.x == 0 || p.y == 0 || p.x == world.width - 1 || p.y == world.height - 1 {
                Tile::new(TileKind::Wall)
            } else if p.x == world.shaft_x || !world.is_underground(p.y) {
                Tile::new(TileKind::Empty).discovered()
            } else {
                Tile::new(TileKind::Dirt)
            }
        });
        GameState::new(config, grid, player)
    }

    fn run(config: &GameConfig, state: &mut GameState) -> (usize, Events) {
        let mut events = Events::new();
        let collapsed = collapse(config, state, &mut GameRng::new(5), &mut events);
        (collapsed, events)
    }

    #[test]
    fn test_loaded_unstable_tile_collapses_and_backfills() {
        let config = test_config(0.0);
        let mut state = solid_state(&config, Position::new(2, 2));
        let origin = Position::new(7, 6);
        state.grid.set(origin, Tile::new(TileKind::UnstableDirt).with_stability(20));
        let holes = [Position::new(6, 6), Position::new(8, 8), Position::new(5, 4)];
        for hole in holes {
            state.grid.set(hole, Tile::new(TileKind::Empty));
        }

        let (collapsed, events) = run(&config, &mut state);

        assert_eq!(collapsed, 1);
        assert_eq!(events.as_slice(), &[GameEvent::CaveIn { origin }]);
        assert_eq!(state.grid.kind_at(origin), Some(TileKind::Empty));
        for hole in holes {
            let tile = state.grid.get(hole).unwrap();
            assert_ne!(tile.kind, TileKind::Empty, "{hole} not refilled");
            assert_eq!(tile.stability_level(), MAX_LEVEL);
            assert!(tile.discovered);
        }
        // The shaft is inside the radius but stays open
        for y in 4..=8 {
            assert_eq!(state.grid.kind_at(Position::new(9, y)), Some(TileKind::Empty));
        }
        assert_eq!(state.health, 100);
    }

    #[test]
    fn test_not_ready_without_load_or_low_stability() {
        let config = test_config(0.0);
        let mut state = solid_state(&config, Position::new(2, 2));
        // Stability at the threshold
        state.grid.set(Position::new(3, 6), Tile::new(TileKind::UnstableRock).with_stability(30));
        // Nothing on top
        state.grid.set(Position::new(5, 6), Tile::new(TileKind::UnstableDirt).with_stability(5));
        state.grid.set(Position::new(5, 5), Tile::new(TileKind::Empty));
        // Low stability but stable kind
        state.grid.set(Position::new(7, 6), Tile::new(TileKind::Dirt).with_stability(5));

        let before = state.clone();
        let (collapsed, events) = run(&config, &mut state);

        assert_eq!(collapsed, 0);
        assert!(events.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_batch_collected_before_processing() {
        let config = test_config(0.0);
        let mut state = solid_state(&config, Position::new(2, 2));
        let upper = Position::new(4, 5);
        let lower = Position::new(4, 6);
        state.grid.set(upper, Tile::new(TileKind::UnstableDirt).with_stability(10));
        state.grid.set(lower, Tile::new(TileKind::UnstableRock).with_stability(10));

        let (collapsed, _) = run(&config, &mut state);

        // Clearing the upper tile does not spare the lower one, and neither
        // origin is refilled by the other's backfill.
        assert_eq!(collapsed, 2);
        assert_eq!(state.grid.kind_at(upper), Some(TileKind::Empty));
        assert_eq!(state.grid.kind_at(lower), Some(TileKind::Empty));
    }

    #[test]
    fn test_player_nearby_takes_damage() {
        let config = test_config(0.0);
        let player = Position::new(4, 7);
        let mut state = solid_state(&config, player);
        state.grid.set(player, Tile::new(TileKind::Empty).discovered());
        state.grid.set(Position::new(4, 6), Tile::new(TileKind::UnstableDirt).with_stability(10));

        let (_, events) = run(&config, &mut state);

        assert_eq!(state.health, 75);
        assert_eq!(state.grid.kind_at(player), Some(TileKind::Empty));
        assert!(events.contains(&GameEvent::Damage {
            amount: 25,
            cause: DamageCause::CaveIn
        }));
    }

    #[test]
    fn test_player_far_away_is_safe() {
        let config = test_config(0.0);
        let player = Position::new(2, 8);
        let mut state = solid_state(&config, player);
        state.grid.set(player, Tile::new(TileKind::Empty).discovered());
        state.grid.set(Position::new(5, 6), Tile::new(TileKind::UnstableDirt).with_stability(10));

        run(&config, &mut state);
        assert_eq!(state.health, 100);
    }

    #[test]
    fn test_instability_spreads_to_neighbours() {
        let config = test_config(1.0);
        let mut state = solid_state(&config, Position::new(2, 2));
        let origin = Position::new(5, 6);
        state.grid.set(origin, Tile::new(TileKind::UnstableDirt).with_stability(10));
        state.grid.set(Position::new(6, 6), Tile::new(TileKind::Rock).with_stability(70));

        run(&config, &mut state);

        for neighbor in origin.neighbors4() {
            let tile = state.grid.get(neighbor).unwrap();
            assert!(tile.kind.is_unstable(), "{neighbor} is {}", tile.kind);
        }
        let rock = state.grid.get(Position::new(6, 6)).unwrap();
        assert_eq!(rock.kind, TileKind::UnstableRock);
        assert_eq!(rock.stability_level(), 30);
        assert_eq!(state.grid.get(Position::new(5, 7)).unwrap().stability_level(), 60);
    }
}
