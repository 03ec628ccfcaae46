//! Builds a fresh mine.
//!
//! Generation runs in passes:
//! 1. Every cell gets a kind: border walls, the surface band, the shaft, or
//!    a weighted underground draw with depth-scaled hazard carve-outs.
//! 2. Buildings are stamped onto the surface.
//! 3. Water pockets are scattered underground, some growing into pools.
//!
//! Borders, the shaft and the surface band are settled before any random
//! draw in pass 1, and pass 3 skips them, so they never hold material.

use crate::core::{GameConfig, GameRng, GameState, Grid, Position, Tile, TileKind, MAX_LEVEL};

use super::tables::{mean_stability, unstable_chance, water_chance, BASE_TABLE, STABILITY_NOISE, UNSTABLE_ROCK_SHARE};

/// Creates the initial [`GameState`] for a session.
#[derive(Clone, Copy, Debug)]
pub struct WorldGenerator<'a> {
    config: &'a GameConfig,
}

impl<'a> WorldGenerator<'a> {
    /// Create a generator for `config`.
    #[must_use]
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Generate a new world and starting state.
    pub fn generate(&self, rng: &mut GameRng) -> GameState {
        let world = &self.config.world;

        let mut grid = Grid::from_fn(world.width, world.height, |pos| self.initial_tile(pos, rng));
        self.place_buildings(&mut grid);
        self.scatter_water_pockets(&mut grid, rng);

        let spawn = world.spawn_position();
        grid.discover(spawn);
        for neighbor in spawn.neighbors4() {
            grid.discover(neighbor);
        }

        tracing::info!(
            seed = rng.seed(),
            width = world.width,
            height = world.height,
            water = grid.count(TileKind::Water),
            "generated world"
        );

        let mut state = GameState::new(self.config, grid, spawn);
        state.log("Welcome to the mine! Dig for gold, silver and platinum.");
        state
    }

    fn initial_tile(&self, pos: Position, rng: &mut GameRng) -> Tile {
        let world = &self.config.world;

        if pos.x == 0 || pos.y == 0 || pos.x == world.width - 1 || pos.y == world.height - 1 {
            return Tile::new(TileKind::Wall);
        }
        if pos.x == world.shaft_x || !world.is_underground(pos.y) {
            return Tile::new(TileKind::Empty).discovered();
        }

        let depth = world.depth_fraction(pos.y);
        let kind = if rng.chance(water_chance(depth)) {
            TileKind::Water
        } else if rng.chance(unstable_chance(depth)) {
            if rng.chance(UNSTABLE_ROCK_SHARE) {
                TileKind::UnstableRock
            } else {
                TileKind::UnstableDirt
            }
        } else {
            rng.pick_weighted(&BASE_TABLE).unwrap_or(TileKind::Dirt)
        };

        let stability = mean_stability(depth) + rng.noise(STABILITY_NOISE);
        let tile = Tile::new(kind).with_stability(stability);
        if kind == TileKind::Water {
            tile.with_flood(i32::from(MAX_LEVEL))
        } else {
            tile
        }
    }

    fn place_buildings(&self, grid: &mut Grid) {
        let ground = self.config.world.ground_row();

        for building in &self.config.world.buildings {
            let kind = building.kind.tile_kind();
            let top = ground - i32::from(building.height) + 1;

            for y in top..=ground {
                for x in building.x..building.right() {
                    let pos = Position::new(x, y);
                    let tile = if x == building.door_x() && y == ground {
                        Tile::door(kind, building.width, building.height)
                    } else {
                        Tile::new(kind)
                    };
                    grid.set(pos, tile.discovered());
                }
            }
        }
    }

    fn scatter_water_pockets(&self, grid: &mut Grid, rng: &mut GameRng) {
        let world = &self.config.world;

        for y in world.surface_row..world.height - 1 {
            for x in 1..world.width - 1 {
                let pos = Position::new(x, y);
                if !self.is_pocket_cell(grid, pos) || !rng.chance(world.water_pocket_chance) {
                    continue;
                }

                self.flood_cell(grid, pos);
                if rng.chance(world.pool_chance) {
                    for dy in -1..=1 {
                        for dx in -1..=1 {
                            self.flood_cell(grid, pos.offset(dx, dy));
                        }
                    }
                }
            }
        }
    }

    fn flood_cell(&self, grid: &mut Grid, pos: Position) {
        if !self.is_pocket_cell(grid, pos) {
            return;
        }
        let stability = grid.get(pos).map_or(i32::from(MAX_LEVEL), |t| i32::from(t.stability_level()));
        grid.set(pos, Tile::water(i32::from(MAX_LEVEL)).with_stability(stability));
    }

    fn is_pocket_cell(&self, grid: &Grid, pos: Position) -> bool {
        let world = &self.config.world;
        grid.in_bounds(pos) && !grid.is_border(pos) && pos.x != world.shaft_x && world.is_underground(pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ItemKind;

    fn generate(seed: u64) -> (GameConfig, GameState) {
        let config = GameConfig::default();
        let state = WorldGenerator::new(&config).generate(&mut GameRng::new(seed));
        (config, state)
    }

    #[test]
    fn test_starting_state() {
        let (config, state) = generate(42);

        assert_eq!(state.player, config.world.spawn_position());
        assert_eq!(state.elevator.position, config.world.elevator_start());
        assert_eq!(state.money, 100);
        assert_eq!(state.health, 100);
        assert_eq!(state.lives, 3);
        assert_eq!(state.inventory.quantity(ItemKind::Pickaxe), 1);
        assert!(state.is_above_ground);
        assert!(!state.game_over);
        assert_eq!(state.grid.kind_at(state.player), Some(TileKind::Empty));
    }

    #[test]
    fn test_borders_are_walls() {
        let (config, state) = generate(1);
        let w = config.world.width;
        let h = config.world.height;

        for x in 0..w {
            assert_eq!(state.grid.kind_at(Position::new(x, 0)), Some(TileKind::Wall));
            assert_eq!(state.grid.kind_at(Position::new(x, h - 1)), Some(TileKind::Wall));
        }
        for y in 0..h {
            assert_eq!(state.grid.kind_at(Position::new(0, y)), Some(TileKind::Wall));
            assert_eq!(state.grid.kind_at(Position::new(w - 1, y)), Some(TileKind::Wall));
        }
    }

    #[test]
    fn test_shaft_is_clear() {
        for seed in 0..20 {
            let (config, state) = generate(seed);
            for y in 1..config.world.height - 1 {
                let tile = state.grid.get(Position::new(config.world.shaft_x, y)).unwrap();
                assert_eq!(tile.kind, TileKind::Empty);
                assert_eq!(tile.stability_level(), MAX_LEVEL);
            }
        }
    }

    #[test]
    fn test_surface_holds_only_sky_and_buildings() {
        for seed in 0..20 {
            let (config, state) = generate(seed);
            for (pos, tile) in state.grid.iter() {
                if state.grid.is_border(pos) || config.world.is_underground(pos.y) {
                    continue;
                }
                assert!(
                    tile.kind == TileKind::Empty || tile.kind.is_building(),
                    "{} at {pos}",
                    tile.kind
                );
                assert_eq!(tile.stability_level(), MAX_LEVEL);
            }
        }
    }

    #[test]
    fn test_one_door_per_building() {
        let (config, state) = generate(42);
        let doors: Vec<_> = state.grid.iter().filter(|(_, t)| t.is_building_door).collect();

        assert_eq!(doors.len(), config.world.buildings.len());
        let (pos, tool_door) = doors
            .iter()
            .find(|(_, t)| t.kind == TileKind::Shop)
            .copied()
            .unwrap();
        assert_eq!(pos, Position::new(8, config.world.ground_row()));
        assert_eq!((tool_door.building_width, tool_door.building_height), (3, 2));
    }

    #[test]
    fn test_deterministic() {
        let (_, a) = generate(1234);
        let (_, b) = generate(1234);
        let (_, c) = generate(4321);

        assert_eq!(a.grid, b.grid);
        assert_ne!(a.grid, c.grid);
    }

    #[test]
    fn test_deeper_is_less_stable() {
        let (config, state) = generate(9);
        let mean_at = |y: i32| {
            let row: Vec<_> = (1..config.world.width - 1)
                .filter(|&x| x != config.world.shaft_x)
                .filter_map(|x| state.grid.get(Position::new(x, y)))
                .map(|t| f64::from(t.stability_level()))
                .collect();
            row.iter().sum::<f64>() / row.len() as f64
        };

        let shallow = mean_at(config.world.surface_row);
        let deep = mean_at(config.world.shaft_bottom());
        assert!(shallow > deep + 40.0, "shallow {shallow} deep {deep}");
    }

    #[test]
    fn test_base_distribution_roughly_matches_table() {
        // Sample many worlds; dirt should dominate and platinum be rare.
        let mut dirt = 0;
        let mut platinum = 0;
        for seed in 0..10 {
            let (_, state) = generate(seed);
            dirt += state.grid.count(TileKind::Dirt);
            platinum += state.grid.count(TileKind::Platinum);
        }
        assert!(dirt > platinum * 8, "dirt {dirt} platinum {platinum}");
    }

    #[test]
    fn test_water_tiles_are_full() {
        let (_, state) = generate(77);
        for (_, tile) in state.grid.iter().filter(|(_, t)| t.kind == TileKind::Water) {
            assert_eq!(tile.flood_level(), MAX_LEVEL);
        }
    }
}
