//! Water diffusion.
//!
//! The grid is scanned bottom row first and right to left within a row.
//! Water poured into the row below lands on a cell that has already been
//! visited this pass, so a unit of water falls at most one row per tick.

use crate::core::{Direction, Grid, HazardConfig, Position, TileKind, MAX_LEVEL};

/// Run one diffusion pass over `grid`.
///
/// Returns the number of cells that received water.
pub fn diffuse(hazards: &HazardConfig, grid: &mut Grid) -> usize {
    let rate = i32::from(hazards.water_flow_rate);
    let saturation = i32::from(hazards.water_saturation);
    let mut wetted = 0;

    for y in (0..grid.height()).rev() {
        for x in (0..grid.width()).rev() {
            let pos = Position::new(x, y);
            let Some(source) = grid.get(pos) else {
                continue;
            };
            if !source.is_water_bearing() {
                continue;
            }
            let start = i32::from(source.flood_level());
            let mut level = start;

            let below = pos.step(Direction::Down);
            if let Some(room) = room_at(grid, below) {
                let amount = rate.min(level).min(room);
                if amount > 0 {
                    pour(grid, below, amount);
                    level -= amount;
                    wetted += 1;
                }
            }

            if level > saturation {
                let share = (level - saturation) / 2;
                for side in [Direction::Left, Direction::Right] {
                    let target = pos.step(side);
                    let Some(room) = room_at(grid, target) else {
                        continue;
                    };
                    let amount = share.min(room);
                    if amount > 0 {
                        pour(grid, target, amount);
                        level -= amount;
                        wetted += 1;
                    }
                }
            }

            if level != start {
                drain(grid, pos, level);
            }
        }
    }

    wetted
}

/// Free capacity of an empty cell. `None` when water cannot enter.
fn room_at(grid: &Grid, pos: Position) -> Option<i32> {
    grid.get(pos)
        .filter(|t| t.kind == TileKind::Empty)
        .map(|t| i32::from(MAX_LEVEL) - i32::from(t.flood_level()))
}

fn pour(grid: &mut Grid, pos: Position, amount: i32) {
    if let Some(tile) = grid.get_mut(pos) {
        let level = i32::from(tile.flood_level()) + amount;
        tile.kind = TileKind::Water;
        tile.set_flood_level(level);
    }
}

fn drain(grid: &mut Grid, pos: Position, level: i32) {
    if let Some(tile) = grid.get_mut(pos) {
        tile.set_flood_level(level);
        if tile.kind == TileKind::Water && tile.flood_level() == 0 {
            tile.kind = TileKind::Empty;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Tile;

    /// 5x5 grid: walls on the border, empty inside.
    fn boxed() -> Grid {
        Grid::from_fn(5, 5, |p| {
            if p.x == 0 || p.y == 0 || p.x == 4 || p.y == 4 {
                Tile::new(TileKind::Wall)
            } else {
                Tile::new(TileKind::Empty)
            }
        })
    }

    fn flood(grid: &Grid, x: i32, y: i32) -> u8 {
        grid.get(Position::new(x, y)).unwrap().flood_level()
    }

    #[test]
    fn test_flows_down_one_row_per_tick() {
        let mut grid = boxed();
        grid.set(Position::new(2, 1), Tile::water(40));

        diffuse(&HazardConfig::default(), &mut grid);

        assert_eq!(flood(&grid, 2, 1), 30);
        assert_eq!(flood(&grid, 2, 2), 10);
        assert_eq!(grid.kind_at(Position::new(2, 2)), Some(TileKind::Water));
        assert_eq!(flood(&grid, 2, 3), 0, "water fell two rows in one tick");
    }

    #[test]
    fn test_spreads_sideways_above_saturation() {
        let mut grid = boxed();
        // Solid floor so nothing flows down
        for x in 1..4 {
            grid.set(Position::new(x, 3), Tile::new(TileKind::Rock));
        }
        grid.set(Position::new(2, 2), Tile::water(90));

        diffuse(&HazardConfig::default(), &mut grid);

        // Excess 40, half to each side
        assert_eq!(flood(&grid, 3, 2), 20);
        assert_eq!(flood(&grid, 1, 2), 20);
        assert_eq!(flood(&grid, 2, 2), 50);
    }

    #[test]
    fn test_blocked_by_material() {
        let mut grid = boxed();
        grid.set(Position::new(2, 2), Tile::water(100));
        grid.set(Position::new(2, 3), Tile::new(TileKind::Dirt));
        grid.set(Position::new(1, 2), Tile::new(TileKind::Gold));
        grid.set(Position::new(3, 2), Tile::new(TileKind::UnstableRock));

        let wetted = diffuse(&HazardConfig::default(), &mut grid);

        assert_eq!(wetted, 0);
        assert_eq!(flood(&grid, 2, 2), 100);
        assert_eq!(grid.kind_at(Position::new(2, 3)), Some(TileKind::Dirt));
        assert_eq!(grid.kind_at(Position::new(1, 2)), Some(TileKind::Gold));
    }

    #[test]
    fn test_drained_water_becomes_empty() {
        let mut grid = boxed();
        grid.set(Position::new(2, 1), Tile::water(5));

        diffuse(&HazardConfig::default(), &mut grid);

        let source = grid.get(Position::new(2, 1)).unwrap();
        assert_eq!(source.kind, TileKind::Empty);
        assert_eq!(source.flood_level(), 0);
        assert_eq!(flood(&grid, 2, 2), 5);
    }

    #[test]
    fn test_flooded_empty_stays_empty() {
        let mut grid = boxed();
        grid.set(Position::new(2, 1), Tile::new(TileKind::Empty).with_flood(30));

        diffuse(&HazardConfig::default(), &mut grid);

        assert_eq!(grid.kind_at(Position::new(2, 1)), Some(TileKind::Empty));
        assert_eq!(flood(&grid, 2, 1), 20);
        assert_eq!(grid.kind_at(Position::new(2, 2)), Some(TileKind::Water));
    }

    #[test]
    fn test_never_overfills() {
        let mut grid = boxed();
        grid.set(Position::new(2, 2), Tile::water(100));
        grid.set(Position::new(2, 3), Tile::new(TileKind::Empty).with_flood(95));
        grid.set(Position::new(1, 3), Tile::new(TileKind::Rock));
        grid.set(Position::new(3, 3), Tile::new(TileKind::Rock));

        diffuse(&HazardConfig::default(), &mut grid);

        // Only 5 fits below; the rest of the excess goes sideways
        assert_eq!(flood(&grid, 2, 3), 100);
        assert_eq!(flood(&grid, 3, 2), 22);
        assert_eq!(flood(&grid, 2, 2), 51);
    }
}
