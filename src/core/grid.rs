//! The tile grid.
//!
//! Tiles are stored row-major in an `im::Vector`, so cloning a grid is O(1)
//! and writing one cell copies only the chunk that holds it. A grid keeps
//! its dimensions for the whole session.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::position::Position;
use super::tile::{Tile, TileKind};

/// Fixed-size 2D grid of tiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vector<Tile>,
}

impl Grid {
    /// Create a grid filled with copies of `fill`.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    #[must_use]
    pub fn new(width: i32, height: i32, fill: &Tile) -> Self {
        Self::from_fn(width, height, |_| fill.clone())
    }

    /// Create a grid by evaluating `f` at every position, row by row.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Position) -> Tile) -> Self {
        assert!(width > 0 && height > 0, "Grid dimensions must be positive");
        let tiles = (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .map(&mut f)
            .collect();
        Self { width, height, tiles }
    }

    /// Width in tiles.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height in tiles.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// True if `pos` lies inside the grid.
    #[must_use]
    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// True for the outermost ring of cells.
    #[must_use]
    pub const fn is_border(&self, pos: Position) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x == self.width - 1 || pos.y == self.height - 1
    }

    /// Tile at `pos`.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Tile> {
        let idx = self.index(pos)?;
        self.tiles.get(idx)
    }

    /// Mutable tile at `pos`.
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        let idx = self.index(pos)?;
        self.tiles.get_mut(idx)
    }

    /// Kind of the tile at `pos`.
    #[must_use]
    pub fn kind_at(&self, pos: Position) -> Option<TileKind> {
        self.get(pos).map(|t| t.kind)
    }

    /// Replace the tile at `pos`.
    ///
    /// Returns `false` if the position is out of bounds.
    pub fn set(&mut self, pos: Position, tile: Tile) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.tiles.set(idx, tile);
                true
            }
            None => false,
        }
    }

    /// Mark the tile at `pos` discovered.
    ///
    /// Returns true if it was not discovered before.
    pub fn discover(&mut self, pos: Position) -> bool {
        if self.get(pos).is_some_and(|t| t.discovered) {
            return false;
        }
        match self.get_mut(pos) {
            Some(tile) => {
                tile.discovered = true;
                true
            }
            None => false,
        }
    }

    /// Iterate over all positions and tiles, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> {
        let width = self.width;
        self.tiles.iter().enumerate().map(move |(idx, tile)| {
            // idx < width * height, both i32
            let idx = idx as i32;
            (Position::new(idx % width, idx / width), tile)
        })
    }

    /// Tiles of one row, left to right.
    pub fn row(&self, y: i32) -> impl Iterator<Item = &Tile> {
        let start = if (0..self.height).contains(&y) {
            (y * self.width) as usize
        } else {
            self.tiles.len()
        };
        let len = if start < self.tiles.len() { self.width as usize } else { 0 };
        self.tiles.iter().skip(start).take(len)
    }

    /// Number of tiles of `kind`.
    #[must_use]
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|t| t.kind == kind).count()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some((pos.y * self.width + pos.x) as usize)
        } else {
            None
        }
    }
}
