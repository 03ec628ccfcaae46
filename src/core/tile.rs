//! Tile kinds and the per-cell record.
//!
//! `flood_level` and `stability_level` are kept private so every write goes
//! through a clamping setter; both always stay within `0..=MAX_LEVEL`.

use serde::{Deserialize, Deserializer, Serialize};

use super::inventory::ItemKind;

/// Upper bound of flood and stability levels.
pub const MAX_LEVEL: u8 = 100;

/// What occupies a grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Open space (sky, tunnels, the shaft).
    #[default]
    Empty,
    /// Dug with a pickaxe.
    Dirt,
    /// Blasted with dynamite.
    Rock,
    /// Mineral.
    Gold,
    /// Mineral.
    Silver,
    /// Mineral.
    Platinum,
    /// Impassable border.
    Wall,
    /// Building.
    Bank,
    /// Building.
    Shop,
    /// Building.
    Saloon,
    /// Building.
    Hospital,
    /// Standing water.
    Water,
    /// Dirt that may cave in.
    UnstableDirt,
    /// Rock that may cave in.
    UnstableRock,
}

impl TileKind {
    /// Gold, silver or platinum.
    #[must_use]
    pub const fn is_mineral(self) -> bool {
        matches!(self, TileKind::Gold | TileKind::Silver | TileKind::Platinum)
    }

    /// The inventory item a mineral tile yields.
    #[must_use]
    pub const fn mineral_item(self) -> Option<ItemKind> {
        match self {
            TileKind::Gold => Some(ItemKind::Gold),
            TileKind::Silver => Some(ItemKind::Silver),
            TileKind::Platinum => Some(ItemKind::Platinum),
            _ => None,
        }
    }

    /// Tiles that cost money to mine: dirt, rock and minerals.
    #[must_use]
    pub const fn is_minable(self) -> bool {
        matches!(self, TileKind::Dirt | TileKind::Rock) || self.is_mineral()
    }

    /// Building footprint tiles.
    #[must_use]
    pub const fn is_building(self) -> bool {
        matches!(
            self,
            TileKind::Bank | TileKind::Shop | TileKind::Saloon | TileKind::Hospital
        )
    }

    /// Unstable dirt or rock.
    #[must_use]
    pub const fn is_unstable(self) -> bool {
        matches!(self, TileKind::UnstableDirt | TileKind::UnstableRock)
    }

    /// The unstable counterpart of plain dirt or rock.
    #[must_use]
    pub const fn unstable_variant(self) -> Option<TileKind> {
        match self {
            TileKind::Dirt => Some(TileKind::UnstableDirt),
            TileKind::Rock => Some(TileKind::UnstableRock),
            _ => None,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TileKind::Empty => "empty",
            TileKind::Dirt => "dirt",
            TileKind::Rock => "rock",
            TileKind::Gold => "gold",
            TileKind::Silver => "silver",
            TileKind::Platinum => "platinum",
            TileKind::Wall => "wall",
            TileKind::Bank => "bank",
            TileKind::Shop => "shop",
            TileKind::Saloon => "saloon",
            TileKind::Hospital => "hospital",
            TileKind::Water => "water",
            TileKind::UnstableDirt => "unstable dirt",
            TileKind::UnstableRock => "unstable rock",
        }
    }
}

impl std::fmt::Display for TileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One grid cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// What occupies the cell.
    pub kind: TileKind,
    /// Seen by the player. Never reset once set.
    pub discovered: bool,
    #[serde(deserialize_with = "clamped_level")]
    flood_level: u8,
    #[serde(deserialize_with = "clamped_level")]
    stability_level: u8,
    /// Interactive tile of a building footprint.
    pub is_building_door: bool,
    /// Footprint width, meaningful on door tiles only.
    pub building_width: u8,
    /// Footprint height, meaningful on door tiles only.
    pub building_height: u8,
}

/// Decoded levels go through the same clamp as the setters.
fn clamped_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    u8::deserialize(deserializer).map(|level| level.min(MAX_LEVEL))
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileKind::Empty)
    }
}

impl Tile {
    /// Undiscovered, dry, fully stable tile of `kind`.
    #[must_use]
    pub const fn new(kind: TileKind) -> Self {
        Self {
            kind,
            discovered: false,
            flood_level: 0,
            stability_level: MAX_LEVEL,
            is_building_door: false,
            building_width: 0,
            building_height: 0,
        }
    }

    /// A water tile at the given flood level.
    #[must_use]
    pub fn water(level: i32) -> Self {
        Self::new(TileKind::Water).with_flood(level)
    }

    /// Door tile of a `width` x `height` building.
    #[must_use]
    pub const fn door(kind: TileKind, width: u8, height: u8) -> Self {
        let mut tile = Self::new(kind);
        tile.is_building_door = true;
        tile.building_width = width;
        tile.building_height = height;
        tile
    }

    /// Set the flood level (builder pattern).
    #[must_use]
    pub fn with_flood(mut self, level: i32) -> Self {
        self.set_flood_level(level);
        self
    }

    /// Set the stability level (builder pattern).
    #[must_use]
    pub fn with_stability(mut self, level: i32) -> Self {
        self.set_stability_level(level);
        self
    }

    /// Mark as discovered (builder pattern).
    #[must_use]
    pub const fn discovered(mut self) -> Self {
        self.discovered = true;
        self
    }

    /// Water saturation, `0..=100`.
    #[must_use]
    pub const fn flood_level(&self) -> u8 {
        self.flood_level
    }

    /// Structural integrity, `0..=100`.
    #[must_use]
    pub const fn stability_level(&self) -> u8 {
        self.stability_level
    }

    /// Set the flood level, clamped to `0..=100`.
    pub fn set_flood_level(&mut self, level: i32) {
        self.flood_level = clamp_level(level);
    }

    /// Set the stability level, clamped to `0..=100`.
    pub fn set_stability_level(&mut self, level: i32) {
        self.stability_level = clamp_level(level);
    }

    /// Water tiles and flooded empty tiles.
    #[must_use]
    pub fn is_water_bearing(&self) -> bool {
        self.kind == TileKind::Water || (self.kind == TileKind::Empty && self.flood_level > 0)
    }

    /// Turn this cell into open space.
    ///
    /// Discovery and flooding are kept; building data and instability go.
    pub fn clear(&mut self) {
        self.kind = TileKind::Empty;
        self.stability_level = MAX_LEVEL;
        self.is_building_door = false;
        self.building_width = 0;
        self.building_height = 0;
    }
}

fn clamp_level(level: i32) -> u8 {
    // Clamped into 0..=100, so the narrowing is lossless.
    level.clamp(0, i32::from(MAX_LEVEL)) as u8
}
