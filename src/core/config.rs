//! Game configuration.
//!
//! Every constant of the simulation lives here: grid layout, building
//! placement, prices, hazard rates. The defaults reproduce the standard
//! game; drivers may load overrides from TOML:
//!
//! ```
//! use miner_vga::core::GameConfig;
//!
//! let config = GameConfig::from_toml_str(
//!     r#"
//!     tick_interval_ms = 250
//!
//!     [economy]
//!     starting_money = 500
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.tick_interval_ms, 250);
//! assert_eq!(config.economy.starting_money, 500);
//! assert_eq!(config.economy.mining_cost, 1);
//! ```

use serde::{Deserialize, Serialize};

use super::position::Position;
use super::tile::{TileKind, MAX_LEVEL};
use crate::error::{MinerError, MinerResult};

/// Buildings placed on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    /// Bank.
    Bank,
    /// Sells tools.
    ToolShop,
    /// Saloon.
    Saloon,
    /// Hospital.
    Hospital,
}

impl BuildingKind {
    /// The tile kind making up this building's footprint.
    #[must_use]
    pub const fn tile_kind(self) -> TileKind {
        match self {
            BuildingKind::Bank => TileKind::Bank,
            BuildingKind::ToolShop => TileKind::Shop,
            BuildingKind::Saloon => TileKind::Saloon,
            BuildingKind::Hospital => TileKind::Hospital,
        }
    }
}

/// Where a building stands. Its bottom row rests on the ground row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingPlacement {
    /// Which building.
    pub kind: BuildingKind,
    /// Leftmost column of the footprint.
    pub x: i32,
    /// Footprint width.
    pub width: u8,
    /// Footprint height.
    pub height: u8,
}

impl BuildingPlacement {
    /// Create a placement.
    #[must_use]
    pub const fn new(kind: BuildingKind, x: i32, width: u8, height: u8) -> Self {
        Self { kind, x, width, height }
    }

    /// Column of the door tile (bottom centre).
    #[must_use]
    pub const fn door_x(&self) -> i32 {
        self.x + self.width as i32 / 2
    }

    /// One past the rightmost column.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width as i32
    }
}

/// How a door tile decides which shop it opens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopResolution {
    /// Doors left of the grid centre open the tool shop, the rest the
    /// mineral shop.
    #[default]
    ByPosition,
    /// Shop doors open the tool shop, every other door the mineral shop.
    ByBuilding,
}

/// Grid layout and world generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Grid width.
    pub width: i32,
    /// Grid height.
    pub height: i32,
    /// First underground row. Rows above it form the surface band.
    pub surface_row: i32,
    /// Highest row the player may stand on.
    pub sky_ceiling: i32,
    /// Elevator shaft column.
    pub shaft_x: i32,
    /// Surface buildings.
    pub buildings: Vec<BuildingPlacement>,
    /// Per-tile chance of seeding a water pocket.
    pub water_pocket_chance: f64,
    /// Chance that a pocket spreads to its neighbours.
    pub pool_chance: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 25,
            surface_row: 5,
            sky_ceiling: 4,
            shaft_x: 14,
            buildings: vec![
                BuildingPlacement::new(BuildingKind::Bank, 2, 3, 2),
                BuildingPlacement::new(BuildingKind::ToolShop, 7, 3, 2),
                BuildingPlacement::new(BuildingKind::Saloon, 22, 3, 2),
                BuildingPlacement::new(BuildingKind::Hospital, 30, 3, 2),
            ],
            water_pocket_chance: 0.01,
            pool_chance: 0.3,
        }
    }
}

impl WorldConfig {
    /// The row the player walks along on the surface.
    #[must_use]
    pub const fn ground_row(&self) -> i32 {
        self.surface_row - 1
    }

    /// Lowest row the elevator reaches.
    #[must_use]
    pub const fn shaft_bottom(&self) -> i32 {
        self.height - 2
    }

    /// True for rows below the surface band.
    #[must_use]
    pub const fn is_underground(&self, y: i32) -> bool {
        y >= self.surface_row
    }

    /// Where the player starts: beside the tool shop on the ground row.
    #[must_use]
    pub fn spawn_position(&self) -> Position {
        let x = self
            .buildings
            .iter()
            .find(|b| b.kind == BuildingKind::ToolShop)
            .map_or(1, BuildingPlacement::right);
        Position::new(x, self.ground_row())
    }

    /// Elevator carriage starting position.
    #[must_use]
    pub const fn elevator_start(&self) -> Position {
        Position::new(self.shaft_x, self.ground_row())
    }

    /// Depth below the surface as a fraction in `0.0..=1.0`.
    #[must_use]
    pub fn depth_fraction(&self, y: i32) -> f64 {
        let span = (self.shaft_bottom() - self.surface_row).max(1);
        (f64::from(y - self.surface_row) / f64::from(span)).clamp(0.0, 1.0)
    }
}

/// Money, prices and starting resources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Money at session start.
    pub starting_money: i64,
    /// Health at session start.
    pub starting_health: i32,
    /// Lives at session start.
    pub starting_lives: u32,
    /// Pickaxes at session start.
    pub starting_pickaxes: u32,
    /// Dynamite at session start.
    pub starting_dynamite: u32,
    /// Charged for every dirt, rock or mineral tile mined.
    pub mining_cost: i64,
    /// Charged when the elevator carries the player underground.
    pub elevator_fare: i64,
    /// Tool shop price.
    pub pickaxe_price: i64,
    /// Tool shop price.
    pub dynamite_price: i64,
    /// Sale value and score for one gold.
    pub gold_value: i64,
    /// Sale value and score for one silver.
    pub silver_value: i64,
    /// Sale value and score for one platinum.
    pub platinum_value: i64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_money: 100,
            starting_health: 100,
            starting_lives: 3,
            starting_pickaxes: 1,
            starting_dynamite: 0,
            mining_cost: 1,
            elevator_fare: 5,
            pickaxe_price: 50,
            dynamite_price: 25,
            gold_value: 50,
            silver_value: 25,
            platinum_value: 100,
        }
    }
}

impl EconomyConfig {
    /// Value of a mineral tile, zero for anything else.
    #[must_use]
    pub const fn mineral_value(&self, kind: TileKind) -> i64 {
        match kind {
            TileKind::Gold => self.gold_value,
            TileKind::Silver => self.silver_value,
            TileKind::Platinum => self.platinum_value,
            _ => 0,
        }
    }
}

/// Water and cave-in parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    /// Health lost when stepping into water.
    pub water_damage: i32,
    /// Flood level above which an empty tile counts as water for damage.
    pub flood_damage_threshold: u8,
    /// Flood level moved downward per tick.
    pub water_flow_rate: u8,
    /// Flood level above which water also spreads sideways.
    pub water_saturation: u8,
    /// Stability below which unstable ground can collapse.
    pub collapse_threshold: u8,
    /// Half-width of the square refilled after a collapse.
    pub cave_in_radius: i32,
    /// Health lost by a player caught near a collapse.
    pub cave_in_damage: i32,
    /// Manhattan distance within which a collapse hurts the player.
    pub cave_in_damage_distance: u32,
    /// Chance that a dirt or rock neighbour of a collapse turns unstable.
    pub instability_spread_chance: f64,
    /// Stability removed from a neighbour that turns unstable.
    pub instability_spread_penalty: u8,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            water_damage: 20,
            flood_damage_threshold: 50,
            water_flow_rate: 10,
            water_saturation: 50,
            collapse_threshold: 30,
            cave_in_radius: 2,
            cave_in_damage: 25,
            cave_in_damage_distance: 2,
            instability_spread_chance: 0.3,
            instability_spread_penalty: 40,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid layout and generation.
    pub world: WorldConfig,
    /// Prices and starting resources.
    pub economy: EconomyConfig,
    /// Hazard rates.
    pub hazards: HazardConfig,
    /// Minimum wall-clock gap between hazard ticks.
    pub tick_interval_ms: u64,
    /// Messages kept in the log.
    pub message_log_capacity: usize,
    /// Door-to-shop rule.
    pub shop_resolution: ShopResolution,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            economy: EconomyConfig::default(),
            hazards: HazardConfig::default(),
            tick_interval_ms: 100,
            message_log_capacity: 5,
            shop_resolution: ShopResolution::default(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) TOML document over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or the result fails
    /// [`GameConfig::validate`].
    pub fn from_toml_str(text: &str) -> MinerResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the world configuration.
    #[must_use]
    pub fn with_world(mut self, world: WorldConfig) -> Self {
        self.world = world;
        self
    }

    /// Set the economy configuration.
    #[must_use]
    pub fn with_economy(mut self, economy: EconomyConfig) -> Self {
        self.economy = economy;
        self
    }

    /// Set the hazard configuration.
    #[must_use]
    pub fn with_hazards(mut self, hazards: HazardConfig) -> Self {
        self.hazards = hazards;
        self
    }

    /// Set the tick interval.
    #[must_use]
    pub fn with_tick_interval(mut self, millis: u64) -> Self {
        self.tick_interval_ms = millis;
        self
    }

    /// Set the door-to-shop rule.
    #[must_use]
    pub fn with_shop_resolution(mut self, resolution: ShopResolution) -> Self {
        self.shop_resolution = resolution;
        self
    }

    /// Check that the configuration describes a playable world.
    ///
    /// # Errors
    ///
    /// Returns [`MinerError::InvalidConfig`] naming the first problem found.
    pub fn validate(&self) -> MinerResult<()> {
        let w = &self.world;
        let invalid = |msg: String| Err(MinerError::InvalidConfig(msg));

        if w.width < 8 || w.height < 8 {
            return invalid(format!("grid {}x{} is smaller than 8x8", w.width, w.height));
        }
        if w.surface_row < 2 || w.surface_row > w.height - 3 {
            return invalid(format!("surface row {} leaves no surface or underground", w.surface_row));
        }
        if w.sky_ceiling < 1 || w.sky_ceiling > w.ground_row() {
            return invalid(format!("sky ceiling {} must be within 1..={}", w.sky_ceiling, w.ground_row()));
        }
        if w.shaft_x < 1 || w.shaft_x > w.width - 2 {
            return invalid(format!("shaft column {} is on or outside the border", w.shaft_x));
        }
        for b in &w.buildings {
            if b.width == 0 || b.height == 0 {
                return invalid(format!("{:?} has an empty footprint", b.kind));
            }
            if b.x < 1 || b.right() > w.width - 1 {
                return invalid(format!("{:?} does not fit inside the grid", b.kind));
            }
            if i32::from(b.height) > w.ground_row() {
                return invalid(format!("{:?} is taller than the surface band", b.kind));
            }
            if (b.x..b.right()).contains(&w.shaft_x) {
                return invalid(format!("{:?} overlaps the elevator shaft", b.kind));
            }
        }
        let spawn = w.spawn_position();
        if spawn.x < 1 || spawn.x > w.width - 2 || spawn.x == w.shaft_x {
            return invalid(format!("spawn position {spawn} is not a free surface cell"));
        }
        if w.buildings.iter().any(|b| (b.x..b.right()).contains(&spawn.x)) {
            return invalid(format!("spawn position {spawn} lies inside a building"));
        }
        for (name, p) in [
            ("water_pocket_chance", w.water_pocket_chance),
            ("pool_chance", w.pool_chance),
            ("instability_spread_chance", self.hazards.instability_spread_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{name} = {p} is not a probability"));
            }
        }
        let h = &self.hazards;
        for (name, level) in [
            ("flood_damage_threshold", h.flood_damage_threshold),
            ("water_saturation", h.water_saturation),
            ("collapse_threshold", h.collapse_threshold),
            ("instability_spread_penalty", h.instability_spread_penalty),
        ] {
            if level > MAX_LEVEL {
                return invalid(format!("{name} = {level} exceeds {MAX_LEVEL}"));
            }
        }
        if h.cave_in_radius < 0 {
            return invalid(format!("cave_in_radius {} is negative", h.cave_in_radius));
        }
        let e = &self.economy;
        if !(1..=100).contains(&e.starting_health) {
            return invalid(format!("starting health {} is outside 1..=100", e.starting_health));
        }
        for (name, amount) in [
            ("starting_money", e.starting_money),
            ("mining_cost", e.mining_cost),
            ("elevator_fare", e.elevator_fare),
            ("pickaxe_price", e.pickaxe_price),
            ("dynamite_price", e.dynamite_price),
            ("gold_value", e.gold_value),
            ("silver_value", e.silver_value),
            ("platinum_value", e.platinum_value),
            ("water_damage", i64::from(h.water_damage)),
            ("cave_in_damage", i64::from(h.cave_in_damage)),
        ] {
            if amount < 0 {
                return invalid(format!("{name} = {amount} is negative"));
            }
        }
        if self.message_log_capacity == 0 {
            return invalid("message log needs room for at least one entry".to_string());
        }
        Ok(())
    }
}
