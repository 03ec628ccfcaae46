//! Shops and their catalogs.
//!
//! Two kinds exist and they are deliberately asymmetric: the tool shop sells
//! tools and buys nothing; the mineral shop sells nothing and buys minerals
//! at the unit value stored in the player's inventory.

use serde::{Deserialize, Serialize};

use crate::core::{EconomyConfig, GameConfig, ItemKind, Position, ShopResolution, TileKind};

/// Which trading context is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopKind {
    /// Sells pickaxes and dynamite.
    ToolShop,
    /// Buys minerals.
    MineralShop,
}

/// One line of a shop catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    /// What is sold.
    pub item: ItemKind,
    /// Price per unit.
    pub price: i64,
    /// Shown to the player.
    pub description: String,
}

/// An open shop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    /// Door tile the shop was entered from.
    pub position: Position,
    /// Kind of shop.
    pub kind: ShopKind,
    /// Items for sale. Empty for the mineral shop.
    pub catalog: Vec<ShopItem>,
}

impl Shop {
    /// The tool shop with prices from `economy`.
    #[must_use]
    pub fn tool_shop(position: Position, economy: &EconomyConfig) -> Self {
        Self {
            position,
            kind: ShopKind::ToolShop,
            catalog: vec![
                ShopItem {
                    item: ItemKind::Pickaxe,
                    price: economy.pickaxe_price,
                    description: "Digs through dirt. Never wears out.".to_string(),
                },
                ShopItem {
                    item: ItemKind::Dynamite,
                    price: economy.dynamite_price,
                    description: "Blasts through one rock.".to_string(),
                },
            ],
        }
    }

    /// The mineral shop. It only buys.
    #[must_use]
    pub fn mineral_shop(position: Position) -> Self {
        Self {
            position,
            kind: ShopKind::MineralShop,
            catalog: Vec::new(),
        }
    }

    /// The shop opened by the door of a `door_kind` building at `position`.
    #[must_use]
    pub fn for_door(config: &GameConfig, position: Position, door_kind: TileKind) -> Self {
        let tool_shop = match config.shop_resolution {
            ShopResolution::ByPosition => position.x < config.world.width / 2,
            ShopResolution::ByBuilding => door_kind == TileKind::Shop,
        };
        if tool_shop {
            Self::tool_shop(position, &config.economy)
        } else {
            Self::mineral_shop(position)
        }
    }

    /// Catalog line for `item`.
    #[must_use]
    pub fn listing(&self, item: ItemKind) -> Option<&ShopItem> {
        self.catalog.iter().find(|l| l.item == item)
    }

    /// True if this shop accepts mineral sales.
    #[must_use]
    pub fn buys_minerals(&self) -> bool {
        self.kind == ShopKind::MineralShop
    }
}
