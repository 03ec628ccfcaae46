//! Player inventory: tools and minerals with quantities.
//!
//! Entries are unique per [`ItemKind`]; adding an item that is already held
//! bumps its quantity. Entries whose quantity drops to zero stay in place so
//! the inventory keeps its order for display.

use im::Vector;
use serde::{Deserialize, Serialize};

/// Anything the player can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Needed to dig dirt. Never consumed.
    Pickaxe,
    /// Consumed to blast rock.
    Dynamite,
    /// Mineral.
    Gold,
    /// Mineral.
    Silver,
    /// Mineral.
    Platinum,
}

impl ItemKind {
    /// Tools are bought, never sold.
    #[must_use]
    pub const fn is_tool(self) -> bool {
        matches!(self, ItemKind::Pickaxe | ItemKind::Dynamite)
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ItemKind::Pickaxe => "pickaxe",
            ItemKind::Dynamite => "dynamite",
            ItemKind::Gold => "gold",
            ItemKind::Silver => "silver",
            ItemKind::Platinum => "platinum",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One inventory line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// What is held.
    pub item: ItemKind,
    /// How many.
    pub quantity: u32,
    /// Money credited per unit when sold.
    pub unit_value: i64,
}

/// Ordered collection of inventory entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    entries: Vector<InventoryEntry>,
}

impl Inventory {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add items (builder pattern).
    #[must_use]
    pub fn with(mut self, item: ItemKind, quantity: u32, unit_value: i64) -> Self {
        self.add(item, quantity, unit_value);
        self
    }

    /// Quantity held of `item`, zero if absent.
    #[must_use]
    pub fn quantity(&self, item: ItemKind) -> u32 {
        self.entry(item).map_or(0, |e| e.quantity)
    }

    /// True if at least one unit of `item` is held.
    #[must_use]
    pub fn has(&self, item: ItemKind) -> bool {
        self.quantity(item) > 0
    }

    /// The entry for `item`, if one exists.
    #[must_use]
    pub fn entry(&self, item: ItemKind) -> Option<&InventoryEntry> {
        self.entries.iter().find(|e| e.item == item)
    }

    /// Add `quantity` units, merging into an existing entry.
    ///
    /// An existing entry keeps its stored unit value.
    pub fn add(&mut self, item: ItemKind, quantity: u32, unit_value: i64) {
        if let Some(index) = self.index_of(item) {
            if let Some(entry) = self.entries.get_mut(index) {
                entry.quantity = entry.quantity.saturating_add(quantity);
            }
        } else {
            self.entries.push_back(InventoryEntry {
                item,
                quantity,
                unit_value,
            });
        }
    }

    /// Remove `quantity` units.
    ///
    /// Returns false (and changes nothing) if fewer are held.
    pub fn remove(&mut self, item: ItemKind, quantity: u32) -> bool {
        let Some(index) = self.index_of(item) else {
            return false;
        };
        match self.entries.get_mut(index) {
            Some(entry) if entry.quantity >= quantity => {
                entry.quantity -= quantity;
                true
            }
            _ => false,
        }
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &InventoryEntry> {
        self.entries.iter()
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of(&self, item: ItemKind) -> Option<usize> {
        self.entries.iter().position(|e| e.item == item)
    }
}
