//! Shops and trade.

pub mod shop;
pub mod trade;

pub use shop::{Shop, ShopItem, ShopKind};
pub use trade::{buy_item, sell_item};
