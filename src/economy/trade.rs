//! Buying and selling at the open shop.
//!
//! Prices and sale values are not symmetric. Tools bought here can never be
//! sold back, and minerals sell for the unit value they were mined at.

use crate::core::{GameEvent, GameState, ItemKind, Transition};
use crate::error::Rejection;

/// Buy one `item` from the open shop.
pub fn buy_item(state: &GameState, item: ItemKind) -> Transition {
    if state.game_over {
        return Transition::rejected(state.clone(), Rejection::GameOver);
    }
    let Some(shop) = &state.active_shop else {
        return Transition::rejected(state.clone(), Rejection::NoShop);
    };
    let Some(price) = shop.listing(item).map(|l| l.price) else {
        return Transition::rejected(state.clone(), Rejection::NotForSale(item));
    };
    if state.money < price {
        return Transition::rejected(
            state.clone(),
            Rejection::InsufficientFunds {
                purpose: item.name(),
                needed: price,
            },
        );
    }

    let mut next = state.clone();
    next.money -= price;
    next.inventory.add(item, 1, price);
    next.log(format!("Bought {item} for ${price}."));
    tracing::debug!(%item, price, money = next.money, "purchase");

    let mut transition = Transition::new(next);
    transition.push(GameEvent::Purchase { item, price });
    transition
}

/// Sell one `item` to the open shop.
///
/// Tools are refused before anything else is checked.
pub fn sell_item(state: &GameState, item: ItemKind) -> Transition {
    if state.game_over {
        return Transition::rejected(state.clone(), Rejection::GameOver);
    }
    if item.is_tool() {
        return Transition::rejected(state.clone(), Rejection::ToolNotSellable);
    }
    match &state.active_shop {
        None => return Transition::rejected(state.clone(), Rejection::NoShop),
        Some(shop) if !shop.buys_minerals() => {
            return Transition::rejected(state.clone(), Rejection::WrongShop);
        }
        Some(_) => {}
    }
    let Some(value) = state
        .inventory
        .entry(item)
        .filter(|e| e.quantity > 0)
        .map(|e| e.unit_value)
    else {
        return Transition::rejected(state.clone(), Rejection::NothingToSell(item));
    };

    let mut next = state.clone();
    next.inventory.remove(item, 1);
    next.money += value;
    next.log(format!("Sold {item} for ${value}."));
    tracing::debug!(%item, value, money = next.money, "sale");

    let mut transition = Transition::new(next);
    transition.push(GameEvent::Sale { item, value });
    transition
}
