//! Player movement and everything that happens on arrival.
//!
//! A move runs through a fixed sequence of checks. Each early exit returns
//! the state as it stood at that point, so a rejected move still keeps the
//! discovery of the target tile:
//!
//! 1. bounds
//! 2. discover the target
//! 3. sky ceiling
//! 4. water damage (ends the move)
//! 5. elevator ride along the shaft
//! 6. passability
//! 7. mining cost
//! 8. tile effects (dig, blast, collect, open shop)
//! 9. clear the mined tile
//! 10. move the player

use crate::core::{
    DamageCause, Direction, GameConfig, GameEvent, GameState, ItemKind, MinedMineral, Position, Tile, TileKind,
    Transition,
};
use crate::economy::{Shop, ShopKind};
use crate::error::Rejection;

use super::passability::check_passable;

/// Try to move the player one step in `direction`.
pub fn move_player(config: &GameConfig, state: &GameState, direction: Direction) -> Transition {
    if state.game_over {
        return Transition::rejected(state.clone(), Rejection::GameOver);
    }

    let target = state.player.step(direction);
    if !state.grid.in_bounds(target) {
        return Transition::rejected(state.clone(), Rejection::OutOfBounds);
    }

    let mut next = state.clone();
    next.grid.discover(target);

    if target.y < config.world.sky_ceiling {
        return Transition::rejected(next, Rejection::AboveSkyCeiling);
    }

    let Some(tile) = next.grid.get(target).cloned() else {
        return Transition::rejected(next, Rejection::OutOfBounds);
    };

    if tile.kind == TileKind::Water || tile.flood_level() > config.hazards.flood_damage_threshold {
        let mut transition = Transition::new(next);
        transition
            .state
            .apply_damage(config.hazards.water_damage, DamageCause::Drowning, &mut transition.events);
        return transition;
    }

    if is_shaft_ride(config, state.player, target, direction) {
        return ride_elevator(config, next, target);
    }

    if let Err(reason) = check_passable(&tile, &next.inventory) {
        return Transition::rejected(next, reason);
    }

    if tile.kind.is_minable() {
        let cost = config.economy.mining_cost;
        if next.money < cost {
            return Transition::rejected(
                next,
                Rejection::InsufficientFunds {
                    purpose: "mining",
                    needed: cost,
                },
            );
        }
        next.money -= cost;
    }

    let mut transition = Transition::new(next);
    resolve_tile(config, &mut transition, target, &tile);

    let next = &mut transition.state;
    if tile.kind.is_minable() {
        if let Some(cell) = next.grid.get_mut(target) {
            cell.clear();
        }
    }
    if !tile.is_building_door {
        next.active_shop = None;
    }
    next.player = target;
    next.is_above_ground = !config.world.is_underground(target.y);

    transition
}

/// A vertical step from the shaft column that stays within its travel range.
fn is_shaft_ride(config: &GameConfig, from: Position, target: Position, direction: Direction) -> bool {
    let world = &config.world;
    direction.is_vertical()
        && from.x == world.shaft_x
        && (world.ground_row()..=world.shaft_bottom()).contains(&target.y)
}

fn ride_elevator(config: &GameConfig, mut next: GameState, target: Position) -> Transition {
    let world = &config.world;
    let descending_from_surface = !world.is_underground(next.player.y) && world.is_underground(target.y);
    let fare = if descending_from_surface {
        config.economy.elevator_fare
    } else {
        0
    };

    if next.money < fare {
        return Transition::rejected(
            next,
            Rejection::InsufficientFunds {
                purpose: "the elevator",
                needed: fare,
            },
        );
    }

    next.money -= fare;
    next.player = target;
    next.elevator.position = target;
    next.is_above_ground = !world.is_underground(target.y);
    next.active_shop = None;
    if fare > 0 {
        next.log(format!("Going down! Elevator fare: ${fare}"));
        tracing::debug!(fare, "elevator descended from surface");
    }

    let mut transition = Transition::new(next);
    transition.push(GameEvent::ElevatorRide { to: target, fare });
    transition
}

/// Apply the effects of entering `tile`.
fn resolve_tile(config: &GameConfig, transition: &mut Transition, at: Position, tile: &Tile) {
    let state = &mut transition.state;

    match tile.kind {
        TileKind::Rock => {
            state.inventory.remove(ItemKind::Dynamite, 1);
            state.log("Boom! Blasted through rock. (-1 dynamite)");
            transition.events.push(GameEvent::Explosion { at });
        }
        TileKind::Dirt => {
            state.log("Dug through dirt.");
            transition.events.push(GameEvent::Dig { at });
        }
        kind if kind.is_mineral() => {
            let value = config.economy.mineral_value(kind);
            if let Some(item) = kind.mineral_item() {
                state.inventory.add(item, 1, value);
            }
            state.score += value;
            state.last_mined_mineral = Some(MinedMineral { position: at, kind });
            state.log(format!("Found {kind}! +{value}"));
            transition.events.push(GameEvent::MineralFound {
                at,
                mineral: kind,
                value,
            });
        }
        kind if kind.is_building() && tile.is_building_door => {
            let shop = Shop::for_door(config, at, kind);
            let shop_kind = shop.kind;
            state.log(match shop_kind {
                ShopKind::ToolShop => "Welcome to the tool shop!",
                ShopKind::MineralShop => "Welcome! We buy minerals.",
            });
            state.active_shop = Some(shop);
            transition.events.push(GameEvent::ShopOpened { kind: shop_kind });
        }
        _ => {}
    }
}
