//! Movement integration tests on generated worlds.
//!
//! Each test generates the standard world, then pins the tiles it cares
//! about so the outcome does not depend on the seed.

use miner_vga::{
    Direction, Engine, GameEvent, GameRng, GameState, ItemKind, Position, Rejection, RulesEngine, ShopKind, Tile,
    TileKind,
};

fn fresh(seed: u64) -> (Engine, GameState) {
    let engine = Engine::with_defaults();
    let state = engine.generate(&mut GameRng::new(seed));
    (engine, state)
}

// =============================================================================
// Mining
// =============================================================================

/// Digging dirt next to spawn costs the mining fee and keeps the pickaxe.
#[test]
fn test_dig_dirt_below_spawn() {
    let (engine, mut state) = fresh(1);
    let below = Position::new(10, 5);
    state.grid.set(below, Tile::new(TileKind::Dirt));

    let t = engine.move_player(&state, Direction::Down);

    assert!(!t.is_rejected());
    assert_eq!(t.state.player, below);
    assert_eq!(t.state.grid.kind_at(below), Some(TileKind::Empty));
    assert_eq!(t.state.money, state.money - 1);
    assert_eq!(t.state.inventory.quantity(ItemKind::Pickaxe), 1);
    assert!(!t.state.is_above_ground);
}

/// Off the shaft, the ground row can be dug straight down for the mining
/// fee alone. Only a ride down the shaft pays the elevator fare.
#[test]
fn test_descent_off_shaft_pays_no_fare() {
    let (engine, mut state) = fresh(9);
    state.grid.set(Position::new(10, 5), Tile::new(TileKind::Dirt));

    let dug = engine.move_player(&state, Direction::Down);
    assert_eq!(dug.state.player, Position::new(10, 5));
    assert_eq!(dug.state.money, state.money - 1);
    assert!(!dug.events.iter().any(|e| matches!(e, GameEvent::ElevatorRide { .. })));
    assert_eq!(dug.state.elevator, state.elevator);

    let mut at_shaft = state.clone();
    at_shaft.player = Position::new(14, 4);
    let ride = engine.move_player(&at_shaft, Direction::Down);
    assert_eq!(ride.state.player, Position::new(14, 5));
    assert_eq!(ride.state.money, state.money - 5);
    assert!(ride.events.iter().any(|e| matches!(e, GameEvent::ElevatorRide { .. })));
}

/// Mining gold adds it to the inventory and the score.
#[test]
fn test_mine_gold() {
    let (engine, mut state) = fresh(2);
    let gold = Position::new(10, 5);
    state.grid.set(gold, Tile::new(TileKind::Gold));

    let t = engine.move_player(&state, Direction::Down);

    assert_eq!(t.state.inventory.quantity(ItemKind::Gold), 1);
    assert_eq!(t.state.inventory.entry(ItemKind::Gold).map(|e| e.unit_value), Some(50));
    assert_eq!(t.state.score, 50);
    assert_eq!(t.state.last_mined_mineral.map(|m| (m.position, m.kind)), Some((gold, TileKind::Gold)));
    assert_eq!(t.state.grid.kind_at(gold), Some(TileKind::Empty));
    assert_eq!(
        t.events.iter().filter_map(GameEvent::sound_cue).count(),
        1,
        "one collect sound"
    );
}

/// A second gold merges into the existing entry.
#[test]
fn test_mine_two_gold() {
    let (engine, mut state) = fresh(3);
    state.grid.set(Position::new(10, 5), Tile::new(TileKind::Gold));
    state.grid.set(Position::new(10, 6), Tile::new(TileKind::Gold));

    let t = engine.move_player(&state, Direction::Down);
    let t = engine.move_player(&t.state, Direction::Down);

    assert_eq!(t.state.inventory.quantity(ItemKind::Gold), 2);
    assert_eq!(t.state.score, 100);
    assert_eq!(t.state.money, state.money - 2);
}

/// Mining a mineral without money leaves everything but the log alone.
#[test]
fn test_mine_without_money() {
    let (engine, mut state) = fresh(4);
    let target = Position::new(10, 5);
    state.grid.set(target, Tile::new(TileKind::Platinum).discovered());
    state.money = 0;

    let t = engine.move_player(&state, Direction::Down);

    assert!(matches!(t.rejection, Some(Rejection::InsufficientFunds { needed: 1, .. })));
    assert_eq!(t.state.grid, state.grid);
    assert_eq!(t.state.inventory, state.inventory);
    assert_eq!(t.state.money, 0);
    assert_eq!(t.state.player, state.player);
    assert_eq!(t.state.messages.latest(), Some("Not enough money for mining! Need $1."));
}

/// Without a pickaxe dirt is impassable.
#[test]
fn test_dirt_needs_pickaxe() {
    let (engine, mut state) = fresh(5);
    state.inventory.remove(ItemKind::Pickaxe, 1);
    state.grid.set(Position::new(10, 5), Tile::new(TileKind::Dirt));

    let t = engine.move_player(&state, Direction::Down);

    assert_eq!(t.rejection, Some(Rejection::NeedPickaxe));
    assert_eq!(t.state.player, state.player);
    assert_eq!(t.events.as_slice(), &[GameEvent::Blocked { reason: Rejection::NeedPickaxe }]);
}

// =============================================================================
// Hazards on entry
// =============================================================================

/// A hit that drops health to zero ends the game and nothing else happens.
#[test]
fn test_drowning_blocks_the_rest_of_the_move() {
    let (engine, mut state) = fresh(6);
    state.health = 10;
    state.grid.set(Position::new(10, 5), Tile::water(100));

    let t = engine.move_player(&state, Direction::Down);

    assert!(t.state.game_over);
    assert!(t.state.health <= 0);
    assert_eq!(t.state.player, state.player);
    assert_eq!(t.state.money, state.money);
    assert_eq!(t.state.messages.latest(), Some("You drowned! Game over."));

    let after = engine.move_player(&t.state, Direction::Left);
    assert_eq!(after.state, t.state);
}

// =============================================================================
// Surface and elevator
// =============================================================================

/// The tool shop door opens the tool shop; walking off closes it.
#[test]
fn test_walk_into_tool_shop() {
    let (engine, state) = fresh(7);

    // Spawn (10, 4) -> facade (9, 4) -> door (8, 4)
    let t = engine.move_player(&state, Direction::Left);
    assert!(t.state.active_shop.is_none());
    assert_eq!(t.state.grid.kind_at(Position::new(9, 4)), Some(TileKind::Shop));

    let t = engine.move_player(&t.state, Direction::Left);
    assert_eq!(t.state.player, Position::new(8, 4));
    assert_eq!(t.state.active_shop.as_ref().map(|s| s.kind), Some(ShopKind::ToolShop));
    assert_eq!(t.events.as_slice(), &[GameEvent::ShopOpened { kind: ShopKind::ToolShop }]);

    let t = engine.move_player(&t.state, Direction::Right);
    assert!(t.state.active_shop.is_none());
}

/// The sky ceiling stops the player from climbing above the ground row.
#[test]
fn test_cannot_climb_into_sky() {
    let (engine, state) = fresh(8);

    let t = engine.move_player(&state, Direction::Up);

    assert_eq!(t.rejection, Some(Rejection::AboveSkyCeiling));
    assert_eq!(t.state.player, state.player);
    assert!(t.state.grid.get(Position::new(10, 3)).unwrap().discovered);
}

/// Riding the elevator down charges the fare once.
#[test]
fn test_elevator_round_trip() {
    let (engine, state) = fresh(9);

    let mut t = engine.move_player(&state, Direction::Right);
    for _ in 0..3 {
        t = engine.move_player(&t.state, Direction::Right);
    }
    assert_eq!(t.state.player, Position::new(14, 4));

    let down = engine.move_player(&t.state, Direction::Down);
    assert_eq!(down.state.player, Position::new(14, 5));
    assert_eq!(down.state.elevator.position, Position::new(14, 5));
    assert_eq!(down.state.money, state.money - 5);

    let mut deep = down;
    while deep.state.player.y < 23 {
        deep = engine.move_player(&deep.state, Direction::Down);
    }
    assert_eq!(deep.state.money, state.money - 5);

    // The shaft bottom is the last stop
    let floor = engine.move_player(&deep.state, Direction::Down);
    assert_eq!(floor.rejection, Some(Rejection::Wall));

    let mut up = deep;
    while up.state.player.y > 4 {
        up = engine.move_player(&up.state, Direction::Up);
    }
    assert!(up.state.is_above_ground);
    assert_eq!(up.state.money, state.money - 5);
}

/// Visibility follows discovery unless the debug flag is on.
#[test]
fn test_visibility_and_debug_flag() {
    let (engine, state) = fresh(10);
    let deep = Position::new(30, 20);

    assert!(state.is_visible(state.player));
    assert!(!state.is_visible(deep));

    let revealed = engine.toggle_show_all_blocks(&state).into_state();
    assert!(revealed.is_visible(deep));
    assert_eq!(revealed.grid, state.grid);
}
