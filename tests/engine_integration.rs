//! Engine integration tests: full games through the public API

use undercroft::actions::Action;
use undercroft::command::{self, Command, Direction};
use undercroft::core::config::GameConfig;
use undercroft::engine::{Engine, StatBoost, TurnState};

#[test]
fn test_new_game_setup() {
    let engine = Engine::new_game(GameConfig::default(), 12345).unwrap();

    // Player stands on a carved floor tile, lit by the initial FOV.
    let player_pos = engine.player_entity().pos;
    assert!(engine.map.is_walkable(player_pos));
    assert!(engine.map.is_visible(player_pos));
    assert!(engine.map.is_explored(player_pos));

    // Starting gear is carried and equipped silently.
    let parts = engine.actor(engine.player);
    assert_eq!(parts.inventory.items.len(), 2);
    assert!(parts.equipment.weapon.is_some());
    assert!(parts.equipment.armor.is_some());
    assert_eq!(parts.power(&engine.entities), 2 + 2);
    assert_eq!(parts.defense(&engine.entities), 1 + 1);

    // Exactly one message: the welcome line.
    assert_eq!(engine.log.len(), 1);
    assert_eq!(
        engine.log.messages()[0].text,
        "Hello and welcome, adventurer, to yet another dungeon!"
    );

    assert_eq!(engine.current_floor, 1);
    assert_eq!(engine.state, TurnState::AwaitingInput);
}

#[test]
fn test_same_seed_is_deterministic() {
    let a = Engine::new_game(GameConfig::default(), 777).unwrap();
    let b = Engine::new_game(GameConfig::default(), 777).unwrap();

    assert_eq!(a.player_entity().pos, b.player_entity().pos);
    assert_eq!(a.map.downstairs, b.map.downstairs);
    assert_eq!(a.entities.count(), b.entities.count());
}

#[test]
fn test_explored_grows_monotonically_over_turns() {
    let mut engine = Engine::new_game(GameConfig::default(), 99).unwrap();

    let explored_count = |engine: &Engine| {
        let mut count = 0;
        for y in 0..engine.map.height {
            for x in 0..engine.map.width {
                if engine.map.is_explored(undercroft::core::types::GridPos::new(x, y)) {
                    count += 1;
                }
            }
        }
        count
    };

    let mut previous = explored_count(&engine);
    assert!(previous > 0);

    // Wander with bumps in a fixed pattern; explored never shrinks.
    for direction in [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
        Direction::East,
        Direction::East,
        Direction::South,
        Direction::South,
    ] {
        if engine.state != TurnState::AwaitingInput {
            break;
        }
        let action = command::decode(&engine, Command::Move(direction)).unwrap();
        engine.handle_player_action(&action).unwrap();

        let current = explored_count(&engine);
        assert!(current >= previous);
        previous = current;
    }
}

#[test]
fn test_waiting_out_many_turns_keeps_invariants() {
    let mut engine = Engine::new_game(GameConfig::default(), 4242).unwrap();

    for _ in 0..60 {
        match engine.state {
            TurnState::AwaitingInput => {
                engine.handle_player_action(&Action::Wait).unwrap();
            }
            TurnState::LevelUp => engine.apply_level_up(StatBoost::Health).unwrap(),
            TurnState::PlayerDefeated => break,
        }

        let fighter = &engine.actor(engine.player).fighter;
        assert!(fighter.hp() >= 0);
        assert!(fighter.hp() <= fighter.max_hp);
    }

    // Turn counter only advances on successful actions.
    assert!(engine.turns <= 60);
}

#[test]
fn test_save_and_load_roundtrip_on_disk() {
    let mut engine = Engine::new_game(GameConfig::default(), 31337).unwrap();
    engine.handle_player_action(&Action::Wait).unwrap();

    let path = std::env::temp_dir().join("undercroft_roundtrip_test.json");
    engine.save_to(&path).unwrap();
    let restored = Engine::load_from(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(restored.turns, engine.turns);
    assert_eq!(restored.current_floor, engine.current_floor);
    assert_eq!(restored.player_entity().pos, engine.player_entity().pos);
    assert_eq!(restored.entities.count(), engine.entities.count());
    assert_eq!(restored.log.len(), engine.log.len());
}

#[test]
fn test_loaded_game_replays_identically() {
    // The rng state rides along in the snapshot, so a restored game makes
    // the same decisions as the original.
    let mut engine = Engine::new_game(GameConfig::default(), 2024).unwrap();
    for _ in 0..5 {
        engine.handle_player_action(&Action::Wait).unwrap();
    }

    let json = serde_json::to_string(&engine).unwrap();
    let mut restored: Engine = serde_json::from_str(&json).unwrap();

    for _ in 0..10 {
        if engine.state != TurnState::AwaitingInput || restored.state != TurnState::AwaitingInput {
            break;
        }
        engine.handle_player_action(&Action::Wait).unwrap();
        restored.handle_player_action(&Action::Wait).unwrap();

        assert_eq!(
            engine.actor(engine.player).fighter.hp(),
            restored.actor(restored.player).fighter.hp()
        );
        assert_eq!(engine.log.len(), restored.log.len());
    }
}

#[test]
fn test_config_rejected_at_new_game() {
    let config = GameConfig {
        room_min_size: 2,
        ..Default::default()
    };
    assert!(Engine::new_game(config, 1).is_err());
}
