//! Headless Crawl Runner
//!
//! Runs a scripted autoplay policy through the engine and outputs a JSON
//! summary, for balance checks and regression soak runs.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use undercroft::actions::Action;
use undercroft::ai::pathfinding;
use undercroft::command::Direction;
use undercroft::core::config::GameConfig;
use undercroft::core::types::{EntityId, GridPos};
use undercroft::engine::{Engine, StatBoost, TurnState};
use undercroft::entity::Consumable;

/// Headless Crawl Runner - scripted descent for balance checks
#[derive(Parser, Debug)]
#[command(name = "crawl_runner")]
#[command(about = "Run a scripted autoplay descent and output a run summary")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after reaching this floor
    #[arg(long, default_value_t = 4)]
    target_floor: u32,

    /// Maximum turns before timeout
    #[arg(long, default_value_t = 2000)]
    max_turns: u64,

    /// Optional TOML config file overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    outcome: String,
    seed: u64,
    turns: u64,
    floor_reached: u32,
    player_level: i32,
    player_hp: i32,
    player_max_hp: i32,
    messages: usize,
}

fn main() -> undercroft::core::error::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "undercroft=warn".into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = match &args.config {
        Some(path) => GameConfig::from_toml_file(path)?,
        None => GameConfig::default(),
    };

    let mut engine = Engine::new_game(config, seed)?;

    let outcome = loop {
        if engine.turns >= args.max_turns {
            break "timeout";
        }
        match engine.state {
            TurnState::PlayerDefeated => break "died",
            TurnState::LevelUp => {
                engine.apply_level_up(StatBoost::Health)?;
                continue;
            }
            TurnState::AwaitingInput => {}
        }
        if engine.current_floor > args.target_floor {
            break "descended";
        }

        let action = choose_action(&engine);
        let advanced = engine.handle_player_action(&action)?;
        if !advanced {
            // The policy picked a rejected action; burn the turn instead
            // of spinning on it.
            engine.handle_player_action(&Action::Wait)?;
        }
    };

    let parts = engine.actor(engine.player);
    let summary = RunSummary {
        outcome: outcome.into(),
        seed,
        turns: engine.turns,
        floor_reached: engine.current_floor,
        player_level: parts.level.current_level,
        player_hp: parts.fighter.hp(),
        player_max_hp: parts.fighter.max_hp,
        messages: engine.log.len(),
    };

    if args.format == "text" {
        println!(
            "{} after {} turns: floor {}, level {}, hp {}/{} (seed {})",
            summary.outcome,
            summary.turns,
            summary.floor_reached,
            summary.player_level,
            summary.player_hp,
            summary.player_max_hp,
            summary.seed,
        );
    } else {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

/// Fixed-priority policy: drink when hurt, fight adjacent enemies, loot,
/// descend, otherwise walk toward the stairs
fn choose_action(engine: &Engine) -> Action {
    let player_pos = engine.player_entity().pos;
    let parts = engine.actor(engine.player);

    // Drink a potion when below half health.
    if parts.fighter.hp() * 2 < parts.fighter.max_hp {
        if let Some(potion) = carried_healing_potion(engine) {
            return Action::UseItem {
                item: potion,
                target: None,
            };
        }
    }

    // Attack an adjacent living enemy.
    if let Some(enemy_pos) = nearest_adjacent_enemy(engine, player_pos) {
        return Action::Bump {
            dx: enemy_pos.x - player_pos.x,
            dy: enemy_pos.y - player_pos.y,
        };
    }

    // Grab whatever we are standing on.
    if engine.map.item_at(&engine.entities, player_pos).is_some() {
        return Action::Pickup;
    }

    if player_pos == engine.map.downstairs {
        return Action::TakeStairs;
    }

    // Walk toward the stairs.
    let path = pathfinding::path_to(
        &engine.map,
        &engine.entities,
        &engine.config,
        player_pos,
        engine.map.downstairs,
    );
    if let Some(&next) = path.first() {
        return Action::Bump {
            dx: next.x - player_pos.x,
            dy: next.y - player_pos.y,
        };
    }

    Action::Wait
}

fn nearest_adjacent_enemy(engine: &Engine, player_pos: GridPos) -> Option<GridPos> {
    Direction::ALL.iter().find_map(|direction| {
        let (dx, dy) = direction.delta();
        let pos = player_pos.offset(dx, dy);
        engine
            .map
            .actor_at(&engine.entities, pos)
            .filter(|&id| id != engine.player)
            .map(|_| pos)
    })
}

/// The first carried healing potion, if any
fn carried_healing_potion(engine: &Engine) -> Option<EntityId> {
    engine
        .actor(engine.player)
        .inventory
        .items
        .iter()
        .copied()
        .find(|&item| {
            matches!(
                engine.entities[item].as_item().and_then(|i| i.consumable),
                Some(Consumable::Healing { .. })
            )
        })
}
