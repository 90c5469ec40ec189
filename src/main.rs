//! Undercroft - Entry Point
//!
//! Interactive text client for the dungeon simulation: reads commands from
//! stdin, feeds them through the engine, and prints the visible map, player
//! status, and recent messages after every turn.

use std::io::{self, Write};
use std::path::Path;

use undercroft::command::{self, Command, Direction};
use undercroft::core::error::Result;
use undercroft::core::types::GridPos;
use undercroft::engine::{Engine, StatBoost, TurnState};

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "undercroft=info".into()),
        )
        .init();

    let seed: u64 = rand::random();
    let mut engine = Engine::new_game(Default::default(), seed)?;

    println!("\n=== UNDERCROFT ===");
    println!("A turn-based dungeon crawl. Descend as far as you can.");
    println!();
    print_help();

    loop {
        render(&engine);

        match engine.state {
            TurnState::PlayerDefeated => {
                println!("You have fallen. 'load <file>' to restore, 'q' to quit.");
            }
            TurnState::LevelUp => {
                println!("Level up! Choose: (a) vitality  (b) strength  (c) agility");
            }
            TurnState::AwaitingInput => {}
        }

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if engine.state == TurnState::LevelUp {
            let boost = match input {
                "a" => Some(StatBoost::Health),
                "b" => Some(StatBoost::Power),
                "c" => Some(StatBoost::Defense),
                _ => None,
            };
            match boost {
                Some(boost) => engine.apply_level_up(boost)?,
                None => println!("Pick a, b, or c."),
            }
            continue;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.as_slice() {
            ["q"] | ["quit"] => break,
            ["?"] | ["help"] => print_help(),
            ["i"] | ["inv"] => print_inventory(&engine),
            ["save", path] => match engine.save_to(Path::new(path)) {
                Ok(()) => println!("Saved to {path}."),
                Err(err) => println!("Save failed: {err}"),
            },
            ["load", path] => match Engine::load_from(Path::new(path)) {
                Ok(loaded) => {
                    engine = loaded;
                    println!("Restored from {path}.");
                }
                Err(err) => println!("Load failed: {err}"),
            },
            _ => match parse_command(parts.as_slice()) {
                Some(cmd) => match command::decode(&engine, cmd) {
                    Some(action) => {
                        engine.handle_player_action(&action)?;
                    }
                    None => println!("Invalid entry."),
                },
                None => println!("Unknown command; '?' for help."),
            },
        }
    }

    Ok(())
}

fn parse_command(parts: &[&str]) -> Option<Command> {
    let direction = |word: &str| -> Option<Direction> {
        match word {
            "n" => Some(Direction::North),
            "s" => Some(Direction::South),
            "e" => Some(Direction::East),
            "w" => Some(Direction::West),
            "ne" => Some(Direction::NorthEast),
            "nw" => Some(Direction::NorthWest),
            "se" => Some(Direction::SouthEast),
            "sw" => Some(Direction::SouthWest),
            _ => None,
        }
    };

    match parts {
        [word] if direction(word).is_some() => Some(Command::Move(direction(word)?)),
        ["."] | ["wait"] => Some(Command::Wait),
        ["g"] | ["get"] => Some(Command::Pickup),
        [">"] | ["down"] => Some(Command::TakeStairs),
        ["drop", slot] => slot.parse().ok().map(|slot| Command::Drop { slot }),
        ["use", slot] => slot.parse().ok().map(|slot| Command::Use {
            slot,
            target: None,
        }),
        ["use", slot, x, y] => {
            let slot = slot.parse().ok()?;
            let target = GridPos::new(x.parse().ok()?, y.parse().ok()?);
            Some(Command::Use {
                slot,
                target: Some(target),
            })
        }
        _ => None,
    }
}

fn print_help() {
    println!("Commands:");
    println!("  n s e w ne nw se sw  - move or attack");
    println!("  . / wait             - pass the turn");
    println!("  g / get              - pick up an item");
    println!("  > / down             - descend the stairs");
    println!("  i / inv              - list inventory");
    println!("  use <slot> [x y]     - use or equip an item, with optional target");
    println!("  drop <slot>          - drop an item");
    println!("  save <file> / load <file>");
    println!("  q / quit");
    println!();
}

fn print_inventory(engine: &Engine) {
    let parts = engine.actor(engine.player);
    if parts.inventory.items.is_empty() {
        println!("You are carrying nothing.");
        return;
    }
    for (slot, &item) in parts.inventory.items.iter().enumerate() {
        let marker = if parts.equipment.is_equipped(item) {
            " (equipped)"
        } else {
            ""
        };
        println!("  [{slot}] {}{marker}", engine.entities[item].name);
    }
}

/// Draw the visible map, one character per tile, entities on top
fn render(engine: &Engine) {
    let map = &engine.map;
    let mut grid: Vec<Vec<char>> = (0..map.height)
        .map(|y| {
            (0..map.width)
                .map(|x| {
                    let pos = GridPos::new(x, y);
                    let tile = map.tile(pos);
                    if map.is_visible(pos) {
                        glyph_or_default(tile.light.ch, tile.walkable)
                    } else if map.is_explored(pos) {
                        glyph_or_default(tile.dark.ch, tile.walkable)
                    } else {
                        ' '
                    }
                })
                .collect()
        })
        .collect();

    for id in map.render_sorted(&engine.entities) {
        let entity = &engine.entities[id];
        if map.is_visible(entity.pos) {
            grid[entity.pos.y as usize][entity.pos.x as usize] = entity.glyph;
        }
    }

    println!();
    for row in grid {
        println!("{}", row.into_iter().collect::<String>());
    }

    let parts = engine.actor(engine.player);
    println!(
        "HP {}/{}  Floor {}  Level {}  XP {}/{}",
        parts.fighter.hp(),
        parts.fighter.max_hp,
        engine.current_floor,
        parts.level.current_level,
        parts.level.current_xp,
        parts.level.experience_to_next_level(),
    );
    for message in engine.log.recent(5) {
        println!("  {}", message.full_text());
    }
}

/// Tiles carry space glyphs with background colors; fall back to ascii for
/// a plain terminal
fn glyph_or_default(ch: char, walkable: bool) -> char {
    if ch != ' ' {
        ch
    } else if walkable {
        '.'
    } else {
        '#'
    }
}
