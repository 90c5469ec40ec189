//! Decoded player input
//!
//! Frontends translate raw device events into [`Command`]s; this module
//! resolves them into [`Action`]s against current engine state. The
//! simulation itself never sees raw input.

use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::core::types::GridPos;
use crate::engine::Engine;

/// One of the eight grid directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::West,
        Direction::East,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::NorthWest => (-1, -1),
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::SouthWest => (-1, 1),
            Direction::South => (0, 1),
            Direction::SouthEast => (1, 1),
        }
    }
}

/// A decoded player intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Move or attack in a direction
    Move(Direction),
    Wait,
    Pickup,
    TakeStairs,
    /// Drop the inventory item at this slot
    Drop { slot: usize },
    /// Use or equip the inventory item at this slot, with an optional
    /// ground target for targeted consumables
    Use { slot: usize, target: Option<GridPos> },
}

/// Resolve a command into an action against the player's current state
///
/// Returns `None` when the command references an inventory slot that does
/// not exist; frontends surface that as an invalid entry rather than an
/// in-game event.
pub fn decode(engine: &Engine, command: Command) -> Option<Action> {
    match command {
        Command::Move(direction) => {
            let (dx, dy) = direction.delta();
            Some(Action::Bump { dx, dy })
        }
        Command::Wait => Some(Action::Wait),
        Command::Pickup => Some(Action::Pickup),
        Command::TakeStairs => Some(Action::TakeStairs),
        Command::Drop { slot } => {
            let item = *engine.actor(engine.player).inventory.items.get(slot)?;
            Some(Action::Drop { item })
        }
        Command::Use { slot, target } => {
            let item = *engine.actor(engine.player).inventory.items.get(slot)?;
            let parts = engine.entities[item].as_item()?;
            // Consumables are used; pure equipment toggles instead.
            if parts.consumable.is_none() && parts.equippable.is_some() {
                Some(Action::ToggleEquip { item })
            } else {
                Some(Action::UseItem { item, target })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_directions_are_unit_steps() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            assert!(dx.abs() <= 1 && dy.abs() <= 1);
            assert!((dx, dy) != (0, 0));
        }
    }

    #[test]
    fn test_decode_against_engine() {
        let engine = crate::engine::Engine::new_game(Default::default(), 3).unwrap();

        assert_eq!(
            decode(&engine, Command::Move(Direction::East)),
            Some(Action::Bump { dx: 1, dy: 0 })
        );
        assert_eq!(decode(&engine, Command::Wait), Some(Action::Wait));

        // Starting gear: slot 0 is the dagger, equipment rather than a
        // consumable, so "use" toggles it.
        let dagger = engine.actor(engine.player).inventory.items[0];
        assert_eq!(
            decode(&engine, Command::Use { slot: 0, target: None }),
            Some(Action::ToggleEquip { item: dagger })
        );

        // Out-of-range slots are an input error, not a game event.
        assert_eq!(decode(&engine, Command::Drop { slot: 99 }), None);
    }
}
