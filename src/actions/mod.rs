//! The action system
//!
//! Every state change in a turn goes through exactly one [`Action`]. An
//! action is validated and applied in a single [`perform`] call: on failure
//! it returns [`GameError::Impossible`] with a player-facing reason and has
//! made no changes; on success the turn is consumed.

pub mod item;
pub mod movement;

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::core::types::{EntityId, GridPos};
use crate::engine::Engine;
use crate::log::colors;

/// One unit of game state change, bound to a performing actor at dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Do nothing; still consumes the turn
    Wait,
    /// Step one tile; fails on walls, bounds, and blocking entities
    Move { dx: i32, dy: i32 },
    /// Attack the actor one tile away; fails if no actor is there
    Melee { dx: i32, dy: i32 },
    /// Melee if an actor occupies the destination, otherwise Move
    Bump { dx: i32, dy: i32 },
    /// Pick up an item sharing the actor's tile
    Pickup,
    /// Move a carried item back to the map, unequipping it first if needed
    Drop { item: EntityId },
    /// Equip the item, or unequip it if it already occupies its slot
    ToggleEquip { item: EntityId },
    /// Apply the item's consumable effect; target defaults to the actor's
    /// own tile
    UseItem {
        item: EntityId,
        target: Option<GridPos>,
    },
    /// Descend; fails unless standing on the downstairs tile
    TakeStairs,
}

/// Validate and apply `action` for `actor`
pub fn perform(engine: &mut Engine, actor: EntityId, action: &Action) -> Result<()> {
    match *action {
        Action::Wait => Ok(()),
        Action::Move { dx, dy } => movement::move_actor(engine, actor, dx, dy),
        Action::Melee { dx, dy } => movement::melee(engine, actor, dx, dy),
        Action::Bump { dx, dy } => movement::bump(engine, actor, dx, dy),
        Action::Pickup => item::pickup(engine, actor),
        Action::Drop { item } => item::drop_item(engine, actor, item),
        Action::ToggleEquip { item } => item::toggle_equip(engine, actor, item),
        Action::UseItem { item, target } => item::use_item(engine, actor, item, target),
        Action::TakeStairs => take_stairs(engine, actor),
    }
}

fn take_stairs(engine: &mut Engine, actor: EntityId) -> Result<()> {
    if engine.entities[actor].pos != engine.map.downstairs {
        return Err(GameError::impossible("There are no stairs here."));
    }

    engine.descend();
    engine.log.add("You descend the staircase.", colors::DESCEND);
    Ok(())
}

/// Uppercase the first character, for sentence-initial entity names
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
