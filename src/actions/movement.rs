//! Movement and melee actions

use crate::actions::capitalize;
use crate::core::error::{GameError, Result};
use crate::core::types::EntityId;
use crate::engine::Engine;
use crate::log::colors;

/// Step one tile in the given direction
pub fn move_actor(engine: &mut Engine, actor: EntityId, dx: i32, dy: i32) -> Result<()> {
    let dest = engine.entities[actor].pos.offset(dx, dy);

    if !engine.map.is_walkable(dest) {
        // Out of bounds or blocked by a tile.
        return Err(GameError::impossible("That way is blocked."));
    }
    if engine.map.blocking_entity_at(&engine.entities, dest).is_some() {
        // Blocked by an entity.
        return Err(GameError::impossible("That way is blocked."));
    }

    engine.entities[actor].pos = dest;
    Ok(())
}

/// Attack the actor one tile away
///
/// Dealing zero damage is not a failure: the message differs but the turn
/// is consumed either way.
pub fn melee(engine: &mut Engine, actor: EntityId, dx: i32, dy: i32) -> Result<()> {
    let dest = engine.entities[actor].pos.offset(dx, dy);
    let Some(target) = engine.map.actor_at(&engine.entities, dest) else {
        return Err(GameError::impossible("Nothing to attack"));
    };

    let damage =
        engine.actor(actor).power(&engine.entities) - engine.actor(target).defense(&engine.entities);

    let attack_desc = format!(
        "{} attacks {}",
        capitalize(&engine.entities[actor].name),
        engine.entities[target].name
    );
    let attack_color = if actor == engine.player {
        colors::PLAYER_ATK
    } else {
        colors::ENEMY_ATK
    };

    if damage > 0 {
        engine
            .log
            .add(format!("{attack_desc} for {damage} hit points."), attack_color);
        engine.apply_damage(target, damage);
    } else {
        engine
            .log
            .add(format!("{attack_desc} but does no damage."), attack_color);
    }

    Ok(())
}

/// The standard move-or-attack compound: melee if an actor occupies the
/// destination, otherwise move
pub fn bump(engine: &mut Engine, actor: EntityId, dx: i32, dy: i32) -> Result<()> {
    let dest = engine.entities[actor].pos.offset(dx, dy);
    if engine.map.actor_at(&engine.entities, dest).is_some() {
        melee(engine, actor, dx, dy)
    } else {
        move_actor(engine, actor, dx, dy)
    }
}
