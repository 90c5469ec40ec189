//! Inventory, equipment, and consumable actions

use crate::ai::Ai;
use crate::core::error::{GameError, Result};
use crate::core::types::{EntityId, GridPos};
use crate::engine::Engine;
use crate::entity::{self, Consumable};
use crate::log::colors;

/// Pick up the item sharing the actor's tile, if any
pub fn pickup(engine: &mut Engine, actor: EntityId) -> Result<()> {
    let pos = engine.entities[actor].pos;
    let Some(item) = engine.map.item_at(&engine.entities, pos) else {
        return Err(GameError::impossible("There is nothing here to pick up."));
    };

    if engine.actor(actor).inventory.is_full() {
        return Err(GameError::impossible("Your inventory is full."));
    }

    // Single ownership transfer: off the map, into the inventory.
    engine.map.take_entity(item);
    engine.actor_mut(actor).inventory.items.push(item);

    let name = engine.entities[item].name.clone();
    engine.log.add(format!("You picked up the {name}!"), colors::WHITE);
    Ok(())
}

/// Return a carried item to the map at the actor's position
pub fn drop_item(engine: &mut Engine, actor: EntityId, item: EntityId) -> Result<()> {
    if engine.actor(actor).equipment.is_equipped(item) {
        toggle_equip(engine, actor, item)?;
    }

    if !engine.actor_mut(actor).inventory.remove(item) {
        // Dropping an item that is not carried is a programming error, not
        // a player-facing rejection.
        return Err(GameError::EntityNotFound(item));
    }

    let pos = engine.entities[actor].pos;
    entity::place(&mut engine.entities, &mut engine.map, item, pos);

    let name = engine.entities[item].name.clone();
    engine.log.add(format!("You dropped the {name}"), colors::WHITE);
    Ok(())
}

/// Equip the item into its slot, or unequip it if already there
///
/// An item already occupying the slot is unequipped first with its own
/// message.
pub fn toggle_equip(engine: &mut Engine, actor: EntityId, item: EntityId) -> Result<()> {
    let Some(equippable) = engine.entities[item].as_item().and_then(|i| i.equippable) else {
        let name = &engine.entities[item].name;
        return Err(GameError::impossible(format!("The {name} cannot be equipped.")));
    };
    debug_assert!(engine.actor(actor).inventory.contains(item));

    let slot = equippable.slot;
    let item_name = engine.entities[item].name.clone();
    let current = engine.actor(actor).equipment.slot(slot);

    if current == Some(item) {
        engine.actor_mut(actor).equipment.set_slot(slot, None);
        engine.log.add(format!("You remove the {item_name}."), colors::WHITE);
    } else {
        if let Some(displaced) = current {
            let displaced_name = engine.entities[displaced].name.clone();
            engine.actor_mut(actor).equipment.set_slot(slot, None);
            engine
                .log
                .add(format!("You remove the {displaced_name}."), colors::WHITE);
        }
        engine.actor_mut(actor).equipment.set_slot(slot, Some(item));
        engine.log.add(format!("You equip the {item_name}."), colors::WHITE);
    }

    Ok(())
}

/// Apply a consumable item's effect
///
/// The target defaults to the actor's own tile. Each effect validates its
/// target before touching any state, then applies and consumes the item
/// exactly once.
pub fn use_item(
    engine: &mut Engine,
    actor: EntityId,
    item: EntityId,
    target: Option<GridPos>,
) -> Result<()> {
    let target_pos = target.unwrap_or(engine.entities[actor].pos);
    let Some(consumable) = engine.entities[item].as_item().and_then(|i| i.consumable) else {
        let name = &engine.entities[item].name;
        return Err(GameError::impossible(format!("The {name} cannot be used.")));
    };

    match consumable {
        Consumable::Healing { amount } => heal(engine, actor, item, amount),
        Consumable::Confusion { turns } => confuse(engine, actor, item, target_pos, turns),
        Consumable::Lightning {
            damage,
            maximum_range,
        } => lightning(engine, actor, item, damage, maximum_range),
        Consumable::Fireball { damage, radius } => {
            fireball(engine, actor, item, target_pos, damage, radius)
        }
    }
}

fn heal(engine: &mut Engine, actor: EntityId, item: EntityId, amount: i32) -> Result<()> {
    let recovered = engine.actor_mut(actor).fighter.heal(amount);
    if recovered == 0 {
        return Err(GameError::impossible("Your health is already full."));
    }

    let name = engine.entities[item].name.clone();
    engine.log.add(
        format!("You consume the {name}, and recover {recovered} HP!"),
        colors::HEALTH_RECOVERED,
    );
    consume(engine, actor, item);
    Ok(())
}

fn confuse(
    engine: &mut Engine,
    actor: EntityId,
    item: EntityId,
    target_pos: GridPos,
    turns: u32,
) -> Result<()> {
    if !engine.map.is_visible(target_pos) {
        return Err(GameError::impossible(
            "You cannot target an area that you cannot see.",
        ));
    }
    let Some(target) = engine.map.actor_at(&engine.entities, target_pos) else {
        return Err(GameError::impossible("You must select an enemy to target"));
    };
    if target == actor {
        return Err(GameError::impossible("You cannot confuse yourself!"));
    }

    let target_name = engine.entities[target].name.clone();
    engine.log.add(
        format!("The eyes of the {target_name} look vacant, as it starts to stumble around!"),
        colors::STATUS_EFFECT_APPLIED,
    );

    let parts = engine.actor_mut(target);
    let previous = parts.ai.take().expect("living actor has an AI");
    parts.ai = Some(Ai::confused(previous, turns));

    consume(engine, actor, item);
    Ok(())
}

fn lightning(
    engine: &mut Engine,
    actor: EntityId,
    item: EntityId,
    damage: i32,
    maximum_range: i32,
) -> Result<()> {
    let my_pos = engine.entities[actor].pos;

    // Nearest visible hostile within range; ties keep the earliest entity
    // in placement order.
    let mut target = None;
    let mut closest_distance = maximum_range as f32 + 1.0;
    for &id in &engine.map.entities {
        if id == actor {
            continue;
        }
        let entity = &engine.entities[id];
        if entity.is_alive() && engine.map.is_visible(entity.pos) {
            let distance = my_pos.distance(entity.pos);
            if distance < closest_distance {
                target = Some(id);
                closest_distance = distance;
            }
        }
    }

    let Some(target) = target else {
        return Err(GameError::impossible("No enemy is close enough to strike."));
    };

    let target_name = engine.entities[target].name.clone();
    engine.log.add(
        format!("A lightning bolt strikes the {target_name} with a loud thunder, for {damage} damage!"),
        colors::WHITE,
    );
    // Lightning ignores defense.
    engine.apply_damage(target, damage);
    consume(engine, actor, item);
    Ok(())
}

fn fireball(
    engine: &mut Engine,
    actor: EntityId,
    item: EntityId,
    target_pos: GridPos,
    damage: i32,
    radius: i32,
) -> Result<()> {
    if !engine.map.is_visible(target_pos) {
        return Err(GameError::impossible(
            "You cannot target an area that you cannot see.",
        ));
    }

    // Everyone inside the blast, the consumer included.
    let hits: Vec<EntityId> = engine
        .map
        .living_actors(&engine.entities)
        .into_iter()
        .filter(|&id| engine.entities[id].distance(target_pos) <= radius as f32)
        .collect();

    if hits.is_empty() {
        return Err(GameError::impossible("There are no targets in the radius."));
    }

    for id in hits {
        let name = engine.entities[id].name.clone();
        engine.log.add(
            format!("The {name} is engulfed in a fiery explosion, taking {damage} damage!"),
            colors::WHITE,
        );
        engine.apply_damage(id, damage);
    }
    consume(engine, actor, item);
    Ok(())
}

/// Remove the spent item from the consumer's inventory and destroy it
fn consume(engine: &mut Engine, actor: EntityId, item: EntityId) {
    engine.actor_mut(actor).inventory.remove(item);
    engine.entities.remove(item);
}
