//! Entities and their capability components
//!
//! Every placed object is an [`Entity`] living in the [`Entities`] arena and
//! referenced by a stable [`EntityId`]. Containers (the map, inventories)
//! store ids, never entity values, so moving an entity between containers is
//! a single id transfer.

pub mod equipment;
pub mod fighter;
pub mod inventory;
pub mod item;
pub mod level;

pub use equipment::Equipment;
pub use fighter::Fighter;
pub use inventory::Inventory;
pub use item::{Consumable, EquipSlot, Equippable};
pub use level::Level;

use serde::{Deserialize, Serialize};

use crate::ai::Ai;
use crate::core::types::{Color, EntityId, GridPos};

/// Draw ordering rank: corpses under items under actors
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum RenderOrder {
    #[default]
    Corpse,
    Item,
    Actor,
}

/// Capability data for an entity that can act and fight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorParts {
    pub fighter: Fighter,
    pub inventory: Inventory,
    pub equipment: Equipment,
    pub level: Level,
    /// Behavior driving this actor. `None` means the actor is dead and the
    /// entity persists only as an inert corpse.
    pub ai: Option<Ai>,
}

impl ActorParts {
    /// Effective power: base plus equipment bonuses
    pub fn power(&self, entities: &Entities) -> i32 {
        self.fighter.base_power + self.equipment.power_bonus(entities)
    }

    /// Effective defense: base plus equipment bonuses
    pub fn defense(&self, entities: &Entities) -> i32 {
        self.fighter.base_defense + self.equipment.defense_bonus(entities)
    }
}

/// Capability data for an entity that can be carried and used
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemParts {
    pub consumable: Option<Consumable>,
    pub equippable: Option<Equippable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntityKind {
    Actor(ActorParts),
    Item(ItemParts),
}

/// A placed object: player, monster, corpse, or item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub pos: GridPos,
    pub glyph: char,
    pub color: Color,
    pub name: String,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub kind: EntityKind,
}

impl Entity {
    pub fn is_actor(&self) -> bool {
        matches!(self.kind, EntityKind::Actor(_))
    }

    pub fn is_item(&self) -> bool {
        matches!(self.kind, EntityKind::Item(_))
    }

    /// An actor is alive exactly while it has an AI attached
    pub fn is_alive(&self) -> bool {
        matches!(&self.kind, EntityKind::Actor(actor) if actor.ai.is_some())
    }

    pub fn as_actor(&self) -> Option<&ActorParts> {
        match &self.kind {
            EntityKind::Actor(actor) => Some(actor),
            EntityKind::Item(_) => None,
        }
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut ActorParts> {
        match &mut self.kind {
            EntityKind::Actor(actor) => Some(actor),
            EntityKind::Item(_) => None,
        }
    }

    pub fn as_item(&self) -> Option<&ItemParts> {
        match &self.kind {
            EntityKind::Item(item) => Some(item),
            EntityKind::Actor(_) => None,
        }
    }

    /// Euclidean distance from this entity to a grid position
    pub fn distance(&self, pos: GridPos) -> f32 {
        self.pos.distance(pos)
    }
}

/// Arena owning every entity, indexed by stable id
///
/// Ids are allocated monotonically and never reused, so references held by
/// inventories and equipment slots stay valid for the life of the arena.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entities {
    slots: Vec<Option<Entity>>,
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity and return its freshly allocated id
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.slots.len() as u32);
        self.slots.push(Some(entity));
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(id.index()).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots.get_mut(id.index()).and_then(|slot| slot.as_mut())
    }

    /// Remove an entity from the arena, destroying it
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.slots.get_mut(id.index()).and_then(|slot| slot.take())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate live entities in id order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|e| (EntityId(i as u32), e)))
    }

    /// Drop every entity not accepted by the predicate
    pub fn retain(&mut self, mut keep: impl FnMut(EntityId, &Entity) -> bool) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if let Some(entity) = slot {
                if !keep(EntityId(i as u32), entity) {
                    *slot = None;
                }
            }
        }
    }

    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Deep-copy a template into the arena and place the clone on a map
pub fn spawn(
    entities: &mut Entities,
    map: &mut crate::world::map::GameMap,
    template: &Entity,
    pos: GridPos,
) -> EntityId {
    let mut entity = template.clone();
    entity.pos = pos;
    let id = entities.insert(entity);
    map.place_entity(id);
    id
}

/// Relocate an entity, adding it to `map`'s entity set if absent
///
/// Cross-map transfers happen only at floor transitions, where the old map
/// is discarded wholesale, so there is no stale set to remove from.
pub fn place(
    entities: &mut Entities,
    map: &mut crate::world::map::GameMap,
    id: EntityId,
    pos: GridPos,
) {
    entities[id].pos = pos;
    map.place_entity(id);
}

impl std::ops::Index<EntityId> for Entities {
    type Output = Entity;

    fn index(&self, id: EntityId) -> &Entity {
        self.get(id).expect("entity id not present in arena")
    }
}

impl std::ops::IndexMut<EntityId> for Entities {
    fn index_mut(&mut self, id: EntityId) -> &mut Entity {
        self.get_mut(id).expect("entity id not present in arena")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::colors;

    fn bare_item(name: &str) -> Entity {
        Entity {
            pos: GridPos::new(0, 0),
            glyph: '!',
            color: colors::WHITE,
            name: name.into(),
            blocks_movement: false,
            render_order: RenderOrder::Item,
            kind: EntityKind::Item(ItemParts::default()),
        }
    }

    #[test]
    fn test_arena_ids_are_stable_after_removal() {
        let mut entities = Entities::new();
        let a = entities.insert(bare_item("a"));
        let b = entities.insert(bare_item("b"));
        let c = entities.insert(bare_item("c"));

        entities.remove(b);

        assert_eq!(entities[a].name, "a");
        assert_eq!(entities[c].name, "c");
        assert!(entities.get(b).is_none());
        assert_eq!(entities.count(), 2);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut entities = Entities::new();
        let a = entities.insert(bare_item("a"));
        entities.remove(a);
        let b = entities.insert(bare_item("b"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_iter_is_in_id_order() {
        let mut entities = Entities::new();
        entities.insert(bare_item("a"));
        entities.insert(bare_item("b"));
        let names: Vec<_> = entities.iter().map(|(_, e)| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_spawn_deep_copies_template() {
        let mut entities = Entities::new();
        let mut map = crate::world::map::GameMap::new(10, 10);
        let template = bare_item("potion");

        let a = spawn(&mut entities, &mut map, &template, GridPos::new(2, 2));
        let b = spawn(&mut entities, &mut map, &template, GridPos::new(3, 3));

        assert_ne!(a, b);
        assert_eq!(entities[a].pos, GridPos::new(2, 2));
        assert_eq!(entities[b].pos, GridPos::new(3, 3));
        // The template itself is untouched.
        assert_eq!(template.pos, GridPos::new(0, 0));
        assert_eq!(map.entities, vec![a, b]);
    }

    #[test]
    fn test_place_moves_and_registers() {
        let mut entities = Entities::new();
        let mut map = crate::world::map::GameMap::new(10, 10);
        let id = entities.insert(bare_item("torch"));

        place(&mut entities, &mut map, id, GridPos::new(4, 7));

        assert_eq!(entities[id].pos, GridPos::new(4, 7));
        assert!(map.entities.contains(&id));

        // Placing again relocates without duplicating the registration.
        place(&mut entities, &mut map, id, GridPos::new(5, 7));
        assert_eq!(map.entities.len(), 1);
    }

    #[test]
    fn test_retain() {
        let mut entities = Entities::new();
        let a = entities.insert(bare_item("keep"));
        entities.insert(bare_item("drop"));

        entities.retain(|_, e| e.name == "keep");

        assert_eq!(entities.count(), 1);
        assert!(entities.contains(a));
    }
}
