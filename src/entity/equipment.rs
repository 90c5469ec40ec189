//! Equipment slots conferring lasting bonuses

use serde::{Deserialize, Serialize};

use crate::core::types::EntityId;
use crate::entity::item::EquipSlot;
use crate::entity::Entities;

/// Weapon and armor slots, each referencing an item in the owner's inventory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<EntityId>,
    pub armor: Option<EntityId>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_equipped(&self, item: EntityId) -> bool {
        self.weapon == Some(item) || self.armor == Some(item)
    }

    pub fn slot(&self, slot: EquipSlot) -> Option<EntityId> {
        match slot {
            EquipSlot::Weapon => self.weapon,
            EquipSlot::Armor => self.armor,
        }
    }

    pub fn set_slot(&mut self, slot: EquipSlot, item: Option<EntityId>) {
        match slot {
            EquipSlot::Weapon => self.weapon = item,
            EquipSlot::Armor => self.armor = item,
        }
    }

    pub fn power_bonus(&self, entities: &Entities) -> i32 {
        self.bonus(entities, |e| e.power_bonus)
    }

    pub fn defense_bonus(&self, entities: &Entities) -> i32 {
        self.bonus(entities, |e| e.defense_bonus)
    }

    fn bonus(
        &self,
        entities: &Entities,
        pick: impl Fn(&crate::entity::item::Equippable) -> i32,
    ) -> i32 {
        [self.weapon, self.armor]
            .into_iter()
            .flatten()
            .filter_map(|id| entities.get(id))
            .filter_map(|entity| entity.as_item())
            .filter_map(|item| item.equippable.as_ref())
            .map(pick)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GridPos;
    use crate::entity::item::Equippable;
    use crate::entity::{Entity, EntityKind, ItemParts, RenderOrder};
    use crate::log::colors;

    fn gear(equippable: Equippable) -> Entity {
        Entity {
            pos: GridPos::new(0, 0),
            glyph: '/',
            color: colors::WHITE,
            name: "gear".into(),
            blocks_movement: false,
            render_order: RenderOrder::Item,
            kind: EntityKind::Item(ItemParts {
                consumable: None,
                equippable: Some(equippable),
            }),
        }
    }

    #[test]
    fn test_bonuses_sum_over_both_slots() {
        let mut entities = Entities::new();
        let sword = entities.insert(gear(Equippable::weapon(4)));
        let mail = entities.insert(gear(Equippable::armor(3)));

        let mut equipment = Equipment::new();
        equipment.weapon = Some(sword);
        equipment.armor = Some(mail);

        assert_eq!(equipment.power_bonus(&entities), 4);
        assert_eq!(equipment.defense_bonus(&entities), 3);
    }

    #[test]
    fn test_empty_slots_grant_nothing() {
        let entities = Entities::new();
        let equipment = Equipment::new();
        assert_eq!(equipment.power_bonus(&entities), 0);
        assert_eq!(equipment.defense_bonus(&entities), 0);
    }

    #[test]
    fn test_is_equipped() {
        let mut equipment = Equipment::new();
        equipment.weapon = Some(EntityId(3));
        assert!(equipment.is_equipped(EntityId(3)));
        assert!(!equipment.is_equipped(EntityId(4)));
    }
}
