//! Item capabilities: consumable effects and equippable gear

use serde::{Deserialize, Serialize};

/// Which equipment slot an equippable occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipSlot {
    Weapon,
    Armor,
}

/// Lasting stat bonuses granted while the item is equipped
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Equippable {
    pub slot: EquipSlot,
    pub power_bonus: i32,
    pub defense_bonus: i32,
}

impl Equippable {
    pub fn weapon(power_bonus: i32) -> Self {
        Self {
            slot: EquipSlot::Weapon,
            power_bonus,
            defense_bonus: 0,
        }
    }

    pub fn armor(defense_bonus: i32) -> Self {
        Self {
            slot: EquipSlot::Armor,
            power_bonus: 0,
            defense_bonus,
        }
    }
}

/// One-shot item effect, applied by the use-item action and then consumed
///
/// Dispatch is by pattern match; the validation and application contracts
/// live in `actions::item`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Consumable {
    /// Restore up to `amount` hp to the consumer
    Healing { amount: i32 },
    /// Replace the target actor's AI with a confused wrapper for `turns`
    Confusion { turns: u32 },
    /// Strike the nearest visible enemy within range, ignoring defense
    Lightning { damage: i32, maximum_range: i32 },
    /// Damage every actor within `radius` of the target point
    Fireball { damage: i32, radius: i32 },
}
