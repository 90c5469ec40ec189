//! Combat stats for actors

use serde::{Deserialize, Serialize};

/// Hit points and base combat stats
///
/// `hp` is clamped to `[0, max_hp]` on every write. Death handling (corpse
/// transformation, messages, XP) lives at the engine layer, where the map
/// and log are reachable; this component only reports that hp hit zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
    pub max_hp: i32,
    hp: i32,
    pub base_power: i32,
    pub base_defense: i32,
}

impl Fighter {
    pub fn new(hp: i32, base_defense: i32, base_power: i32) -> Self {
        Self {
            max_hp: hp,
            hp,
            base_power,
            base_defense,
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    /// Set hp, clamped to the valid range
    pub fn set_hp(&mut self, value: i32) {
        self.hp = value.clamp(0, self.max_hp);
    }

    /// Heal up to `amount`, returning how much was actually recovered
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.hp == self.max_hp {
            return 0;
        }
        let new_hp = (self.hp + amount).min(self.max_hp);
        let recovered = new_hp - self.hp;
        self.hp = new_hp;
        recovered
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.set_hp(self.hp - amount);
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    /// Permanently raise max hp, healing by the same amount
    pub fn raise_max_hp(&mut self, amount: i32) {
        self.max_hp += amount;
        self.hp += amount;
    }
}
