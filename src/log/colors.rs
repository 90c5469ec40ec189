//! Color definitions for messages and entity glyphs

use crate::core::types::Color;

pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);

pub const PLAYER_ATK: Color = Color::new(0xE0, 0xE0, 0xE0);
pub const ENEMY_ATK: Color = Color::new(0xFF, 0xC0, 0xC0);

pub const PLAYER_DIE: Color = Color::new(0xFF, 0x30, 0x30);
pub const ENEMY_DIE: Color = Color::new(0xFF, 0xA0, 0x30);

pub const HEALTH_RECOVERED: Color = Color::new(0x00, 0xFF, 0x00);
pub const STATUS_EFFECT_APPLIED: Color = Color::new(0x3F, 0xFF, 0x3F);
pub const NEEDS_TARGET: Color = Color::new(0x3F, 0xFF, 0xFF);
pub const DESCEND: Color = Color::new(0x9F, 0x3F, 0xFF);

/// Rejected actions are reported in a muted gray
pub const IMPOSSIBLE: Color = Color::new(0x80, 0x80, 0x80);
pub const INVALID: Color = Color::new(0xFF, 0xFF, 0x00);

pub const WELCOME_TEXT: Color = Color::new(0x20, 0xA0, 0xFF);

/// Corpse glyphs after an actor dies
pub const CORPSE: Color = Color::new(0xBF, 0x00, 0x00);
