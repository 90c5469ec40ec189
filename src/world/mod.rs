//! Dungeon floor state: tiles, visibility, and entity placement

pub mod fov;
pub mod map;
pub mod tile;

pub use map::{GameMap, VisibilityState};
pub use tile::{Glyph, Tile};
