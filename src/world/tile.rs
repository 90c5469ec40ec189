//! Map tiles and their rendering payload

use serde::{Deserialize, Serialize};

use crate::core::types::Color;

/// A display cell for one tile state (character plus colors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Glyph {
    pub const fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self { ch, fg, bg }
    }
}

/// A single map tile
///
/// `dark` is drawn for explored-but-unseen tiles, `light` for visible ones.
/// Both are opaque payload to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub walkable: bool,
    pub transparent: bool,
    pub dark: Glyph,
    pub light: Glyph,
}

impl Tile {
    pub fn wall() -> Self {
        Self {
            walkable: false,
            transparent: false,
            dark: Glyph::new(' ', Color::new(255, 255, 255), Color::new(0, 0, 100)),
            light: Glyph::new(' ', Color::new(255, 255, 255), Color::new(130, 110, 50)),
        }
    }

    pub fn floor() -> Self {
        Self {
            walkable: true,
            transparent: true,
            dark: Glyph::new(' ', Color::new(255, 255, 255), Color::new(50, 50, 150)),
            light: Glyph::new(' ', Color::new(255, 255, 255), Color::new(200, 180, 50)),
        }
    }

    pub fn down_stairs() -> Self {
        Self {
            walkable: true,
            transparent: true,
            dark: Glyph::new('>', Color::new(0, 0, 100), Color::new(50, 50, 150)),
            light: Glyph::new('>', Color::new(255, 255, 255), Color::new(200, 180, 50)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_blocks_movement_and_sight() {
        let wall = Tile::wall();
        assert!(!wall.walkable);
        assert!(!wall.transparent);
    }

    #[test]
    fn test_floor_and_stairs_are_open() {
        assert!(Tile::floor().walkable);
        assert!(Tile::floor().transparent);
        assert!(Tile::down_stairs().walkable);
        assert!(Tile::down_stairs().transparent);
    }
}
