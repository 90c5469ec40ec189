//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for entities, allocated by the entity arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The eight grid directions as (dx, dy) deltas
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1), // Northwest
    (0, -1),  // North
    (1, -1),  // Northeast
    (-1, 0),  // West
    (1, 0),   // East
    (-1, 1),  // Southwest
    (0, 1),   // South
    (1, 1),   // Southeast
];

/// Position on the tile grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance, used for targeting and range checks only
    pub fn distance(&self, other: Self) -> f32 {
        let dx = (other.x - self.x) as f32;
        let dy = (other.y - self.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Chebyshev distance: the number of 8-directional steps between points
    pub fn chebyshev(&self, other: Self) -> i32 {
        (other.x - self.x).abs().max((other.y - self.y).abs())
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Bresenham line from this position to `other`, inclusive of both ends
    pub fn line_to(&self, other: Self) -> Vec<GridPos> {
        let mut points = Vec::new();

        let dx = (other.x - self.x).abs();
        let dy = -(other.y - self.y).abs();
        let sx = if self.x < other.x { 1 } else { -1 };
        let sy = if self.y < other.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (self.x, self.y);

        loop {
            points.push(GridPos::new(x, y));
            if x == other.x && y == other.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }

        points
    }
}

/// RGB color (0-255 per channel), opaque payload for frontends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
