//! Game configuration with documented constants
//!
//! All tunables are collected here with explanations of their purpose
//! and how they interact with each other.

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};

/// Configuration for map generation, visibility, and pathfinding
///
/// These values reproduce the classic dungeon pacing. Changing them
/// affects floor layout, difficulty ramp, and chase behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === MAP ===
    /// Map width in tiles
    pub map_width: i32,

    /// Map height in tiles
    pub map_height: i32,

    // === DUNGEON GENERATION ===
    /// Number of room candidates sampled per floor
    ///
    /// Candidates overlapping an already-placed room are discarded, so the
    /// accepted room count is usually well below this.
    pub max_rooms: u32,

    /// Minimum room side length in tiles (including walls)
    pub room_min_size: i32,

    /// Maximum room side length in tiles (including walls)
    pub room_max_size: i32,

    // === VISIBILITY ===
    /// Field-of-view radius in tiles, recomputed from the player each turn
    pub fov_radius: i32,

    // === PATHFINDING ===
    /// Cost of an orthogonal step
    pub cardinal_cost: u32,

    /// Cost of a diagonal step
    ///
    /// Slightly above the cardinal cost so paths prefer straight lines but
    /// still take diagonals when they shorten the route.
    pub diagonal_cost: u32,

    /// Extra tile cost for a movement-blocking entity on a passable tile
    ///
    /// A lower number means more enemies will crowd behind each other in
    /// hallways. A higher number means enemies will take longer paths in
    /// order to surround the player.
    pub crowd_penalty: u32,

    // === PROGRESSION ===
    /// Player inventory capacity
    pub inventory_capacity: usize,

    /// Flat component of the XP threshold per level
    pub level_up_base: i32,

    /// Per-level component of the XP threshold
    pub level_up_factor: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: 80,
            map_height: 43,

            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,

            fov_radius: 8,

            cardinal_cost: 2,
            diagonal_cost: 3,
            crowd_penalty: 10,

            inventory_capacity: 26,
            level_up_base: 200,
            level_up_factor: 150,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.room_min_size < 3 {
            return Err(format!(
                "room_min_size ({}) must be at least 3 to have an interior",
                self.room_min_size
            ));
        }

        if self.room_min_size > self.room_max_size {
            return Err(format!(
                "room_min_size ({}) must be <= room_max_size ({})",
                self.room_min_size, self.room_max_size
            ));
        }

        // A room plus a one-tile margin must fit inside the map.
        if self.room_max_size + 2 > self.map_width || self.room_max_size + 2 > self.map_height {
            return Err(format!(
                "room_max_size ({}) does not fit a {}x{} map",
                self.room_max_size, self.map_width, self.map_height
            ));
        }

        if self.cardinal_cost == 0 || self.diagonal_cost < self.cardinal_cost {
            return Err(format!(
                "step costs must satisfy 0 < cardinal ({}) <= diagonal ({})",
                self.cardinal_cost, self.diagonal_cost
            ));
        }

        if self.fov_radius <= 0 {
            return Err("fov_radius must be positive".into());
        }

        Ok(())
    }

    /// Parse a config from TOML text; missing fields keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate().map_err(GameError::Config)?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_room_sizes_must_be_ordered() {
        let config = GameConfig {
            room_min_size: 12,
            room_max_size: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rooms_must_fit_map() {
        let config = GameConfig {
            map_width: 10,
            map_height: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_partial_override() {
        let config = GameConfig::from_toml_str("fov_radius = 12\nmax_rooms = 5\n").unwrap();
        assert_eq!(config.fov_radius, 12);
        assert_eq!(config.max_rooms, 5);
        // Untouched fields keep defaults
        assert_eq!(config.map_width, 80);
    }

    #[test]
    fn test_toml_rejects_invalid() {
        assert!(GameConfig::from_toml_str("room_min_size = 2\n").is_err());
    }
}
