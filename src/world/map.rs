//! Dungeon floor map: tile grid, visibility overlays, and placed entities

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, GridPos};
use crate::entity::Entities;
use crate::world::tile::Tile;

/// Visibility state of a tile for frontends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VisibilityState {
    /// Never seen
    #[default]
    Unknown,
    /// Seen before, not currently observed
    Remembered,
    /// Currently visible
    Observed,
}

/// One dungeon floor
///
/// Owns the tile grid, the `visible`/`explored` overlays, the downstairs
/// location, and the ordered list of entity ids placed on this floor.
/// Entity data itself lives in the [`Entities`] arena, passed into queries
/// as explicit context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMap {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
    visible: Vec<bool>,
    explored: Vec<bool>,
    pub downstairs: GridPos,
    /// Ids of entities on this floor, in placement order (stable)
    pub entities: Vec<EntityId>,
}

impl GameMap {
    /// Create a map filled with wall tiles
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width * height) as usize;
        Self {
            width,
            height,
            tiles: vec![Tile::wall(); size],
            visible: vec![false; size],
            explored: vec![false; size],
            downstairs: GridPos::default(),
            entities: Vec::new(),
        }
    }

    fn idx(&self, pos: GridPos) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    pub fn tile(&self, pos: GridPos) -> &Tile {
        &self.tiles[self.idx(pos)]
    }

    pub fn set_tile(&mut self, pos: GridPos, tile: Tile) {
        let idx = self.idx(pos);
        self.tiles[idx] = tile;
    }

    /// Walkable and in bounds
    pub fn is_walkable(&self, pos: GridPos) -> bool {
        self.in_bounds(pos) && self.tile(pos).walkable
    }

    pub fn is_transparent(&self, pos: GridPos) -> bool {
        self.in_bounds(pos) && self.tile(pos).transparent
    }

    pub fn is_visible(&self, pos: GridPos) -> bool {
        self.in_bounds(pos) && self.visible[self.idx(pos)]
    }

    pub fn is_explored(&self, pos: GridPos) -> bool {
        self.in_bounds(pos) && self.explored[self.idx(pos)]
    }

    pub fn visibility_of(&self, pos: GridPos) -> VisibilityState {
        if self.is_visible(pos) {
            VisibilityState::Observed
        } else if self.is_explored(pos) {
            VisibilityState::Remembered
        } else {
            VisibilityState::Unknown
        }
    }

    /// Replace the visible overlay and union it into explored
    ///
    /// `explored` only ever grows; nothing resets it.
    pub fn set_visible(&mut self, visible: Vec<bool>) {
        debug_assert_eq!(visible.len(), self.visible.len());
        self.visible = visible;
        for (explored, &visible) in self.explored.iter_mut().zip(&self.visible) {
            *explored |= visible;
        }
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    // === Placed-entity bookkeeping ===

    /// Add an entity id to this floor (no-op if already present)
    pub fn place_entity(&mut self, id: EntityId) {
        if !self.entities.contains(&id) {
            self.entities.push(id);
        }
    }

    /// Remove an entity id from this floor, returning whether it was present
    pub fn take_entity(&mut self, id: EntityId) -> bool {
        if let Some(index) = self.entities.iter().position(|&e| e == id) {
            self.entities.remove(index);
            true
        } else {
            false
        }
    }

    // === Occupancy queries ===

    /// The movement-blocking entity at a position, if any
    pub fn blocking_entity_at(&self, entities: &Entities, pos: GridPos) -> Option<EntityId> {
        self.entities
            .iter()
            .copied()
            .find(|&id| entities[id].blocks_movement && entities[id].pos == pos)
    }

    /// The living actor at a position, if any
    pub fn actor_at(&self, entities: &Entities, pos: GridPos) -> Option<EntityId> {
        self.entities
            .iter()
            .copied()
            .find(|&id| entities[id].is_alive() && entities[id].pos == pos)
    }

    /// The first item at a position, in placement order
    pub fn item_at(&self, entities: &Entities, pos: GridPos) -> Option<EntityId> {
        self.entities
            .iter()
            .copied()
            .find(|&id| entities[id].is_item() && entities[id].pos == pos)
    }

    /// Ids of living actors on this floor, in placement order
    pub fn living_actors(&self, entities: &Entities) -> Vec<EntityId> {
        self.entities
            .iter()
            .copied()
            .filter(|&id| entities[id].is_alive())
            .collect()
    }

    /// Entity ids sorted for drawing: corpses under items under actors
    pub fn render_sorted(&self, entities: &Entities) -> Vec<EntityId> {
        let mut ids = self.entities.clone();
        ids.sort_by_key(|&id| entities[id].render_order);
        ids
    }
}
