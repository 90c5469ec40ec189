//! Procedural dungeon generation
//!
//! Rooms are sampled at random and rejected on overlap; accepted rooms are
//! carved and chained together with L-shaped corridors. The downstairs
//! marker is overwritten at every accepted room's center, so the stairs land
//! in the last room the sampler managed to place.

pub mod tables;
pub mod templates;

pub use templates::TemplateKind;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::GameConfig;
use crate::core::types::{EntityId, GridPos};
use crate::entity::{self, Entities};
use crate::world::map::GameMap;
use crate::world::tile::Tile;

/// Position re-rolls per spawned entity before giving up on a crowded room
const PLACEMENT_ATTEMPTS: u32 = 10;

/// Axis-aligned room candidate
///
/// `x1..=x2` spans the full footprint including the wall ring; the interior
/// is one tile smaller on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectRoom {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectRoom {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn center(&self) -> GridPos {
        GridPos::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Inclusive bounding-box overlap test
    pub fn intersects(&self, other: &RectRoom) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }
}

/// Generate one dungeon floor, placing the player and populating rooms
///
/// The player entity must already exist in the arena; it is positioned at
/// the first accepted room's center.
pub fn generate(
    config: &GameConfig,
    floor: u32,
    entities: &mut Entities,
    player: EntityId,
    rng: &mut ChaCha8Rng,
) -> GameMap {
    let mut map = GameMap::new(config.map_width, config.map_height);
    map.place_entity(player);

    let mut rooms: Vec<RectRoom> = Vec::new();

    for _ in 0..config.max_rooms {
        let room_width = rng.gen_range(config.room_min_size..=config.room_max_size);
        let room_height = rng.gen_range(config.room_min_size..=config.room_max_size);
        let x = rng.gen_range(0..=config.map_width - room_width - 1);
        let y = rng.gen_range(0..=config.map_height - room_height - 1);

        let new_room = RectRoom::new(x, y, room_width, room_height);
        if rooms.iter().any(|other| new_room.intersects(other)) {
            continue;
        }

        carve_room(&mut map, &new_room);

        if let Some(previous) = rooms.last() {
            for pos in tunnel_between(rng, previous.center(), new_room.center()) {
                map.set_tile(pos, Tile::floor());
            }
        } else {
            // The first room, where the player starts. Placed before the
            // room is populated so spawns collision-check against it.
            entity::place(entities, &mut map, player, new_room.center());
        }

        place_entities(&new_room, &mut map, entities, floor, rng);

        // Overwritten for every accepted room: the stairs end up in the
        // last room the sampler placed, not necessarily the last candidate.
        map.downstairs = new_room.center();

        rooms.push(new_room);
    }

    map.set_tile(map.downstairs, Tile::down_stairs());
    map
}

fn carve_room(map: &mut GameMap, room: &RectRoom) {
    for y in room.y1 + 1..room.y2 {
        for x in room.x1 + 1..room.x2 {
            map.set_tile(GridPos::new(x, y), Tile::floor());
        }
    }
}

/// L-shaped corridor between two points, elbow chosen at random
fn tunnel_between(rng: &mut ChaCha8Rng, start: GridPos, end: GridPos) -> Vec<GridPos> {
    let corner = if rng.gen_bool(0.5) {
        // Move horizontally, then vertically.
        GridPos::new(end.x, start.y)
    } else {
        // Move vertically, then horizontally.
        GridPos::new(start.x, end.y)
    };

    let mut tunnel = start.line_to(corner);
    tunnel.extend(corner.line_to(end));
    tunnel
}

fn place_entities(
    room: &RectRoom,
    map: &mut GameMap,
    entities: &mut Entities,
    floor: u32,
    rng: &mut ChaCha8Rng,
) {
    let monster_count = rng.gen_range(0..=tables::max_for_floor(tables::MAX_MONSTERS_BY_FLOOR, floor));
    let item_count = rng.gen_range(0..=tables::max_for_floor(tables::MAX_ITEMS_BY_FLOOR, floor));

    let monsters = tables::pick_templates(tables::MONSTER_WEIGHTS, floor, monster_count, rng);
    let items = tables::pick_templates(tables::ITEM_WEIGHTS, floor, item_count, rng);

    for kind in monsters.into_iter().chain(items) {
        // The template is fixed; only the position is re-rolled on
        // collision with an already-placed entity.
        for _ in 0..PLACEMENT_ATTEMPTS {
            let pos = GridPos::new(
                rng.gen_range(room.x1 + 1..=room.x2 - 1),
                rng.gen_range(room.y1 + 1..=room.y2 - 1),
            );
            if map.entities.iter().all(|&id| entities[id].pos != pos) {
                entity::spawn(entities, map, &templates::build(kind), pos);
                break;
            }
        }
    }
}
