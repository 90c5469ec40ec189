//! Weighted A* pathfinding over the tile grid
//!
//! The cost grid is seeded from walkability; movement-blocking entities add
//! a penalty to their tile instead of closing it, which biases paths away
//! from crowds without making detours mandatory.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::AHashMap;

use crate::core::config::GameConfig;
use crate::core::types::{GridPos, DIRECTIONS};
use crate::entity::Entities;
use crate::world::map::GameMap;

/// Node in the A* open set
#[derive(Debug, Clone)]
struct PathNode {
    pos: GridPos,
    f_cost: u32,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other.f_cost.cmp(&self.f_cost)
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-tile traversal cost: 0 for impassable, 1 for open floor, plus the
/// crowding penalty for each blocking entity standing on a passable tile
pub fn build_cost_grid(map: &GameMap, entities: &Entities, config: &GameConfig) -> Vec<u32> {
    let mut cost: Vec<u32> = (0..map.height)
        .flat_map(|y| (0..map.width).map(move |x| (x, y)))
        .map(|(x, y)| u32::from(map.is_walkable(GridPos::new(x, y))))
        .collect();

    for &id in &map.entities {
        let entity = &entities[id];
        let idx = (entity.pos.y * map.width + entity.pos.x) as usize;
        if entity.blocks_movement && cost[idx] > 0 {
            cost[idx] += config.crowd_penalty;
        }
    }

    cost
}

/// Shortest weighted path from `start` to `goal`, excluding the start tile
///
/// 8-directional adjacency; the cost of a step is the destination tile's
/// cost times the cardinal or diagonal factor. Returns an empty path when
/// the goal is unreachable.
pub fn path_to(
    map: &GameMap,
    entities: &Entities,
    config: &GameConfig,
    start: GridPos,
    goal: GridPos,
) -> Vec<GridPos> {
    if start == goal || !map.in_bounds(goal) {
        return Vec::new();
    }

    let cost = build_cost_grid(map, entities, config);
    let tile_cost = |pos: GridPos| cost[(pos.y * map.width + pos.x) as usize];
    let heuristic = |pos: GridPos| pos.chebyshev(goal) as u32 * config.cardinal_cost;

    let mut open_set = BinaryHeap::new();
    let mut came_from: AHashMap<GridPos, GridPos> = AHashMap::new();
    let mut g_scores: AHashMap<GridPos, u32> = AHashMap::new();

    g_scores.insert(start, 0);
    open_set.push(PathNode {
        pos: start,
        f_cost: heuristic(start),
    });

    while let Some(current) = open_set.pop() {
        if current.pos == goal {
            return reconstruct_path(&came_from, current.pos);
        }

        let current_g = *g_scores.get(&current.pos).unwrap_or(&u32::MAX);

        for (dx, dy) in DIRECTIONS {
            let neighbor = current.pos.offset(dx, dy);
            if !map.in_bounds(neighbor) || tile_cost(neighbor) == 0 {
                continue;
            }

            let step_factor = if dx != 0 && dy != 0 {
                config.diagonal_cost
            } else {
                config.cardinal_cost
            };
            let tentative_g = current_g + tile_cost(neighbor) * step_factor;
            let neighbor_g = *g_scores.get(&neighbor).unwrap_or(&u32::MAX);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.pos);
                g_scores.insert(neighbor, tentative_g);
                open_set.push(PathNode {
                    pos: neighbor,
                    f_cost: tentative_g + heuristic(neighbor),
                });
            }
        }
    }

    Vec::new() // No path found
}

/// Reconstruct the path from the came_from map, dropping the start tile
fn reconstruct_path(came_from: &AHashMap<GridPos, GridPos>, mut current: GridPos) -> Vec<GridPos> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path.remove(0);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Color;
    use crate::entity::{Entity, EntityKind, ItemParts, RenderOrder};
    use crate::world::tile::Tile;

    fn open_map(width: i32, height: i32) -> GameMap {
        let mut map = GameMap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                map.set_tile(GridPos::new(x, y), Tile::floor());
            }
        }
        map
    }

    fn blocker_at(map: &mut GameMap, entities: &mut Entities, pos: GridPos) {
        let id = entities.insert(Entity {
            pos,
            glyph: 'o',
            color: Color::new(63, 127, 63),
            name: "blocker".into(),
            blocks_movement: true,
            render_order: RenderOrder::Actor,
            kind: EntityKind::Item(ItemParts::default()),
        });
        map.place_entity(id);
    }

    #[test]
    fn test_open_grid_path_length_is_chebyshev() {
        let map = open_map(12, 12);
        let entities = Entities::new();
        let config = GameConfig::default();

        let start = GridPos::new(1, 1);
        let goal = GridPos::new(7, 4);
        let path = path_to(&map, &entities, &config, start, goal);

        assert_eq!(path.len() as i32, start.chebyshev(goal));
        assert_eq!(path.last(), Some(&goal));
        assert!(!path.contains(&start));
    }

    #[test]
    fn test_walled_off_goal_returns_empty() {
        let mut map = open_map(12, 12);
        let goal = GridPos::new(8, 8);
        for (dx, dy) in DIRECTIONS {
            map.set_tile(goal.offset(dx, dy), Tile::wall());
        }

        let path = path_to(&map, &Entities::new(), &GameConfig::default(), GridPos::new(1, 1), goal);
        assert!(path.is_empty());
    }

    #[test]
    fn test_same_start_and_goal_is_empty() {
        let map = open_map(5, 5);
        let path = path_to(
            &map,
            &Entities::new(),
            &GameConfig::default(),
            GridPos::new(2, 2),
            GridPos::new(2, 2),
        );
        assert!(path.is_empty());
    }

    #[test]
    fn test_crowd_penalty_detours_in_open_ground() {
        let mut map = open_map(9, 7);
        let mut entities = Entities::new();
        blocker_at(&mut map, &mut entities, GridPos::new(4, 3));

        let path = path_to(
            &map,
            &entities,
            &GameConfig::default(),
            GridPos::new(0, 3),
            GridPos::new(8, 3),
        );

        // Going around is cheaper than stepping onto the penalized tile.
        assert!(!path.is_empty());
        assert!(!path.contains(&GridPos::new(4, 3)));
    }

    #[test]
    fn test_crowded_corridor_is_still_passable() {
        // One-tile corridor: the only route runs through the blocker's tile.
        let mut map = GameMap::new(7, 3);
        for x in 0..7 {
            map.set_tile(GridPos::new(x, 1), Tile::floor());
        }
        let mut entities = Entities::new();
        blocker_at(&mut map, &mut entities, GridPos::new(3, 1));

        let path = path_to(
            &map,
            &entities,
            &GameConfig::default(),
            GridPos::new(0, 1),
            GridPos::new(6, 1),
        );

        assert_eq!(path.len(), 6);
        assert!(path.contains(&GridPos::new(3, 1)));
    }
}
