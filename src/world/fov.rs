//! Field of view over the transparency grid
//!
//! A tile is visible when it lies within the radius and the sight line from
//! the origin reaches it through transparent tiles. Lines are symmetric, so
//! "the player sees the monster" and "the monster sees the player" agree.

use crate::core::types::GridPos;
use crate::world::map::GameMap;

/// Recompute the map's visible overlay from `origin` and union it into
/// explored
pub fn compute(map: &mut GameMap, origin: GridPos, radius: i32) {
    let mut visible = vec![false; map.visible_len()];
    let radius_sq = radius * radius;

    for y in (origin.y - radius).max(0)..=(origin.y + radius).min(map.height - 1) {
        for x in (origin.x - radius).max(0)..=(origin.x + radius).min(map.width - 1) {
            let pos = GridPos::new(x, y);
            let dx = x - origin.x;
            let dy = y - origin.y;
            if dx * dx + dy * dy > radius_sq {
                continue;
            }
            if has_line_of_sight(map, origin, pos) {
                visible[(y * map.width + x) as usize] = true;
            }
        }
    }

    map.set_visible(visible);
}

/// Check sight between two tiles: every tile strictly between them must be
/// transparent. The endpoints themselves never block, so walls at the edge
/// of a lit area are seen.
pub fn has_line_of_sight(map: &GameMap, from: GridPos, to: GridPos) -> bool {
    let line = from.line_to(to);

    for pos in line.iter().skip(1).take(line.len().saturating_sub(2)) {
        if !map.is_transparent(*pos) {
            return false;
        }
    }

    true
}
