/// Ray casting: one hit record per screen column.
///
/// A ray is marched from the player in fixed increments until it enters a
/// wall cell, leaves the map, or exceeds the view depth. Leaving the map is
/// reported as a hit at full depth, indistinguishable downstream from a
/// depth-exceeded miss — both render as background.
///
/// ## Edge detection
///
/// A wall block has four vertical edges, one per corner of its map cell.
/// A ray that is nearly collinear with the line from the player to one of
/// those corners is grazing an edge, so the column is rendered with the
/// faint seam glyph instead of the distance shade. Only the three corners
/// nearest the player are tested; the farthest is occluded by the block
/// itself and would produce false positives.

use super::map::TileMap;
use super::player::Player;
use super::tile::Tile;

/// Max angular deviation (radians) between the view ray and a
/// player-to-corner ray for the hit to count as an edge graze.
const EDGE_THRESHOLD: f32 = 0.01;

/// Result of casting one view ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance to the obstruction, capped at view depth.
    pub distance: f32,
    /// Ray struck a near-vertical corner of a wall block.
    pub edge: bool,
    /// Ray left the map without striking a wall.
    pub out_of_bounds: bool,
}

/// Outcome of the marching loop.
enum March {
    Hit { cell: (i32, i32), distance: f32 },
    OutOfBounds,
    DepthExceeded,
}

/// Angle of the ray for screen column `x` of `screen_w`, sweeping the
/// field of view left to right around the player's heading.
pub fn column_angle(player: &Player, x: usize, screen_w: usize) -> f32 {
    player.heading - player.fov * 0.5 + x as f32 / screen_w as f32 * player.fov
}

/// Cast the ray for one screen column.
pub fn cast_column(map: &TileMap, player: &Player, x: usize, screen_w: usize, step: f32) -> RayHit {
    cast(map, player.x, player.y, column_angle(player, x, screen_w), player.view_depth, step)
}

/// Cast a single ray from (ox, oy) at `angle`, marching in `step`-sized
/// increments up to `depth`.
pub fn cast(map: &TileMap, ox: f32, oy: f32, angle: f32, depth: f32, step: f32) -> RayHit {
    let dir = (angle.cos(), angle.sin());

    match march(map, ox, oy, dir, depth, step) {
        March::Hit { cell, distance } => RayHit {
            distance: distance.min(depth),
            edge: grazes_edge(ox, oy, dir, cell),
            out_of_bounds: false,
        },
        March::OutOfBounds => RayHit { distance: depth, edge: false, out_of_bounds: true },
        March::DepthExceeded => RayHit { distance: depth, edge: false, out_of_bounds: false },
    }
}

fn march(map: &TileMap, ox: f32, oy: f32, dir: (f32, f32), depth: f32, step: f32) -> March {
    let mut dist = 0.0;
    while dist < depth {
        dist += step;
        let cx = (ox + dir.0 * dist).floor() as i32;
        let cy = (oy + dir.1 * dist).floor() as i32;
        if !map.in_bounds(cx, cy) {
            return March::OutOfBounds;
        }
        if map.cell_at(cx, cy) == Tile::Wall {
            return March::Hit { cell: (cx, cy), distance: dist };
        }
    }
    March::DepthExceeded
}

/// Corner test: (distance to corner, angular deviation from the ray).
/// Fixed-size records, no per-ray allocation.
fn grazes_edge(ox: f32, oy: f32, dir: (f32, f32), cell: (i32, i32)) -> bool {
    let mut corners = [(0.0_f32, f32::MAX); 4];
    for (i, (wx, wy)) in [(0, 0), (1, 0), (0, 1), (1, 1)].into_iter().enumerate() {
        let vx = (cell.0 + wx) as f32 - ox;
        let vy = (cell.1 + wy) as f32 - oy;
        let len = (vx * vx + vy * vy).sqrt();
        if len <= f32::EPSILON {
            // Corner coincides with the viewer; no defined direction.
            corners[i] = (len, f32::MAX);
            continue;
        }
        let dot = vx / len * dir.0 + vy / len * dir.1;
        corners[i] = (len, dot.clamp(-1.0, 1.0).acos());
    }

    // Nearest three corners only; the farthest is occluded.
    corners.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));
    corners[..3].iter().any(|&(_, dev)| dev < EDGE_THRESHOLD)
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
