/// Projection and frame composition.
///
/// Each ray hit becomes a vertical wall span: the closer the hit, the
/// taller the span. The wall glyph encodes distance in four shade tiers,
/// with edge grazes always drawn as the faint seam glyph. Columns are
/// painted first, then the minimap and player marker overwrite the
/// top-left corner — later layers win.

use crate::domain::map::TileMap;
use crate::domain::player::Player;
use crate::domain::ray::{self, RayHit};

// ── Glyph palette ──

pub const GLYPH_WALL_NEAR: char = '█';
pub const GLYPH_WALL_MID: char = '▓';
pub const GLYPH_WALL_FAR: char = '▒';
pub const GLYPH_WALL_FAINT: char = '░';
pub const GLYPH_BACKGROUND: char = ' ';
pub const GLYPH_FLOOR: char = '-';
pub const GLYPH_PLAYER: char = '@';

/// Distances at or below this project as if at this range, so a degenerate
/// zero-distance hit never divides to a non-finite span.
const MIN_PROJECT_DISTANCE: f32 = 1e-3;

// ── GlyphGrid: the composed character frame ──

/// Row-major character buffer with bounds-checked access.
/// Reused across frames; fully repainted each tick.
pub struct GlyphGrid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl GlyphGrid {
    pub fn new(width: usize, height: usize) -> Self {
        GlyphGrid { width, height, cells: vec![GLYPH_BACKGROUND; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn set(&mut self, x: usize, y: usize, glyph: char) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = glyph;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> char {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            GLYPH_BACKGROUND
        }
    }
}

// ── Projection ──

/// Screen rows where the wall span for a hit at `distance` starts and ends.
/// Inverse-distance projection: ceiling = H/2 − H/d, floor mirrors it.
pub fn project_span(distance: f32, screen_h: usize) -> (i32, i32) {
    let d = distance.max(MIN_PROJECT_DISTANCE);
    let h = screen_h as f32;
    let ceiling = (h * 0.5 - h / d).round() as i32;
    let floor = screen_h as i32 - ceiling;
    (ceiling, floor)
}

/// Wall glyph for a hit: edges are always the faint seam glyph, otherwise
/// four shade tiers by distance fraction of the view depth.
pub fn wall_glyph(hit: RayHit, view_depth: f32) -> char {
    if hit.edge {
        return GLYPH_WALL_FAINT;
    }
    if hit.distance < view_depth * 0.3 {
        GLYPH_WALL_NEAR
    } else if hit.distance < view_depth * 0.6 {
        GLYPH_WALL_MID
    } else if hit.distance < view_depth * 0.9 {
        GLYPH_WALL_FAR
    } else if hit.distance < view_depth {
        GLYPH_WALL_FAINT
    } else {
        GLYPH_BACKGROUND
    }
}

// ── Composition ──

/// Paint one screen column: background above the span, wall glyph across
/// it, floor glyph below.
fn paint_column(grid: &mut GlyphGrid, x: usize, span: (i32, i32), wall: char) {
    let (ceiling, floor) = span;
    for y in 0..grid.height() {
        let row = y as i32;
        let glyph = if row < ceiling {
            GLYPH_BACKGROUND
        } else if row <= floor {
            wall
        } else {
            GLYPH_FLOOR
        };
        grid.set(x, y, glyph);
    }
}

/// Compose a full frame: ray-cast every column, then overlay the minimap
/// and the player marker in the top-left corner.
pub fn compose(grid: &mut GlyphGrid, map: &TileMap, player: &Player, ray_step: f32) {
    let (w, h) = (grid.width(), grid.height());

    for x in 0..w {
        let hit = ray::cast_column(map, player, x, w, ray_step);
        let span = project_span(hit.distance, h);
        let wall = wall_glyph(hit, player.view_depth);
        paint_column(grid, x, span, wall);
    }

    // Minimap overwrites the projection in its footprint.
    for my in 0..map.height() {
        for mx in 0..map.width() {
            grid.set(mx, my, map.cell_at(mx as i32, my as i32).glyph());
        }
    }

    // Player marker wins over the minimap.
    let (px, py) = (player.x.floor(), player.y.floor());
    if px >= 0.0 && py >= 0.0 {
        grid.set(px as usize, py as usize, GLYPH_PLAYER);
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const H: usize = 40;

    fn hit(distance: f32, edge: bool) -> RayHit {
        RayHit { distance, edge, out_of_bounds: false }
    }

    // ── project_span ──

    #[test]
    fn span_straddles_the_horizon() {
        for d in [0.5_f32, 1.0, 2.0, 5.0, 10.0, 19.9] {
            let (ceiling, floor) = project_span(d, H);
            assert!(ceiling <= H as i32 / 2, "ceiling {ceiling} above horizon at d={d}");
            assert!(floor >= H as i32 / 2, "floor {floor} below horizon at d={d}");
            assert_eq!(ceiling + floor, H as i32);
        }
    }

    #[test]
    fn closer_walls_project_taller() {
        let mut last_ceiling = i32::MAX;
        for d in [16.0_f32, 8.0, 4.0, 2.0, 1.0] {
            let (ceiling, _) = project_span(d, H);
            assert!(ceiling < last_ceiling, "span did not grow at d={d}");
            last_ceiling = ceiling;
        }
    }

    #[test]
    fn degenerate_distance_projects_finite_full_span() {
        for d in [0.0_f32, -1.0, f32::MIN_POSITIVE] {
            let (ceiling, floor) = project_span(d, H);
            assert!(ceiling < 0);
            assert!(floor > H as i32);
        }
    }

    // ── wall_glyph ──

    #[test]
    fn shade_tiers_by_distance_fraction() {
        let depth = 20.0;
        assert_eq!(wall_glyph(hit(1.0, false), depth), GLYPH_WALL_NEAR);
        assert_eq!(wall_glyph(hit(5.9, false), depth), GLYPH_WALL_NEAR);
        assert_eq!(wall_glyph(hit(6.1, false), depth), GLYPH_WALL_MID);
        assert_eq!(wall_glyph(hit(11.9, false), depth), GLYPH_WALL_MID);
        assert_eq!(wall_glyph(hit(12.1, false), depth), GLYPH_WALL_FAR);
        assert_eq!(wall_glyph(hit(17.9, false), depth), GLYPH_WALL_FAR);
        assert_eq!(wall_glyph(hit(18.1, false), depth), GLYPH_WALL_FAINT);
        assert_eq!(wall_glyph(hit(19.9, false), depth), GLYPH_WALL_FAINT);
        assert_eq!(wall_glyph(hit(20.0, false), depth), GLYPH_BACKGROUND);
    }

    #[test]
    fn edge_overrides_distance_shade() {
        let depth = 20.0;
        assert_eq!(wall_glyph(hit(1.0, true), depth), GLYPH_WALL_FAINT);
        assert_eq!(wall_glyph(hit(19.0, true), depth), GLYPH_WALL_FAINT);
    }

    #[test]
    fn glyph_is_pure_in_distance_and_edge() {
        let depth = 20.0;
        for &(d, e) in &[(0.5_f32, false), (7.3, false), (13.0, true), (19.0, false)] {
            let a = wall_glyph(hit(d, e), depth);
            let b = wall_glyph(hit(d, e), depth);
            assert_eq!(a, b);
        }
    }

    // ── paint_column ──

    #[test]
    fn column_rows_partition_into_sky_wall_floor() {
        let mut grid = GlyphGrid::new(1, H);
        let span = project_span(4.0, H);
        paint_column(&mut grid, 0, span, GLYPH_WALL_NEAR);
        let (ceiling, floor) = span;
        for y in 0..H {
            let expected = if (y as i32) < ceiling {
                GLYPH_BACKGROUND
            } else if (y as i32) <= floor {
                GLYPH_WALL_NEAR
            } else {
                GLYPH_FLOOR
            };
            assert_eq!(grid.get(0, y), expected, "row {y}");
        }
        // All three bands present at this distance.
        assert_eq!(grid.get(0, 0), GLYPH_BACKGROUND);
        assert_eq!(grid.get(0, H / 2), GLYPH_WALL_NEAR);
        assert_eq!(grid.get(0, H - 1), GLYPH_FLOOR);
    }

    // ── compose ──

    fn test_map() -> TileMap {
        TileMap::parse(&[
            "#####",
            "#P  #",
            "#  E#",
            "#####",
        ])
        .unwrap()
    }

    fn test_player(map: &TileMap) -> Player {
        Player::at_cell(map.spawn_cell(), PI / 4.0, 20.0)
    }

    #[test]
    fn minimap_overwrites_the_view_region() {
        let map = test_map();
        let player = test_player(&map);
        let mut grid = GlyphGrid::new(60, H);
        compose(&mut grid, &map, &player, 0.1);

        // Minimap corners show map glyphs, not projection output.
        assert_eq!(grid.get(0, 0), '#');
        assert_eq!(grid.get(4, 0), '#');
        assert_eq!(grid.get(3, 2), 'E');
        assert_eq!(grid.get(2, 1), ' ');
    }

    #[test]
    fn player_marker_wins_over_the_minimap() {
        let map = test_map();
        let player = test_player(&map);
        let mut grid = GlyphGrid::new(60, H);
        compose(&mut grid, &map, &player, 0.1);
        assert_eq!(grid.get(1, 1), GLYPH_PLAYER);
    }

    #[test]
    fn view_region_outside_minimap_is_painted() {
        let map = test_map();
        let player = test_player(&map);
        let mut grid = GlyphGrid::new(60, H);
        compose(&mut grid, &map, &player, 0.1);

        // Bottom row to the right of the minimap: wall or floor glyph,
        // never an untouched background cell.
        let bottom = grid.get(30, H - 1);
        assert_ne!(bottom, GLYPH_BACKGROUND);
    }

    #[test]
    fn grid_accessors_are_bounds_checked() {
        let mut grid = GlyphGrid::new(4, 3);
        grid.set(100, 100, 'x'); // silently ignored
        assert_eq!(grid.get(100, 100), GLYPH_BACKGROUND);
        grid.set(3, 2, 'y');
        assert_eq!(grid.get(3, 2), 'y');
    }
}
