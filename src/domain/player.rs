/// Player state and the per-frame movement step.
///
/// Position is continuous, in map-cell units. Heading 0 points along +x;
/// positive turn is clockwise on the map (toward +y).
///
/// ## Collision policy
///
/// A translation is applied, then the candidate position's floored cell is
/// checked; if it is a wall the whole translation is reverted. The check
/// samples a single cell, so a very large dt can step across a thin wall,
/// and grazing a block corner is possible. Accepted behavior, kept as-is.

use crate::config::SpeedConfig;

use super::map::TileMap;

/// The four held directional signals, sampled once per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub forward: bool,
    pub backward: bool,
}

impl MoveInput {
    /// OR-combine two sources (keyboard and gamepad).
    pub fn merge(self, other: MoveInput) -> MoveInput {
        MoveInput {
            turn_left: self.turn_left || other.turn_left,
            turn_right: self.turn_right || other.turn_right,
            forward: self.forward || other.forward,
            backward: self.backward || other.backward,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Heading angle in radians, 0 = +x axis.
    pub heading: f32,
    /// Field of view in radians, split evenly across screen columns.
    pub fov: f32,
    /// Max ray travel distance, in cell units.
    pub view_depth: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, fov: f32, view_depth: f32) -> Self {
        Player { x, y, heading: 0.0, fov, view_depth }
    }

    /// Spawn at the center of a map cell.
    pub fn at_cell(cell: (usize, usize), fov: f32, view_depth: f32) -> Self {
        Player::new(cell.0 as f32 + 0.5, cell.1 as f32 + 0.5, fov, view_depth)
    }

    /// Apply one frame of turning and translation.
    ///
    /// Forward and backward are checked independently, each against the
    /// map with whole-step rejection. Movement must fully complete before
    /// any ray is cast for the frame.
    pub fn apply_movement(&mut self, input: MoveInput, dt: f32, map: &TileMap, speed: &SpeedConfig) {
        if input.turn_left {
            self.heading -= speed.turn_rate * dt;
        }
        if input.turn_right {
            self.heading += speed.turn_rate * dt;
        }

        if input.forward {
            self.translate(speed.move_rate * dt, map);
        }
        if input.backward {
            self.translate(-speed.move_rate * dt, map);
        }
    }

    fn translate(&mut self, dist: f32, map: &TileMap) {
        let dx = self.heading.cos() * dist;
        let dy = self.heading.sin() * dist;
        let nx = self.x + dx;
        let ny = self.y + dy;
        if !map.cell_at_pos(nx, ny).is_solid() {
            self.x = nx;
            self.y = ny;
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    fn speed() -> SpeedConfig {
        SpeedConfig { turn_rate: 2.0, move_rate: 3.0 }
    }

    fn room() -> TileMap {
        TileMap::parse(&[
            "#####",
            "#   #",
            "#   #",
            "#  E#",
            "#####",
        ])
        .unwrap()
    }

    fn player_at(x: f32, y: f32, heading: f32) -> Player {
        let mut p = Player::new(x, y, PI / 4.0, 20.0);
        p.heading = heading;
        p
    }

    #[test]
    fn turning_adjusts_heading_by_rate_times_dt() {
        let map = room();
        let mut p = player_at(2.5, 2.5, 0.0);
        let input = MoveInput { turn_right: true, ..Default::default() };
        p.apply_movement(input, 0.5, &map, &speed());
        assert!((p.heading - 1.0).abs() < 1e-6);

        let input = MoveInput { turn_left: true, ..Default::default() };
        p.apply_movement(input, 0.25, &map, &speed());
        assert!((p.heading - 0.5).abs() < 1e-6);
    }

    #[test]
    fn forward_moves_along_heading() {
        let map = room();
        let mut p = player_at(1.5, 1.5, 0.0);
        let input = MoveInput { forward: true, ..Default::default() };
        p.apply_movement(input, 0.1, &map, &speed());
        assert!((p.x - 1.8).abs() < 1e-6);
        assert!((p.y - 1.5).abs() < 1e-6);
    }

    #[test]
    fn backward_moves_against_heading() {
        let map = room();
        let mut p = player_at(2.5, 1.5, 0.0);
        let input = MoveInput { backward: true, ..Default::default() };
        p.apply_movement(input, 0.1, &map, &speed());
        assert!((p.x - 2.2).abs() < 1e-6);
    }

    #[test]
    fn step_into_wall_is_fully_rejected() {
        let map = room();
        // Facing the east wall from just inside it.
        let mut p = player_at(3.9, 2.5, 0.0);
        let input = MoveInput { forward: true, ..Default::default() };
        p.apply_movement(input, 0.1, &map, &speed());
        // Not clamped to the boundary: the whole step is reverted.
        assert!((p.x - 3.9).abs() < 1e-6);
        assert!((p.y - 2.5).abs() < 1e-6);
    }

    #[test]
    fn movement_never_lands_in_a_wall_cell() {
        let map = room();
        // Sweep headings and dt values from several open positions.
        for &(sx, sy) in &[(1.5_f32, 1.5_f32), (2.5, 2.5), (3.5, 1.2), (1.2, 3.5)] {
            for i in 0..64 {
                let heading = i as f32 / 64.0 * TAU;
                for &dt in &[0.01_f32, 0.05, 0.1, 0.25] {
                    let mut p = player_at(sx, sy, heading);
                    let input = MoveInput { forward: true, ..Default::default() };
                    p.apply_movement(input, dt, &map, &speed());
                    assert!(
                        !map.cell_at_pos(p.x, p.y).is_solid(),
                        "landed in wall from ({sx}, {sy}) heading {heading} dt {dt}"
                    );
                }
            }
        }
    }

    #[test]
    fn exit_cell_is_enterable() {
        let map = room();
        let mut p = player_at(3.5, 2.8, FRAC_PI_2);
        let input = MoveInput { forward: true, ..Default::default() };
        p.apply_movement(input, 0.3, &map, &speed());
        assert!(p.y > 3.0);
        assert_eq!(map.cell_at_pos(p.x, p.y), crate::domain::tile::Tile::Exit);
    }

    #[test]
    fn opposed_inputs_cancel() {
        let map = room();
        let mut p = player_at(2.5, 2.5, 0.3);
        let input = MoveInput {
            forward: true,
            backward: true,
            turn_left: true,
            turn_right: true,
        };
        p.apply_movement(input, 0.1, &map, &speed());
        assert!((p.x - 2.5).abs() < 1e-5);
        assert!((p.y - 2.5).abs() < 1e-5);
        assert!((p.heading - 0.3).abs() < 1e-6);
    }
}
