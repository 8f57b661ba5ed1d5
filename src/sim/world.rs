/// WorldState: the complete snapshot of a running game.
///
/// The map is immutable after construction; the player is mutated exactly
/// once per frame by `advance`, before any ray is cast, and is read-only
/// for the rest of the frame.

use crate::config::SpeedConfig;
use crate::domain::map::TileMap;
use crate::domain::player::{MoveInput, Player};
use crate::domain::tile::Tile;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    Won,
}

pub struct WorldState {
    pub map: TileMap,
    pub player: Player,
    pub phase: Phase,
}

impl WorldState {
    /// Spawn the player at the center of the map's spawn cell.
    pub fn new(map: TileMap, fov: f32, view_depth: f32) -> Self {
        let player = Player::at_cell(map.spawn_cell(), fov, view_depth);
        WorldState { map, player, phase: Phase::Running }
    }

    /// One simulation step: movement, then the win check.
    /// Standing in the exit cell ends the game.
    pub fn advance(&mut self, input: MoveInput, dt: f32, speed: &SpeedConfig) {
        if self.phase != Phase::Running {
            return;
        }

        self.player.apply_movement(input, dt, &self.map, speed);

        if self.map.cell_at_pos(self.player.x, self.player.y) == Tile::Exit {
            self.phase = Phase::Won;
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn speed() -> SpeedConfig {
        SpeedConfig { turn_rate: 2.0, move_rate: 3.0 }
    }

    fn forward() -> MoveInput {
        MoveInput { forward: true, ..Default::default() }
    }

    /// 5x5, all wall except a 1-wide corridor (1,1)..(1,3) and exit (1,4).
    fn corridor_world() -> WorldState {
        let map = TileMap::parse(&[
            "#####",
            "#P###",
            "# ###",
            "# ###",
            "#E###",
        ])
        .unwrap();
        let mut world = WorldState::new(map, std::f32::consts::PI / 4.0, 20.0);
        world.player.heading = FRAC_PI_2; // toward +y
        world
    }

    #[test]
    fn walking_the_corridor_to_the_exit_wins() {
        let mut world = corridor_world();
        assert_eq!(world.phase, Phase::Running);

        // 3 units of travel at 3 u/s: 20 frames of 50 ms.
        for _ in 0..20 {
            world.advance(forward(), 0.05, &speed());
        }
        assert_eq!(world.phase, Phase::Won);
    }

    #[test]
    fn no_win_short_of_the_exit() {
        let mut world = corridor_world();
        // 1 unit of travel: still in the corridor.
        for _ in 0..10 {
            world.advance(forward(), 1.0 / 30.0, &speed());
        }
        assert_eq!(world.phase, Phase::Running);
    }

    #[test]
    fn advance_is_a_no_op_after_winning() {
        let mut world = corridor_world();
        for _ in 0..20 {
            world.advance(forward(), 0.05, &speed());
        }
        assert_eq!(world.phase, Phase::Won);
        let (x, y) = (world.player.x, world.player.y);
        world.advance(forward(), 0.05, &speed());
        assert_eq!(world.phase, Phase::Won);
        assert_eq!((x, y), (world.player.x, world.player.y));
    }

    #[test]
    fn spawn_is_cell_center() {
        let world = corridor_world();
        assert_eq!((world.player.x, world.player.y), (1.5, 1.5));
    }
}
