/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::error::Error;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use domain::player::MoveInput;
use sim::frame::{self, GlyphGrid};
use sim::level;
use sim::world::{Phase, WorldState};
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

/// Upper bound on a single frame's dt. A stalled frame (suspend, debugger)
/// would otherwise translate far enough to step across a thin wall.
const MAX_DT: f32 = 0.25;

const STATUS_BAR: &str = " ←/→ or a/d turn   ↑/↓ or w/s walk   q/ESC quit";

// ── Key Constants ──

const KEYS_TURN_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_TURN_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_FORWARD: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_BACKWARD: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

fn main() {
    let config = GameConfig::load();

    let map = match level::load_map(&config) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Map load failed: {e}");
            std::process::exit(1);
        }
    };

    let mut world = WorldState::new(map, config.view.fov, config.view.view_depth);

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        std::process::exit(1);
    }

    let result = game_loop(&mut world, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
        std::process::exit(1);
    }

    println!();
    match world.phase {
        Phase::Won => println!("You found the exit. Thanks for playing Glyphcaster!"),
        Phase::Running => println!("Thanks for playing Glyphcaster!"),
    }
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<(), Box<dyn Error>> {
    let mut kb = InputState::new();
    kb.honor_release = renderer.release_events_supported();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);

    let mut grid = GlyphGrid::new(config.view.screen_w, config.view.screen_h);
    let mut last_frame = Instant::now();

    loop {
        kb.drain_events();
        gp.update();

        if kb.ctrl_c_pressed() || kb.any_pressed(KEYS_QUIT) || gp.quit_pressed() {
            break;
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32().min(MAX_DT);
        last_frame = now;

        // Movement fully completes before any ray is cast for this frame.
        world.advance(detect_movement(&kb, &gp), dt, &config.speed);

        frame::compose(&mut grid, &world.map, &world.player, config.view.ray_step);
        renderer.present(&grid, STATUS_BAR)?;

        // The winning frame is still presented above before the loop ends.
        if world.phase == Phase::Won {
            break;
        }

        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

fn detect_movement(kb: &InputState, gp: &GamepadState) -> MoveInput {
    let keys = MoveInput {
        turn_left: kb.any_held(KEYS_TURN_LEFT),
        turn_right: kb.any_held(KEYS_TURN_RIGHT),
        forward: kb.any_held(KEYS_FORWARD),
        backward: kb.any_held(KEYS_BACKWARD),
    };
    let pad = MoveInput {
        turn_left: gp.left_held(),
        turn_right: gp.right_held(),
        forward: gp.up_held(),
        backward: gp.down_held(),
    };
    keys.merge(pad)
}
