/// Gamepad input tracker using gilrs.
///
/// D-pad / left stick turn and walk; the quit button list comes from
/// config.toml. Default mapping:
///   D-pad / Left Stick left-right  →  Turn
///   D-pad / Left Stick up-down     →  Walk forward / backward
///   Select                         →  Quit
///
/// With the `gamepad` feature disabled this compiles to an inert stub.

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;

const STICK_DEADZONE: f32 = 0.25;

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
enum Btn {
    A,
    B,
    X,
    Y,
    Start,
    Select,
}

impl Btn {
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH" => Some(Btn::A),
            "B" | "EAST" => Some(Btn::B),
            "X" | "WEST" => Some(Btn::X),
            "Y" | "NORTH" => Some(Btn::Y),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South => Some(Btn::A),
            Button::East => Some(Btn::B),
            Button::West => Some(Btn::X),
            Button::North => Some(Btn::Y),
            Button::Start => Some(Btn::Start),
            Button::Select => Some(Btn::Select),
            _ => None,
        }
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    // D-pad held state
    dpad_left: bool,
    dpad_right: bool,
    dpad_up: bool,
    dpad_down: bool,

    // Left stick position
    stick_x: f32,
    stick_y: f32,

    // Quit button, edge-triggered this frame
    quit_edge: bool,
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    quit_btns: Vec<Btn>,
}

impl GamepadState {
    pub fn new() -> Self {
        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: Gilrs::new().ok(),
            dpad_left: false,
            dpad_right: false,
            dpad_up: false,
            dpad_down: false,
            stick_x: 0.0,
            stick_y: 0.0,
            quit_edge: false,
            quit_btns: vec![Btn::Select],
        }
    }

    /// Load button names from config (unknown names are ignored).
    pub fn load_button_config(&mut self, config: &GamepadConfig) {
        #[cfg(feature = "gamepad")]
        {
            let btns: Vec<Btn> = config.quit.iter().filter_map(|s| Btn::from_name(s)).collect();
            if !btns.is_empty() {
                self.quit_btns = btns;
            }
        }
        #[cfg(not(feature = "gamepad"))]
        let _ = config;
    }

    /// Pump pending gamepad events. Call once per frame.
    #[cfg(feature = "gamepad")]
    pub fn update(&mut self) {
        self.quit_edge = false;
        let gilrs = match self.gilrs.as_mut() {
            Some(g) => g,
            None => return,
        };

        while let Some(ev) = gilrs.next_event() {
            match ev.event {
                EventType::ButtonPressed(btn, _) => {
                    match btn {
                        Button::DPadLeft => self.dpad_left = true,
                        Button::DPadRight => self.dpad_right = true,
                        Button::DPadUp => self.dpad_up = true,
                        Button::DPadDown => self.dpad_down = true,
                        _ => {
                            if let Some(b) = Btn::from_gilrs(btn) {
                                if self.quit_btns.contains(&b) {
                                    self.quit_edge = true;
                                }
                            }
                        }
                    }
                }
                EventType::ButtonReleased(btn, _) => match btn {
                    Button::DPadLeft => self.dpad_left = false,
                    Button::DPadRight => self.dpad_right = false,
                    Button::DPadUp => self.dpad_up = false,
                    Button::DPadDown => self.dpad_down = false,
                    _ => {}
                },
                EventType::AxisChanged(axis, value, _) => match axis {
                    Axis::LeftStickX => self.stick_x = value,
                    Axis::LeftStickY => self.stick_y = value,
                    _ => {}
                },
                _ => {}
            }
        }
    }

    #[cfg(not(feature = "gamepad"))]
    pub fn update(&mut self) {
        self.quit_edge = false;
    }

    // ── Held queries (d-pad or stick past the deadzone) ──

    pub fn left_held(&self) -> bool {
        self.dpad_left || self.stick_x < -STICK_DEADZONE
    }

    pub fn right_held(&self) -> bool {
        self.dpad_right || self.stick_x > STICK_DEADZONE
    }

    /// Stick Y is positive-up in gilrs.
    pub fn up_held(&self) -> bool {
        self.dpad_up || self.stick_y > STICK_DEADZONE
    }

    pub fn down_held(&self) -> bool {
        self.dpad_down || self.stick_y < -STICK_DEADZONE
    }

    pub fn quit_pressed(&self) -> bool {
        self.quit_edge
    }
}
