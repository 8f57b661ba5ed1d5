/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Structs ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub view: ViewConfig,
    pub speed: SpeedConfig,
    pub gamepad: GamepadConfig,
    /// Optional external map file; the embedded maze is used when unset.
    pub map_file: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct ViewConfig {
    /// 3D view width in glyph columns.
    pub screen_w: usize,
    /// 3D view height in glyph rows.
    pub screen_h: usize,
    /// Field of view in radians (configured in degrees).
    pub fov: f32,
    /// Max ray travel distance, in map-cell units.
    pub view_depth: f32,
    /// Ray marching increment, in map-cell units.
    pub ray_step: f32,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    /// Turn rate in radians per second.
    pub turn_rate: f32,
    /// Walk rate in cell units per second.
    pub move_rate: f32,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub quit: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            view: ViewConfig {
                screen_w: default_screen_w(),
                screen_h: default_screen_h(),
                fov: default_fov_degrees().to_radians(),
                view_depth: default_view_depth(),
                ray_step: default_ray_step(),
            },
            speed: SpeedConfig {
                turn_rate: default_turn_rate(),
                move_rate: default_move_rate(),
            },
            gamepad: GamepadConfig { quit: default_gp_quit() },
            map_file: None,
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    view: TomlView,
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlView {
    #[serde(default = "default_screen_w")]
    width: usize,
    #[serde(default = "default_screen_h")]
    height: usize,
    #[serde(default = "default_fov_degrees")]
    fov_degrees: f32,
    #[serde(default = "default_view_depth")]
    view_depth: f32,
    #[serde(default = "default_ray_step")]
    ray_step: f32,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_turn_rate")]
    turn_rate: f32,
    #[serde(default = "default_move_rate")]
    move_rate: f32,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_gp_quit")]
    quit: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGeneral {
    /// Relative paths are resolved against the config search dirs.
    map_file: Option<String>,
}

// ── Defaults ──

fn default_screen_w() -> usize { 120 }
fn default_screen_h() -> usize { 40 }
fn default_fov_degrees() -> f32 { 45.0 }
fn default_view_depth() -> f32 { 20.0 }
fn default_ray_step() -> f32 { 0.1 }

fn default_turn_rate() -> f32 { 2.0 }
fn default_move_rate() -> f32 { 3.0 }

fn default_gp_quit() -> Vec<String> { vec!["Select".into()] }

impl Default for TomlView {
    fn default() -> Self {
        TomlView {
            width: default_screen_w(),
            height: default_screen_h(),
            fov_degrees: default_fov_degrees(),
            view_depth: default_view_depth(),
            ray_step: default_ray_step(),
        }
    }
}

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            turn_rate: default_turn_rate(),
            move_rate: default_move_rate(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad { quit: default_gp_quit() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) XDG data dir. Missing file or keys fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);

        let map_file = toml_cfg.general.map_file.as_ref().map(|name| {
            let p = PathBuf::from(name);
            if p.is_absolute() {
                p
            } else {
                search_dirs.iter()
                    .map(|d| d.join(name))
                    .find(|c| c.is_file())
                    .unwrap_or(p)
            }
        });

        GameConfig {
            view: ViewConfig {
                screen_w: toml_cfg.view.width.max(1),
                screen_h: toml_cfg.view.height.max(2),
                fov: toml_cfg.view.fov_degrees.to_radians(),
                view_depth: toml_cfg.view.view_depth,
                ray_step: toml_cfg.view.ray_step,
            },
            speed: SpeedConfig {
                turn_rate: toml_cfg.speed.turn_rate,
                move_rate: toml_cfg.speed.move_rate,
            },
            gamepad: GamepadConfig { quit: toml_cfg.gamepad.quit },
            map_file,
        }
    }
}

/// Candidate directories to search: exe dir + CWD + XDG data dir.
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        // Resolve symlinks so an installed binary still finds its data.
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/glyphcaster");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
