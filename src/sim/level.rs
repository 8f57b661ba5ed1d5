/// Map sources.
///
/// Priority order:
///   1. External map file named in config (`map_file`)
///   2. Built-in embedded maze
///
/// External files are plain text, one glyph row per line:
///   '#' wall, ' ' (or '.') open, 'E' exit (exactly one), 'P' spawn.

use std::error::Error;

use crate::config::GameConfig;
use crate::domain::map::TileMap;

/// The built-in maze. 'P' is the spawn, 'E' the exit at the far corner.
const EMBEDDED_ROWS: [&str; 15] = [
    "####################",
    "#    #             #",
    "#P   #             #",
    "#    #             #",
    "####               #",
    "#          #       #",
    "#                  #",
    "#                  #",
    "#      #############",
    "#         #        #",
    "#         #  ### ###",
    "########     #     #",
    "#         #  # #####",
    "#         #  #     E",
    "####################",
];

/// Load the configured map, or the embedded maze if none is configured.
/// Unreadable or invalid maps are startup-fatal; the caller reports them.
pub fn load_map(config: &GameConfig) -> Result<TileMap, Box<dyn Error>> {
    match &config.map_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read map file {}: {e}", path.display()))?;
            TileMap::parse_str(&text)
                .map_err(|e| format!("invalid map file {}: {e}", path.display()).into())
        }
        None => Ok(TileMap::parse(&EMBEDDED_ROWS)?),
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tile::Tile;

    #[test]
    fn embedded_maze_is_valid() {
        // Parse performs full validation, including exit reachability.
        let map = TileMap::parse(&EMBEDDED_ROWS).unwrap();
        assert_eq!(map.width(), 20);
        assert_eq!(map.height(), 15);
        assert_eq!(map.spawn_cell(), (1, 2));
        assert_eq!(map.cell_at(19, 13), Tile::Exit);
    }

    #[test]
    fn embedded_maze_loads_without_config_override() {
        let config = GameConfig::default();
        let map = load_map(&config).unwrap();
        assert_eq!(map.width(), 20);
    }

    #[test]
    fn missing_map_file_is_an_error() {
        let config = GameConfig {
            map_file: Some("no/such/map.txt".into()),
            ..GameConfig::default()
        };
        let err = load_map(&config).unwrap_err().to_string();
        assert!(err.contains("no/such/map.txt"));
    }
}
