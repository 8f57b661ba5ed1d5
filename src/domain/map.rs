/// The tile map: an immutable 2D grid of cells, built once at startup.
///
/// ## Fail-closed lookup
///
/// `cell_at` treats every out-of-bounds coordinate as `Wall`. Ray marching
/// and collision both rely on this: nothing ever walks or sees past the
/// border, even on maps without a closed wall ring.
///
/// ## Glyph legend
///   '#' = Wall        ' ' = Open
///   'E' = Exit        'P' = spawn marker (stored as Open)
///
/// ## Validation
///
/// A map is rejected at load time unless it is non-empty, rectangular,
/// contains exactly one exit, and that exit is reachable from the spawn
/// cell by 4-neighbor movement through non-wall cells.

use std::collections::VecDeque;
use std::fmt;

use super::tile::Tile;

#[derive(Debug, PartialEq, Eq)]
pub enum MapError {
    Empty,
    Ragged { row: usize, len: usize, expected: usize },
    UnknownGlyph { row: usize, col: usize, glyph: char },
    NoExit,
    MultipleExits(usize),
    NoOpenCell,
    ExitUnreachable,
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Empty => write!(f, "map has no rows"),
            MapError::Ragged { row, len, expected } => {
                write!(f, "map row {row} has {len} cells, expected {expected}")
            }
            MapError::UnknownGlyph { row, col, glyph } => {
                write!(f, "unknown map glyph {glyph:?} at ({col}, {row})")
            }
            MapError::NoExit => write!(f, "map has no exit ('E') cell"),
            MapError::MultipleExits(n) => write!(f, "map has {n} exit cells, expected exactly 1"),
            MapError::NoOpenCell => write!(f, "map has no open cell to spawn in"),
            MapError::ExitUnreachable => write!(f, "exit is not reachable from the spawn cell"),
        }
    }
}

impl std::error::Error for MapError {}

#[derive(Debug)]
pub struct TileMap {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
    spawn: (usize, usize),
}

impl TileMap {
    /// Parse a map from glyph rows and validate it.
    /// Spawn is the 'P' marker if present, else the first open cell
    /// in row-major order.
    pub fn parse(rows: &[&str]) -> Result<TileMap, MapError> {
        if rows.is_empty() {
            return Err(MapError::Empty);
        }
        let width = rows[0].chars().count();
        if width == 0 {
            return Err(MapError::Empty);
        }
        let height = rows.len();

        let mut cells = Vec::with_capacity(width * height);
        let mut spawn: Option<(usize, usize)> = None;
        let mut exits = 0usize;

        for (y, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(MapError::Ragged { row: y, len, expected: width });
            }
            for (x, ch) in row.chars().enumerate() {
                let tile = match ch {
                    '#' => Tile::Wall,
                    ' ' | '.' => Tile::Open,
                    'E' => {
                        exits += 1;
                        Tile::Exit
                    }
                    'P' => {
                        spawn = Some((x, y));
                        Tile::Open
                    }
                    other => {
                        return Err(MapError::UnknownGlyph { row: y, col: x, glyph: other });
                    }
                };
                cells.push(tile);
            }
        }

        match exits {
            0 => return Err(MapError::NoExit),
            1 => {}
            n => return Err(MapError::MultipleExits(n)),
        }

        let spawn = match spawn {
            Some(s) => s,
            None => cells
                .iter()
                .position(|t| *t == Tile::Open)
                .map(|i| (i % width, i / width))
                .ok_or(MapError::NoOpenCell)?,
        };

        let map = TileMap { width, height, cells, spawn };
        if !map.exit_reachable_from(spawn) {
            return Err(MapError::ExitUnreachable);
        }
        Ok(map)
    }

    /// Parse from a single string, one row per line (as loaded from a file).
    pub fn parse_str(text: &str) -> Result<TileMap, MapError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .filter(|l| !l.is_empty())
            .collect();
        TileMap::parse(&rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Spawn cell from the 'P' marker (or first open cell).
    pub fn spawn_cell(&self) -> (usize, usize) {
        self.spawn
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Tile at cell coordinates. Out-of-bounds reads as `Wall`.
    pub fn cell_at(&self, x: i32, y: i32) -> Tile {
        if self.in_bounds(x, y) {
            self.cells[y as usize * self.width + x as usize]
        } else {
            Tile::Wall
        }
    }

    /// Tile under a continuous position (floored to its cell).
    pub fn cell_at_pos(&self, x: f32, y: f32) -> Tile {
        self.cell_at(x.floor() as i32, y.floor() as i32)
    }

    /// BFS over non-wall cells; true if the exit can be reached from `from`.
    fn exit_reachable_from(&self, from: (usize, usize)) -> bool {
        let mut seen = vec![false; self.width * self.height];
        let mut queue = VecDeque::new();
        seen[from.1 * self.width + from.0] = true;
        queue.push_back((from.0 as i32, from.1 as i32));

        while let Some((x, y)) = queue.pop_front() {
            if self.cell_at(x, y) == Tile::Exit {
                return true;
            }
            for (nx, ny) in [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)] {
                if !self.in_bounds(nx, ny) || self.cell_at(nx, ny).is_solid() {
                    continue;
                }
                let idx = ny as usize * self.width + nx as usize;
                if !seen[idx] {
                    seen[idx] = true;
                    queue.push_back((nx, ny));
                }
            }
        }
        false
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn small_map() -> TileMap {
        TileMap::parse(&[
            "#####",
            "#P  #",
            "# #E#",
            "#####",
        ])
        .unwrap()
    }

    #[test]
    fn parse_dimensions_and_spawn() {
        let map = small_map();
        assert_eq!(map.width(), 5);
        assert_eq!(map.height(), 4);
        assert_eq!(map.spawn_cell(), (1, 1));
    }

    #[test]
    fn cell_lookup() {
        let map = small_map();
        assert_eq!(map.cell_at(0, 0), Tile::Wall);
        assert_eq!(map.cell_at(1, 1), Tile::Open);
        assert_eq!(map.cell_at(3, 2), Tile::Exit);
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let map = small_map();
        assert_eq!(map.cell_at(-1, 0), Tile::Wall);
        assert_eq!(map.cell_at(0, -1), Tile::Wall);
        assert_eq!(map.cell_at(5, 0), Tile::Wall);
        assert_eq!(map.cell_at(0, 4), Tile::Wall);
        assert_eq!(map.cell_at(1000, 1000), Tile::Wall);
    }

    #[test]
    fn position_lookup_floors() {
        let map = small_map();
        assert_eq!(map.cell_at_pos(1.9, 1.9), Tile::Open);
        assert_eq!(map.cell_at_pos(3.5, 2.5), Tile::Exit);
        assert_eq!(map.cell_at_pos(-0.1, 1.0), Tile::Wall);
    }

    #[test]
    fn spawn_defaults_to_first_open_cell() {
        let map = TileMap::parse(&[
            "####",
            "# E#",
            "####",
        ])
        .unwrap();
        assert_eq!(map.spawn_cell(), (1, 1));
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(TileMap::parse(&[]).unwrap_err(), MapError::Empty);
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = TileMap::parse(&["###", "##"]).unwrap_err();
        assert_eq!(err, MapError::Ragged { row: 1, len: 2, expected: 3 });
    }

    #[test]
    fn rejects_unknown_glyph() {
        let err = TileMap::parse(&["#x#"]).unwrap_err();
        assert_eq!(err, MapError::UnknownGlyph { row: 0, col: 1, glyph: 'x' });
    }

    #[test]
    fn rejects_missing_exit() {
        let err = TileMap::parse(&["###", "#P#", "###"]).unwrap_err();
        assert_eq!(err, MapError::NoExit);
    }

    #[test]
    fn rejects_multiple_exits() {
        let err = TileMap::parse(&["#####", "#PEE#", "#####"]).unwrap_err();
        assert_eq!(err, MapError::MultipleExits(2));
    }

    #[test]
    fn rejects_walled_off_exit() {
        let err = TileMap::parse(&[
            "#####",
            "#P#E#",
            "#####",
        ])
        .unwrap_err();
        assert_eq!(err, MapError::ExitUnreachable);
    }

    #[test]
    fn accepts_reachable_exit_around_a_bend() {
        let map = TileMap::parse(&[
            "######",
            "#P # #",
            "#  #E#",
            "#    #",
            "######",
        ]);
        assert!(map.is_ok());
    }

    #[test]
    fn parse_str_handles_crlf_and_blank_lines() {
        let map = TileMap::parse_str("####\r\n#PE#\r\n####\r\n\r\n").unwrap();
        assert_eq!(map.width(), 4);
        assert_eq!(map.height(), 3);
    }
}
