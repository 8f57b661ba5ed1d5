/// Tile kinds and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Wall,
    Open,
    Exit,
}

impl Tile {
    /// Does this tile block movement and view rays?
    pub fn is_solid(self) -> bool {
        matches!(self, Tile::Wall)
    }

    /// Glyph used on the minimap overlay.
    pub fn glyph(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Open => ' ',
            Tile::Exit => 'E',
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Open
    }
}
