use std::fmt;

use crate::board::Coordinate;

/// The coordinates of a single square of the board.
///
/// There is no "no cell" value. Places where a cell may be absent, such as the hover
/// state or the result of a hit test, use `Option<Cell>` instead.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Cell {
    /// Horizontal position of the cell (file).
    pub x: usize,
    /// Vertical position of the cell (rank).
    pub y: usize,
}

impl Cell {
    /// Construct a [`Cell`] from the given `x` and `y`.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Name of the tile at this cell, in the `X:{x}, Y:{y}` form used for tile objects.
    pub fn label(&self) -> String {
        format!("X:{}, Y:{}", self.x, self.y)
    }
}

impl Coordinate for Cell {}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Cell {
    /// Construct a [`Cell`] from the given `(x, y)` pair.
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl From<Cell> for (usize, usize) {
    /// Convert the [`Cell`] into an `(x, y)` pair.
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_matches_tile_names() {
        assert_eq!(Cell::new(3, 7).label(), "X:3, Y:7");
    }

    #[test]
    fn converts_from_pairs() {
        let cell: Cell = (2, 5).into();
        assert_eq!(cell, Cell::new(2, 5));
        let pair: (usize, usize) = cell.into();
        assert_eq!(pair, (2, 5));
    }
}
