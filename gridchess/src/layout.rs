//! Mapping between board cells and rendering space.
//!
//! The board lies in the `x`/`z` plane at height `y_offset`, centred on a configurable
//! origin. Cell `x` grows along world `x` and cell `y` grows along world `z`.
use std::fmt;

use crate::board::{
    grid::Grid,
    rectangular::{Cell, RectDimensions},
    Dimensions,
};

/// A point in rendering space.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPoint {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// Placement of the board's cells in rendering space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoardLayout {
    dim: RectDimensions,
    cell_size: f32,
    y_offset: f32,
    origin: WorldPoint,
}

impl BoardLayout {
    /// Lay out `dim` with square cells of `cell_size`, centred on `origin` and raised by
    /// `y_offset`. Panics if `cell_size` is not a positive finite number.
    pub fn new(dim: RectDimensions, cell_size: f32, y_offset: f32, origin: WorldPoint) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "cell size must be positive, got {}",
            cell_size
        );
        Self {
            dim,
            cell_size,
            y_offset,
            origin,
        }
    }

    pub fn dimensions(&self) -> &RectDimensions {
        &self.dim
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World-space offset of the board's `(0, 0)` corner from the origin.
    fn bounds(&self) -> (f32, f32) {
        (
            self.dim.width() as f32 * self.cell_size / 2.0,
            self.dim.height() as f32 * self.cell_size / 2.0,
        )
    }

    /// World-space position of a grid line intersection.
    fn corner(&self, x: usize, y: usize) -> WorldPoint {
        let (bx, bz) = self.bounds();
        WorldPoint {
            x: self.origin.x + x as f32 * self.cell_size - bx,
            y: self.origin.y + self.y_offset,
            z: self.origin.z + y as f32 * self.cell_size - bz,
        }
    }

    /// The centre of `cell` in rendering space.
    /// Panics if the cell is out of bounds.
    pub fn center_of(&self, cell: Cell) -> WorldPoint {
        assert!(
            self.dim.contains(&cell),
            "{:?} is out of bounds for {:?}",
            cell,
            self.dim
        );
        let corner = self.corner(cell.x, cell.y);
        let half = self.cell_size / 2.0;
        WorldPoint {
            x: corner.x + half,
            y: corner.y,
            z: corner.z + half,
        }
    }

    /// The four corners of the tile quad for `cell`, in the order
    /// `(x, y)`, `(x, y + 1)`, `(x + 1, y)`, `(x + 1, y + 1)`.
    /// Panics if the cell is out of bounds.
    pub fn corners_of(&self, cell: Cell) -> [WorldPoint; 4] {
        assert!(
            self.dim.contains(&cell),
            "{:?} is out of bounds for {:?}",
            cell,
            self.dim
        );
        let Cell { x, y } = cell;
        [
            self.corner(x, y),
            self.corner(x, y + 1),
            self.corner(x + 1, y),
            self.corner(x + 1, y + 1),
        ]
    }

    /// The cell under a point of the board plane, ignoring height.
    /// Returns `None` if the point is off the board.
    pub fn cell_at(&self, point: WorldPoint) -> Option<Cell> {
        let (bx, bz) = self.bounds();
        let fx = (point.x - self.origin.x + bx) / self.cell_size;
        let fz = (point.z - self.origin.z + bz) / self.cell_size;
        if !(fx >= 0.0 && fz >= 0.0) {
            return None;
        }
        let cell = Cell::new(fx.floor() as usize, fz.floor() as usize);
        if self.dim.contains(&cell) {
            Some(cell)
        } else {
            None
        }
    }
}

impl Default for BoardLayout {
    /// Standard board with unit cells centred on the world origin.
    fn default() -> Self {
        Self::new(RectDimensions::default(), 1.0, 0.0, WorldPoint::default())
    }
}

/// Registry of presentation objects that stand for cells, such as tile colliders.
///
/// Used only to turn a pointer hit on such an object into a cell.
#[derive(Debug, Clone)]
pub struct TileRegistry<H> {
    tiles: Grid<Option<H>, RectDimensions>,
}

impl<H: PartialEq> TileRegistry<H> {
    /// Create a registry with no tiles registered.
    pub fn new(dim: RectDimensions) -> Self {
        Self {
            tiles: Grid::new(dim),
        }
    }

    /// Register `handle` as the tile of `cell`, returning any handle it replaces.
    /// Panics if the cell is out of bounds.
    pub fn register(&mut self, cell: Cell, handle: H) -> Option<H> {
        self.tiles[cell].replace(handle)
    }

    /// Find the cell whose tile is `handle`.
    pub fn cell_of(&self, handle: &H) -> Option<Cell> {
        self.tiles
            .iter()
            .find(|(_, tile)| tile.as_ref() == Some(handle))
            .map(|(cell, _)| cell)
    }

    /// The tile registered for `cell`, if any.
    pub fn tile(&self, cell: Cell) -> Option<&H> {
        self.tiles.get(cell).and_then(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: WorldPoint, b: WorldPoint) -> bool {
        (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5 && (a.z - b.z).abs() < 1e-5
    }

    #[test]
    fn board_is_centred_on_origin() {
        let layout = BoardLayout::default();
        assert!(close(
            layout.center_of(Cell::new(0, 0)),
            WorldPoint::new(-3.5, 0.0, -3.5)
        ));
        assert!(close(
            layout.center_of(Cell::new(7, 7)),
            WorldPoint::new(3.5, 0.0, 3.5)
        ));
        assert!(close(
            layout.center_of(Cell::new(4, 3)),
            WorldPoint::new(0.5, 0.0, -0.5)
        ));
    }

    #[test]
    fn origin_size_and_offset_apply() {
        let layout = BoardLayout::new(
            RectDimensions::new(2, 2),
            2.0,
            0.25,
            WorldPoint::new(10.0, 1.0, -10.0),
        );
        assert!(close(
            layout.center_of(Cell::new(1, 0)),
            WorldPoint::new(11.0, 1.25, -11.0)
        ));
    }

    #[test]
    fn corners_bound_the_center() {
        let layout = BoardLayout::default();
        let corners = layout.corners_of(Cell::new(2, 5));
        assert!(close(corners[0], WorldPoint::new(-2.0, 0.0, 1.0)));
        assert!(close(corners[1], WorldPoint::new(-2.0, 0.0, 2.0)));
        assert!(close(corners[2], WorldPoint::new(-1.0, 0.0, 1.0)));
        assert!(close(corners[3], WorldPoint::new(-1.0, 0.0, 2.0)));
    }

    #[test]
    fn cell_at_inverts_center_of() {
        let layout = BoardLayout::new(
            RectDimensions::new(8, 8),
            1.5,
            0.2,
            WorldPoint::new(3.0, 0.0, 4.0),
        );
        for cell in layout.dimensions().iter_all() {
            assert_eq!(layout.cell_at(layout.center_of(cell)), Some(cell));
        }
        assert_eq!(layout.cell_at(WorldPoint::new(100.0, 0.0, 4.0)), None);
        assert_eq!(layout.cell_at(WorldPoint::new(-100.0, 0.0, 4.0)), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn center_of_rejects_foreign_cells() {
        BoardLayout::default().center_of(Cell::new(0, 8));
    }

    #[test]
    fn registry_finds_cells_by_handle() {
        let dim = RectDimensions::new(3, 3);
        let mut tiles = TileRegistry::new(dim);
        for cell in dim.iter_all() {
            assert!(tiles.register(cell, cell.label()).is_none());
        }
        assert_eq!(tiles.cell_of(&"X:2, Y:1".to_string()), Some(Cell::new(2, 1)));
        assert_eq!(tiles.cell_of(&"X:9, Y:9".to_string()), None);
        assert_eq!(tiles.tile(Cell::new(0, 2)).map(String::as_str), Some("X:0, Y:2"));
    }
}
