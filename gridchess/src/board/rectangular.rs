//! Implements the rectangular board used for chess-like games.
use std::borrow::Borrow;

use crate::board::Dimensions;

pub use crate::board::common::Cell;

/// Width and height of a standard chess board.
pub const STANDARD_SIZE: usize = 8;

/// Simple rectangular dimensions.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RectDimensions {
    /// Width of the board. This cooresponds to the `x` of a [`Cell`].
    width: usize,
    /// Height of the board. This cooresponds to the `y` of a [`Cell`].
    height: usize,
}

impl RectDimensions {
    /// Create new [`RectDimensions`] with the specified width and height.
    /// Panics if `width * height` exceeds `usize::max_value()` or if `width` or `height` is 0.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Some(dim) => dim,
            None => {
                if width == 0 || height == 0 {
                    panic!("RectDimensions must be nonzero, got {}x{}", width, height);
                } else {
                    panic!(
                        "RectDimensions too large: {} * {} > {}",
                        width,
                        height,
                        usize::max_value()
                    );
                }
            }
        }
    }

    /// Create new [`RectDimensions`] with the specified width and height.
    /// Returns `None` if `width * height` exceeds `usize::max_value()` or if `width` or `height`
    /// is 0.
    pub fn try_new(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            width
                .checked_mul(height)
                .map(|_| Self { width, height })
        }
    }

    /// Get the width of these [`RectDimensions`].
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of these [`RectDimensions`].
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get an iterator over rows of this grid. Each row is an iterator over the cells of
    /// that row.
    pub fn iter_coordinates(&self) -> impl Iterator<Item = impl Iterator<Item = Cell>> {
        let width = self.width;
        (0..self.height).map(move |y| (0..width).map(move |x| Cell { x, y }))
    }

    /// Check if the given [`Cell`] is in bounds for these [`RectDimensions`]. If so, return
    /// it, otherwise return `None`.
    #[inline]
    fn check_bounds<B: Borrow<Cell>>(&self, cell: B) -> Option<B> {
        let c = cell.borrow();
        if c.x < self.width && c.y < self.height {
            Some(cell)
        } else {
            None
        }
    }
}

impl Dimensions for RectDimensions {
    type Coordinate = Cell;

    /// Compute the linear total size of these [`Dimensions`].
    fn total_size(&self) -> usize {
        self.width * self.height
    }

    /// Convert a cell to a linear index within this dimension.
    /// Returns `None` if the cell is out of range for the dimension.
    fn try_linearize(&self, cell: &Cell) -> Option<usize> {
        self.check_bounds(cell).map(|cell| cell.y * self.width + cell.x)
    }

    /// Convert a linear index back into a [`Cell`].
    fn un_linearize(&self, idx: usize) -> Cell {
        assert!(
            idx < self.total_size(),
            "index {} is out of bounds for {:?}",
            idx,
            self
        );
        Cell {
            x: idx % self.width,
            y: idx / self.width,
        }
    }
}

impl Default for RectDimensions {
    /// Construct the default rectangular dimensions, a standard 8x8 board.
    fn default() -> Self {
        Self {
            width: STANDARD_SIZE,
            height: STANDARD_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(RectDimensions::try_new(0, 8), None);
        assert_eq!(RectDimensions::try_new(8, 0), None);
        assert_eq!(RectDimensions::try_new(usize::max_value(), 2), None);
    }

    #[test]
    #[should_panic(expected = "must be nonzero")]
    fn new_panics_on_zero() {
        RectDimensions::new(0, 0);
    }

    #[test]
    fn linearize_round_trips() {
        let dim = RectDimensions::new(8, 8);
        for (idx, cell) in dim.iter_all().enumerate() {
            assert_eq!(dim.linearize(&cell), idx);
        }
        assert_eq!(dim.un_linearize(9), Cell::new(1, 1));
    }

    #[test]
    fn bounds_are_exclusive() {
        let dim = RectDimensions::new(3, 2);
        assert!(dim.contains(&Cell::new(2, 1)));
        assert!(!dim.contains(&Cell::new(3, 0)));
        assert!(!dim.contains(&Cell::new(0, 2)));
        assert_eq!(dim.try_linearize(&Cell::new(3, 0)), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn linearize_panics_out_of_bounds() {
        RectDimensions::default().linearize(&Cell::new(8, 0));
    }

    #[test]
    fn rows_cover_the_grid() {
        let dim = RectDimensions::new(3, 2);
        let rows: Vec<Vec<Cell>> = dim.iter_coordinates().map(|r| r.collect()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec![Cell::new(0, 1), Cell::new(1, 1), Cell::new(2, 1)]);
        assert_eq!(dim.iter_all().len(), 6);
    }
}
