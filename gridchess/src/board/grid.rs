//! Defines the dense per-cell storage shared by the board state and the tile registry.

use std::{
    borrow::Borrow,
    ops::{Index, IndexMut},
};

use crate::board::Dimensions;

/// Dense storage of one `T` per cell of some [`Dimensions`].
#[derive(Debug, Clone)]
pub(crate) struct Grid<T, D> {
    /// Dimensions of this grid.
    pub(crate) dim: D,
    /// Cells that make up this grid, in linearized order.
    pub(crate) cells: Box<[T]>,
}

impl<T: Default, D: Dimensions> Grid<T, D> {
    pub(crate) fn new(dim: D) -> Self {
        let cells = (0..dim.total_size()).map(|_| Default::default()).collect();
        Self { dim, cells }
    }
}

impl<T, D: Dimensions> Grid<T, D> {
    /// Get a reference to the cell at the given coordinate.
    pub(crate) fn get<B: Borrow<D::Coordinate>>(&self, coord: B) -> Option<&T> {
        self.dim
            .try_linearize(coord.borrow())
            .and_then(|i| self.cells.get(i))
    }

    /// Get a mutable reference to the cell at the given coordinate.
    pub(crate) fn get_mut<B: Borrow<D::Coordinate>>(&mut self, coord: B) -> Option<&mut T> {
        self.dim
            .try_linearize(coord.borrow())
            .and_then(move |i| self.cells.get_mut(i))
    }

    /// Iterate all cells along with their coordinates, in linearized order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (D::Coordinate, &T)> {
        let dim = &self.dim;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (dim.un_linearize(i), cell))
    }
}

impl<T, D: Dimensions, B: Borrow<D::Coordinate>> Index<B> for Grid<T, D> {
    type Output = T;

    fn index(&self, coord: B) -> &Self::Output {
        self.get(coord).expect("coordinate out of bounds")
    }
}

impl<T, D: Dimensions, B: Borrow<D::Coordinate>> IndexMut<B> for Grid<T, D> {
    fn index_mut(&mut self, coord: B) -> &mut Self::Output {
        self.get_mut(coord).expect("coordinate out of bounds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::rectangular::{Cell, RectDimensions};

    #[test]
    fn get_is_none_out_of_bounds() {
        let grid: Grid<Option<u8>, _> = Grid::new(RectDimensions::new(2, 2));
        assert_eq!(grid.get(Cell::new(1, 1)), Some(&None));
        assert!(grid.get(Cell::new(2, 1)).is_none());
    }

    #[test]
    fn index_mut_writes_through() {
        let mut grid: Grid<Option<u8>, _> = Grid::new(RectDimensions::new(2, 2));
        grid[Cell::new(0, 1)] = Some(4);
        assert_eq!(grid[&Cell::new(0, 1)], Some(4));
        let filled: Vec<Cell> = grid
            .iter()
            .filter(|(_, v)| v.is_some())
            .map(|(c, _)| c)
            .collect();
        assert_eq!(filled, vec![Cell::new(0, 1)]);
    }

    #[test]
    #[should_panic(expected = "coordinate out of bounds")]
    fn index_panics_out_of_bounds() {
        let grid: Grid<Option<u8>, _> = Grid::new(RectDimensions::new(2, 2));
        let _ = grid[Cell::new(5, 5)];
    }
}
