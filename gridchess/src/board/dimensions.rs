use std::{fmt::Debug, hash::Hash};

/// Trait for coordinates used in [`Dimensions`].
/// Requires [`Debug`] to enable certain common panic messages on misuse.
/// Coordinates are treated as disposable and cheaply copyable.
pub trait Coordinate: Debug + Copy + Eq + Hash {}

/// Dimensions of a board.
/// Implements methods needed for the board to check bounds and linearize indexes.
pub trait Dimensions: Debug {
    /// The type used to identify cells on the board.
    type Coordinate: Coordinate;

    /// Compute the total size of the dimensions. Used to allocate storage for the board.
    fn total_size(&self) -> usize;

    /// Convert a coordinate to a linear index within this dimension.
    /// Panics if the coordinate is out of range for the dimension.
    fn linearize(&self, coord: &Self::Coordinate) -> usize {
        match self.try_linearize(coord) {
            Some(v) => v,
            None => panic!("{:?} is out of bounds for {:?}", coord, self),
        }
    }

    /// Convert a coordinate to a linear index within this dimension.
    /// Returns `None` if the coordinate is out of bound for the dimension.
    fn try_linearize(&self, coord: &Self::Coordinate) -> Option<usize>;

    /// Get back a coordinate from a linearized index. Panic if idx is >= total_size.
    fn un_linearize(&self, idx: usize) -> Self::Coordinate;

    /// Returns true if the coordinate lies within these dimensions.
    fn contains(&self, coord: &Self::Coordinate) -> bool {
        self.try_linearize(coord).is_some()
    }

    /// Iterate every coordinate in linear order.
    fn iter_all(&self) -> AllCoords<'_, Self>
    where
        Self: Sized,
    {
        AllCoords { dim: self, idx: 0 }
    }
}

/// Iterator over every coordinate of some [`Dimensions`], in linearized order.
#[derive(Debug)]
pub struct AllCoords<'a, D> {
    dim: &'a D,
    idx: usize,
}

impl<'a, D: Dimensions> Iterator for AllCoords<'a, D> {
    type Item = D::Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx < self.dim.total_size() {
            let coord = self.dim.un_linearize(self.idx);
            self.idx += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dim.total_size().saturating_sub(self.idx);
        (remaining, Some(remaining))
    }
}

impl<'a, D: Dimensions> ExactSizeIterator for AllCoords<'a, D> {}
