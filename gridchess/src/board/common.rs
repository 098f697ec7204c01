//! Coordinate types shared by the board and the layout helpers.

pub use self::cell::Cell;

mod cell;
