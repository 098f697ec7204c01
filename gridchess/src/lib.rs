//! Logic core of a grid-based board game such as chess.
//!
//! The crate tracks which piece occupies which cell of a fixed grid, follows the
//! pointer across cells, and commits move transactions. It does not implement the
//! rules of any particular game: a [`MoveRules`][game::MoveRules] implementation is
//! consulted before every move is committed.
//!
//! Rendering is kept behind the [`Presentation`][presentation::Presentation] trait. The
//! logic only tells it what changed.
//!
//! ```
//! use gridchess::{
//!     board::{rectangular::Cell, BoardSetup},
//!     game::{move_to, AnyMove},
//! };
//!
//! let mut board = BoardSetup::standard().start();
//! let pawn = board.occupant_at(Cell::new(4, 1)).unwrap().unwrap().id();
//! assert!(move_to(&mut board, &AnyMove, pawn, Cell::new(4, 3)));
//! assert!(board.occupant_at(Cell::new(4, 1)).unwrap().is_none());
//! ```

pub mod board;
pub mod config;
pub mod game;
pub mod layout;
pub mod pieces;
pub mod presentation;
#[cfg(feature = "rng_gen")]
mod rng_gen;
