//! Everything that happens on a board after setup.
//!
//! [`hover`] tracks the cell under the pointer from tick to tick.
//!
//! [`moves`] validates and commits move transactions, asking a [`MoveRules`] hook
//! before anything changes.
//!
//! [`session`] ties both to a [`Presentation`][crate::presentation::Presentation] for
//! front-ends that drag pieces around with a pointer.

pub mod hover;
pub mod moves;
pub mod session;

pub use self::{
    hover::{HoverChange, HoverTracker},
    moves::{
        check_move, move_to, try_move, AnyMove, InvalidMoveReason, MoveError, MoveOutcome,
        MoveRules,
    },
    session::{Drag, DragResult, Session},
};
