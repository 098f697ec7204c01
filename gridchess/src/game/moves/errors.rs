use std::fmt::{self, Debug};

use thiserror::Error;

use crate::{board::rectangular::Cell, pieces::PieceId};

/// Reason why a move was rejected.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum InvalidMoveReason {
    /// The piece is not on the board.
    #[error("the piece is not on the board")]
    UnknownPiece,
    /// The destination is not on the board.
    #[error("the destination is out of bounds")]
    OutOfBounds,
    /// The destination is the cell the piece already stands on.
    #[error("the destination is the piece's own cell")]
    SameCell,
    /// A piece of the same team stands on the destination.
    #[error("the destination is occupied by a teammate")]
    OccupiedByTeammate,
    /// The rules collaborator refused the move.
    #[error("the move is not allowed by the rules")]
    RejectedByRules,
}

/// Error returned when a move transaction is rejected. Nothing on the board changes.
#[derive(Error)]
#[error("could not move piece {piece} to {dest}: {reason}")]
pub struct MoveError {
    /// Reason why the move was rejected.
    reason: InvalidMoveReason,

    /// The piece that was to be moved.
    piece: PieceId,

    /// The requested destination.
    dest: Cell,
}

impl Debug for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl MoveError {
    pub(super) fn new(reason: InvalidMoveReason, piece: PieceId, dest: Cell) -> Self {
        Self {
            reason,
            piece,
            dest,
        }
    }

    /// Get the reason the move failed.
    pub fn reason(&self) -> InvalidMoveReason {
        self.reason
    }

    /// Get the piece that was to be moved.
    pub fn piece(&self) -> PieceId {
        self.piece
    }

    /// Get the requested destination.
    pub fn dest(&self) -> Cell {
        self.dest
    }
}
