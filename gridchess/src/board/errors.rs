//! Errors used by the `Board` and `BoardSetup`.

use std::fmt::{self, Debug};

use thiserror::Error;

use crate::{
    board::rectangular::{Cell, RectDimensions},
    pieces::{PieceKind, Team},
};

/// Error returned when a cell outside the board is accessed.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("cell {cell} is out of bounds for a {}x{} board", .dim.width(), .dim.height())]
pub struct OutOfBounds {
    /// The cell that was accessed.
    cell: Cell,
    /// Dimensions of the board it was accessed on.
    dim: RectDimensions,
}

impl OutOfBounds {
    pub(crate) fn new(cell: Cell, dim: RectDimensions) -> Self {
        Self { cell, dim }
    }

    /// The cell that was out of bounds.
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// The dimensions of the board.
    pub fn dimensions(&self) -> &RectDimensions {
        &self.dim
    }
}

/// Reason why a piece could not be added during setup.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// The cell is not on the board.
    #[error("the requested cell is out of bounds")]
    OutOfBounds,
    /// Another piece was already set up on the cell.
    #[error("the requested cell was already occupied")]
    AlreadyOccupied,
}

/// Error caused when attempting to set up a piece on an invalid cell.
#[derive(Error)]
#[error("could not place {team} {kind} at {cell}: {reason}")]
pub struct PlaceError {
    #[source]
    reason: CannotPlaceReason,
    kind: PieceKind,
    team: Team,
    cell: Cell,
}

impl Debug for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PlaceError {
    pub(super) fn new(reason: CannotPlaceReason, kind: PieceKind, team: Team, cell: Cell) -> Self {
        Self {
            reason,
            kind,
            team,
            cell,
        }
    }

    /// Get the reason placement was aborted.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }

    /// The kind of piece that was not placed.
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// The team of the piece that was not placed.
    pub fn team(&self) -> Team {
        self.team
    }

    /// The cell where placement was attempted.
    pub fn cell(&self) -> Cell {
        self.cell
    }
}

/// Fatal configuration errors raised while building the initial board or its visuals.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum SetupError {
    /// No template was registered for a piece kind.
    #[error("no template registered for {0}")]
    MissingTemplate(PieceKind),
    /// No material was registered for a team.
    #[error("no material registered for team {0}")]
    MissingMaterial(Team),
    /// The standard layout needs 8 files and at least 4 ranks.
    #[error("standard layout does not fit a {width}x{height} board")]
    LayoutDoesNotFit { width: usize, height: usize },
    /// A piece of the standard layout could not be placed.
    #[error("standard layout could not be placed: {0}")]
    Placement(CannotPlaceReason),
}

impl From<PlaceError> for SetupError {
    fn from(err: PlaceError) -> Self {
        SetupError::Placement(err.reason())
    }
}
