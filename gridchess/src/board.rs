//! Types that make up the game board.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::pieces::{Piece, PieceId, PieceKind, Team};

use self::{
    grid::Grid,
    rectangular::{Cell, RectDimensions},
};
pub use self::{
    dimensions::{AllCoords, Coordinate, Dimensions},
    errors::{CannotPlaceReason, OutOfBounds, PlaceError, SetupError},
    setup::{spawn_visuals, AssetCatalog, BoardSetup},
};

pub mod common;
mod dimensions;
mod errors;
pub(crate) mod grid;
pub mod rectangular;
pub mod setup;

/// Handle to a piece that allows getting information about it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PieceRef<'a> {
    /// ID of the piece.
    id: PieceId,

    /// The piece record in the board's roster.
    piece: &'a Piece,
}

impl<'a> PieceRef<'a> {
    /// Get the ID of the piece.
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Get the kind of the piece.
    pub fn kind(&self) -> PieceKind {
        self.piece.kind
    }

    /// Get the team of the piece.
    pub fn team(&self) -> Team {
        self.piece.team
    }

    /// Get the cell the piece stands on.
    pub fn position(&self) -> Cell {
        self.piece.position
    }
}

/// A piece that was removed from the board because another piece was put on its cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Displaced {
    /// The id the piece had while it was on the board.
    pub id: PieceId,
    /// The piece record, with `position` set to the cell it was removed from.
    pub piece: Piece,
}

/// The occupancy state of the board: which piece stands on which cell.
///
/// Cells hold [`PieceId`]s. The piece records live in a roster next to the grid and
/// every record's `position` always names the single cell that holds its id.
#[derive(Debug, Clone)]
pub struct Board {
    /// Grid of cells occupied by pieces.
    grid: Grid<Option<PieceId>, RectDimensions>,

    /// All pieces currently on the board.
    pieces: HashMap<PieceId, Piece>,

    /// Id that will be issued to the next placed piece.
    next_id: u32,
}

impl Board {
    /// Construct an empty board with the given dimensions.
    pub fn new(dim: RectDimensions) -> Self {
        Self {
            grid: Grid::new(dim),
            pieces: HashMap::new(),
            next_id: 0,
        }
    }

    /// Get the [`RectDimensions`] of this [`Board`].
    pub fn dimensions(&self) -> &RectDimensions {
        &self.grid.dim
    }

    /// Number of pieces on the board.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Returns true if no pieces are on the board.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Checks that `cell` lies on the board.
    pub fn check_bounds(&self, cell: Cell) -> Result<(), OutOfBounds> {
        if self.grid.dim.contains(&cell) {
            Ok(())
        } else {
            Err(OutOfBounds::new(cell, self.grid.dim))
        }
    }

    /// Get the piece standing on `cell`, if any. Fails if the cell is not on the board.
    pub fn occupant_at(&self, cell: Cell) -> Result<Option<PieceRef<'_>>, OutOfBounds> {
        match self.grid.get(cell) {
            None => Err(OutOfBounds::new(cell, self.grid.dim)),
            Some(slot) => Ok(slot.map(|id| self.piece_ref(id))),
        }
    }

    /// Get the piece with the specified ID if it is on the board.
    pub fn piece(&self, id: PieceId) -> Option<PieceRef<'_>> {
        self.pieces.get_key_value(&id).map(|(&id, piece)| PieceRef { id, piece })
    }

    /// Get an iterator over all pieces on the board, in no particular order.
    pub fn iter_pieces(&self) -> impl Iterator<Item = PieceRef<'_>> {
        self.pieces
            .iter()
            .map(|(&id, piece)| PieceRef { id, piece })
    }

    /// Get an iterator over the pieces of one team, in no particular order.
    pub fn pieces_of(&self, team: Team) -> impl Iterator<Item = PieceRef<'_>> {
        self.iter_pieces().filter(move |piece| piece.team() == team)
    }

    /// Get an iterator over the rows of the board, starting from `y == 0`. Each row is an
    /// iterator over the occupant of each cell in that row.
    pub fn iter_rows<'a>(
        &'a self,
    ) -> impl 'a + Iterator<Item = impl 'a + Iterator<Item = Option<PieceRef<'a>>>> {
        self.grid.dim.iter_coordinates().map(move |row| {
            row.map(move |cell| self.grid[cell].map(|id| self.piece_ref(id)))
        })
    }

    /// Put a new piece on `cell` unconditionally and return its id.
    ///
    /// If the cell was occupied, the previous occupant is taken off the board and
    /// returned so that the caller can dispose of it.
    pub fn place(
        &mut self,
        kind: PieceKind,
        team: Team,
        cell: Cell,
    ) -> Result<(PieceId, Option<Displaced>), OutOfBounds> {
        let dim = self.grid.dim;
        let slot = match self.grid.get_mut(cell) {
            Some(slot) => slot,
            None => return Err(OutOfBounds::new(cell, dim)),
        };
        let id = PieceId(self.next_id);
        self.next_id += 1;
        let previous = slot.replace(id);
        self.pieces.insert(
            id,
            Piece {
                kind,
                team,
                position: cell,
            },
        );
        let displaced = previous.and_then(|old| self.take_from_roster(old));
        if let Some(displaced) = &displaced {
            warn!(
                %cell,
                displaced = %displaced.id,
                "placed piece over an existing occupant"
            );
        }
        Ok((id, displaced))
    }

    /// Move whatever stands on `from` to `to`, leaving `from` empty.
    ///
    /// Whatever stood on `to` is taken off the board and returned. The moved piece's
    /// `position` is updated to `to`. Relocating a cell onto itself changes nothing.
    /// Both cells are checked before anything is modified.
    pub fn relocate(&mut self, from: Cell, to: Cell) -> Result<Option<Displaced>, OutOfBounds> {
        self.check_bounds(from)?;
        self.check_bounds(to)?;
        if from == to {
            return Ok(None);
        }
        let moving = self.grid[from].take();
        let previous = std::mem::replace(&mut self.grid[to], moving);
        if let Some(id) = moving {
            if let Some(piece) = self.pieces.get_mut(&id) {
                piece.position = to;
            }
        }
        debug!(%from, %to, piece = ?moving, "relocated occupant");
        Ok(previous.and_then(|old| self.take_from_roster(old)))
    }

    /// Returns true if the grid and the roster agree: every roster entry sits on the
    /// cell named by its position, and every filled cell names a roster entry.
    pub fn is_consistent(&self) -> bool {
        let filled = self.grid.iter().filter(|(_, slot)| slot.is_some()).count();
        filled == self.pieces.len()
            && self
                .pieces
                .iter()
                .all(|(id, piece)| self.grid.get(piece.position) == Some(&Some(*id)))
    }

    fn piece_ref(&self, id: PieceId) -> PieceRef<'_> {
        // The grid only ever holds ids of pieces in the roster.
        PieceRef {
            id,
            piece: &self.pieces[&id],
        }
    }

    fn take_from_roster(&mut self, id: PieceId) -> Option<Displaced> {
        self.pieces
            .remove(&id)
            .map(|piece| Displaced { id, piece })
    }
}

impl Default for Board {
    /// An empty standard 8x8 board.
    fn default() -> Self {
        Self::new(RectDimensions::default())
    }
}
