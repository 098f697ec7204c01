//! Move transactions: validate a relocation, consult the rules and commit it.
//!
//! The board itself knows nothing of chess rules. A [`MoveRules`] implementation is
//! asked about every move that passes the structural checks, before anything changes.
use tracing::{debug, warn};

use crate::{
    board::{rectangular::Cell, Board, Displaced, PieceRef},
    pieces::PieceId,
};

pub use self::errors::{InvalidMoveReason, MoveError};

mod errors;

/// Pre-commit hook deciding whether a move is legal.
pub trait MoveRules {
    /// Return true if `piece` may move to `dest` on `board`.
    ///
    /// Only called for moves to a different, in-bounds cell that is not held by a
    /// teammate.
    fn can_move(&self, board: &Board, piece: PieceRef<'_>, dest: Cell) -> bool;
}

/// Rules that accept every structurally valid move.
#[derive(Debug, Copy, Clone, Default)]
pub struct AnyMove;

impl MoveRules for AnyMove {
    fn can_move(&self, _board: &Board, _piece: PieceRef<'_>, _dest: Cell) -> bool {
        true
    }
}

impl<R: MoveRules + ?Sized> MoveRules for &R {
    fn can_move(&self, board: &Board, piece: PieceRef<'_>, dest: Cell) -> bool {
        (**self).can_move(board, piece, dest)
    }
}

impl<R: MoveRules + ?Sized> MoveRules for Box<R> {
    fn can_move(&self, board: &Board, piece: PieceRef<'_>, dest: Cell) -> bool {
        (**self).can_move(board, piece, dest)
    }
}

/// Result of a committed move.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MoveOutcome {
    /// The piece moved to an empty cell.
    Moved { from: Cell, to: Cell },
    /// The piece moved onto an opposing piece, which was taken off the board.
    Captured {
        from: Cell,
        to: Cell,
        captured: Displaced,
    },
}

impl MoveOutcome {
    /// The cell the piece moved from.
    pub fn from(&self) -> Cell {
        match *self {
            MoveOutcome::Moved { from, .. } | MoveOutcome::Captured { from, .. } => from,
        }
    }

    /// The cell the piece moved to.
    pub fn to(&self) -> Cell {
        match *self {
            MoveOutcome::Moved { to, .. } | MoveOutcome::Captured { to, .. } => to,
        }
    }

    /// The piece taken by this move, if any.
    pub fn captured(&self) -> Option<&Displaced> {
        match self {
            MoveOutcome::Moved { .. } => None,
            MoveOutcome::Captured { captured, .. } => Some(captured),
        }
    }
}

/// Check whether `piece` could move to `dest` without changing anything.
pub fn check_move<R: MoveRules + ?Sized>(
    board: &Board,
    rules: &R,
    piece: PieceId,
    dest: Cell,
) -> Result<(), MoveError> {
    let reject = |reason| Err(MoveError::new(reason, piece, dest));
    let mover = match board.piece(piece) {
        Some(mover) => mover,
        None => return reject(InvalidMoveReason::UnknownPiece),
    };
    let occupant = match board.occupant_at(dest) {
        Ok(occupant) => occupant,
        Err(_) => return reject(InvalidMoveReason::OutOfBounds),
    };
    if mover.position() == dest {
        return reject(InvalidMoveReason::SameCell);
    }
    if let Some(occupant) = occupant {
        if occupant.team() == mover.team() {
            return reject(InvalidMoveReason::OccupiedByTeammate);
        }
    }
    if !rules.can_move(board, mover, dest) {
        return reject(InvalidMoveReason::RejectedByRules);
    }
    Ok(())
}

/// Move `piece` to `dest` as one transaction.
///
/// On success the piece's old cell is empty, `dest` holds the piece and its position
/// is `dest`. An opposing piece on `dest` is taken off the board and reported in the
/// outcome. On failure nothing changes.
pub fn try_move<R: MoveRules + ?Sized>(
    board: &mut Board,
    rules: &R,
    piece: PieceId,
    dest: Cell,
) -> Result<MoveOutcome, MoveError> {
    if let Err(err) = check_move(board, rules, piece, dest) {
        warn!(%piece, %dest, reason = %err.reason(), "move rejected");
        return Err(err);
    }
    // check_move guarantees the piece is on the board and dest is in bounds.
    let from = match board.piece(piece) {
        Some(mover) => mover.position(),
        None => return Err(MoveError::new(InvalidMoveReason::UnknownPiece, piece, dest)),
    };
    let displaced = board
        .relocate(from, dest)
        .map_err(|_| MoveError::new(InvalidMoveReason::OutOfBounds, piece, dest))?;
    debug!(%piece, %from, to = %dest, captured = ?displaced.map(|d| d.id), "move committed");
    Ok(match displaced {
        None => MoveOutcome::Moved { from, to: dest },
        Some(captured) => MoveOutcome::Captured {
            from,
            to: dest,
            captured,
        },
    })
}

/// Move `piece` to `dest`, returning whether the move was accepted.
pub fn move_to<R: MoveRules + ?Sized>(
    board: &mut Board,
    rules: &R,
    piece: PieceId,
    dest: Cell,
) -> bool {
    try_move(board, rules, piece, dest).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::BoardSetup,
        pieces::{PieceKind, Team},
    };

    /// Only lets pieces move along their file.
    struct SameFile;

    impl MoveRules for SameFile {
        fn can_move(&self, _board: &Board, piece: PieceRef<'_>, dest: Cell) -> bool {
            piece.position().x == dest.x
        }
    }

    fn board_with(pieces: &[(PieceKind, Team, Cell)]) -> (Board, Vec<PieceId>) {
        let mut board = Board::default();
        let ids = pieces
            .iter()
            .map(|&(kind, team, cell)| board.place(kind, team, cell).unwrap().0)
            .collect();
        (board, ids)
    }

    #[test]
    fn rook_moves_up_the_file() {
        let (mut board, ids) = board_with(&[(PieceKind::Rook, Team::White, Cell::new(0, 0))]);
        let rook = ids[0];
        assert!(move_to(&mut board, &AnyMove, rook, Cell::new(0, 5)));
        assert!(board.occupant_at(Cell::new(0, 0)).unwrap().is_none());
        assert_eq!(board.occupant_at(Cell::new(0, 5)).unwrap().unwrap().id(), rook);
        assert_eq!(board.piece(rook).unwrap().position(), Cell::new(0, 5));
    }

    #[test]
    fn outcome_reports_cells() {
        let (mut board, ids) = board_with(&[(PieceKind::Queen, Team::White, Cell::new(3, 0))]);
        let outcome = try_move(&mut board, &AnyMove, ids[0], Cell::new(3, 4)).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                from: Cell::new(3, 0),
                to: Cell::new(3, 4)
            }
        );
        assert!(outcome.captured().is_none());
    }

    #[test]
    fn capture_is_reported() {
        let (mut board, ids) = board_with(&[
            (PieceKind::Bishop, Team::White, Cell::new(2, 0)),
            (PieceKind::Pawn, Team::Black, Cell::new(5, 3)),
        ]);
        let outcome = try_move(&mut board, &AnyMove, ids[0], Cell::new(5, 3)).unwrap();
        let captured = outcome.captured().unwrap();
        assert_eq!(captured.id, ids[1]);
        assert_eq!(captured.piece.kind(), PieceKind::Pawn);
        assert_eq!(board.len(), 1);
        assert!(board.piece(ids[1]).is_none());
        assert!(board.is_consistent());
    }

    #[test]
    fn rejections_change_nothing() {
        let (mut board, ids) = board_with(&[
            (PieceKind::Knight, Team::White, Cell::new(1, 0)),
            (PieceKind::Pawn, Team::White, Cell::new(2, 2)),
        ]);
        let knight = ids[0];
        let cases = [
            (Cell::new(1, 0), InvalidMoveReason::SameCell),
            (Cell::new(1, 8), InvalidMoveReason::OutOfBounds),
            (Cell::new(2, 2), InvalidMoveReason::OccupiedByTeammate),
        ];
        for &(dest, reason) in cases.iter() {
            let err = try_move(&mut board, &AnyMove, knight, dest).unwrap_err();
            assert_eq!(err.reason(), reason);
            assert_eq!(err.dest(), dest);
            assert_eq!(err.piece(), knight);
        }
        assert_eq!(board.piece(knight).unwrap().position(), Cell::new(1, 0));
        assert_eq!(board.len(), 2);
        assert!(board.is_consistent());
    }

    #[test]
    fn unknown_piece_is_rejected() {
        let (mut board, _) = board_with(&[]);
        let err = try_move(&mut board, &AnyMove, PieceId(42), Cell::new(0, 0)).unwrap_err();
        assert_eq!(err.reason(), InvalidMoveReason::UnknownPiece);
    }

    #[test]
    fn rules_are_consulted_before_commit() {
        let (mut board, ids) = board_with(&[(PieceKind::Rook, Team::Black, Cell::new(7, 7))]);
        let rook = ids[0];
        let err = try_move(&mut board, &SameFile, rook, Cell::new(6, 7)).unwrap_err();
        assert_eq!(err.reason(), InvalidMoveReason::RejectedByRules);
        assert_eq!(board.piece(rook).unwrap().position(), Cell::new(7, 7));
        let boxed: Box<dyn MoveRules> = Box::new(SameFile);
        assert!(move_to(&mut board, &boxed, rook, Cell::new(7, 2)));
    }

    #[test]
    fn round_trip_restores_occupancy() {
        let mut board = BoardSetup::standard().start();
        let knight = board.occupant_at(Cell::new(1, 0)).unwrap().unwrap().id();
        let (a, b) = (Cell::new(1, 0), Cell::new(2, 2));
        assert!(move_to(&mut board, &AnyMove, knight, b));
        assert!(move_to(&mut board, &AnyMove, knight, a));
        assert_eq!(board.occupant_at(a).unwrap().unwrap().id(), knight);
        assert!(board.occupant_at(b).unwrap().is_none());
        assert_eq!(board.len(), 32);
    }

    #[test]
    fn error_message_names_the_move() {
        let (mut board, ids) = board_with(&[(PieceKind::King, Team::White, Cell::new(4, 0))]);
        let err = try_move(&mut board, &AnyMove, ids[0], Cell::new(4, 0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not move piece #0 to (4, 0): the destination is the piece's own cell"
        );
    }
}
