//! Types used for describing pieces: their kind, their team and where they stand.
use std::fmt;

use crate::board::rectangular::Cell;

/// The kind of a piece.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Every piece kind, in declaration order.
    pub const ALL: &'static [PieceKind] = &[
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Lowercase name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    /// Single-letter algebraic symbol, uppercase.
    pub fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One of the two opposing sides.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Team {
    White,
    Black,
}

impl Team {
    /// Both teams, white first.
    pub const ALL: &'static [Team] = &[Team::White, Team::Black];

    /// Get the opponent of this team.
    pub fn opponent(self) -> Self {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Team::White => "white",
            Team::Black => "black",
        })
    }
}

/// Handle to a piece on a [`Board`][crate::board::Board].
///
/// Ids are issued by the board when a piece is placed and never reused by that board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PieceId(pub(crate) u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A piece record. The `position` is a back-reference that the board keeps equal to
/// the cell that holds this piece's id.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Piece {
    pub(crate) kind: PieceKind,
    pub(crate) team: Team,
    pub(crate) position: Cell,
}

impl Piece {
    /// The kind of this piece.
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// The team this piece plays for.
    pub fn team(&self) -> Team {
        self.team
    }

    /// The cell this piece currently occupies.
    pub fn position(&self) -> Cell {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_involutive() {
        for &team in Team::ALL {
            assert_ne!(team.opponent(), team);
            assert_eq!(team.opponent().opponent(), team);
        }
    }

    #[test]
    fn symbols_are_distinct() {
        let mut symbols: Vec<char> = PieceKind::ALL.iter().map(|k| k.symbol()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), 6);
    }
}
