//! The seam between the board logic and whatever draws it.
//!
//! The logic never owns rendering objects. It tells a [`Presentation`] what changed and
//! lets it keep its own mapping from [`PieceId`] and [`Cell`] to whatever it draws.
use enumflags2::BitFlags;

use crate::{
    board::rectangular::Cell,
    layout::WorldPoint,
    pieces::{PieceId, PieceKind, Team},
};

/// Visual states a cell can be in. The empty set is the normal state.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Highlight {
    /// The pointer is over the cell.
    Hovered = 0b01,
    /// The cell is the source of the piece currently being dragged.
    Selected = 0b10,
}

/// Outbound interface from the board logic to the presentation layer.
pub trait Presentation {
    /// Per-kind template the presentation instantiates piece visuals from.
    type Template;
    /// Per-team material applied to piece visuals.
    type Material;

    /// Set the visual state of a cell. An empty set means the normal state.
    fn set_cell_highlight(&mut self, cell: Cell, highlight: BitFlags<Highlight>);

    /// Move the visual of a piece to a world-space position.
    fn set_piece_world_position(&mut self, piece: PieceId, position: WorldPoint);

    /// Create the visual for a newly placed piece from its kind's template.
    fn instantiate_piece_visual(
        &mut self,
        piece: PieceId,
        kind: PieceKind,
        team: Team,
        template: &Self::Template,
    );

    /// Apply a team material to the visual of a piece.
    fn assign_material(&mut self, piece: PieceId, material: &Self::Material);

    /// Drop the visual of a piece that left the board.
    fn remove_piece_visual(&mut self, piece: PieceId);
}
