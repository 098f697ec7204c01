//! Input glue tying hover tracking, dragging and move transactions to a presentation.
use enumflags2::BitFlags;
use tracing::debug;

use crate::{
    board::{rectangular::Cell, Board, OutOfBounds},
    game::{
        hover::{HoverChange, HoverTracker},
        moves::{self, AnyMove, MoveError, MoveOutcome, MoveRules},
    },
    layout::{BoardLayout, WorldPoint},
    pieces::PieceId,
    presentation::{Highlight, Presentation},
};

/// A piece being dragged and the cell it was picked up from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Drag {
    piece: PieceId,
    previous: Cell,
}

impl Drag {
    /// The piece being dragged.
    pub fn piece(&self) -> PieceId {
        self.piece
    }

    /// The cell the piece was picked up from.
    pub fn previous(&self) -> Cell {
        self.previous
    }
}

/// How a drag ended.
#[derive(Debug)]
pub enum DragResult {
    /// The move was committed.
    Committed(MoveOutcome),
    /// The move was rejected and the piece went back to where it was picked up.
    Rejected(MoveError),
    /// The piece was dropped off the board and went back to where it was picked up.
    Cancelled,
}

/// One player's view of a board: the board itself plus pointer state.
///
/// All calls run to completion synchronously. Callers feed one [`tick`][Self::tick]
/// per input frame before any press or release of that frame.
#[derive(Debug)]
pub struct Session<R = AnyMove> {
    board: Board,
    layout: BoardLayout,
    rules: R,
    hover: HoverTracker,
    drag: Option<Drag>,
}

impl Session<AnyMove> {
    /// Create a session that accepts every structurally valid move.
    pub fn unruled(board: Board, layout: BoardLayout) -> Self {
        Self::new(board, layout, AnyMove)
    }
}

impl<R: MoveRules> Session<R> {
    /// Create a session over `board`. Panics if `layout` is for different dimensions.
    pub fn new(board: Board, layout: BoardLayout, rules: R) -> Self {
        assert_eq!(
            board.dimensions(),
            layout.dimensions(),
            "layout does not match the board"
        );
        Self {
            board,
            layout,
            rules,
            hover: HoverTracker::new(),
            drag: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// The cell under the pointer, if any.
    pub fn hovered(&self) -> Option<Cell> {
        self.hover.current()
    }

    /// The drag in progress, if any.
    pub fn drag(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    /// Give the board back, dropping pointer state.
    pub fn into_board(self) -> Board {
        self.board
    }

    /// The visual state `cell` should be in.
    pub fn highlight_of(&self, cell: Cell) -> BitFlags<Highlight> {
        let mut highlight = BitFlags::empty();
        if self.hover.current() == Some(cell) {
            highlight |= Highlight::Hovered;
        }
        if self.drag.map(|drag| drag.previous) == Some(cell) {
            highlight |= Highlight::Selected;
        }
        highlight
    }

    fn refresh<P: Presentation>(&self, cell: Cell, presentation: &mut P) {
        presentation.set_cell_highlight(cell, self.highlight_of(cell));
    }

    /// Feed the cell under the pointer this tick. Fails without changing anything if the
    /// cell is not on the board.
    pub fn tick<P: Presentation>(
        &mut self,
        pointed: Option<Cell>,
        presentation: &mut P,
    ) -> Result<HoverChange, OutOfBounds> {
        if let Some(cell) = pointed {
            self.board.check_bounds(cell)?;
        }
        let change = self.hover.tick(pointed);
        if let Some(cell) = change.left {
            self.refresh(cell, presentation);
        }
        if let Some(cell) = change.entered {
            self.refresh(cell, presentation);
        }
        Ok(change)
    }

    /// Press on `cell`. Picks up the piece there if no drag is in progress, returning
    /// its id. Fails if the cell is not on the board.
    pub fn press_at<P: Presentation>(
        &mut self,
        cell: Cell,
        presentation: &mut P,
    ) -> Result<Option<PieceId>, OutOfBounds> {
        let occupant = self.board.occupant_at(cell)?.map(|piece| piece.id());
        let piece = match (self.drag, occupant) {
            (None, Some(piece)) => piece,
            _ => return Ok(None),
        };
        self.drag = Some(Drag {
            piece,
            previous: cell,
        });
        debug!(%piece, %cell, "drag started");
        self.refresh(cell, presentation);
        Ok(Some(piece))
    }

    /// Move the dragged piece's visual to follow the pointer.
    pub fn drag_to<P: Presentation>(&mut self, point: WorldPoint, presentation: &mut P) {
        if let Some(drag) = self.drag {
            presentation.set_piece_world_position(drag.piece, point);
        }
    }

    /// Release the dragged piece over `cell` (`None` when off the board).
    ///
    /// Returns `None` if nothing was being dragged. Otherwise the drag is over: the
    /// piece's visual is snapped to its destination if the move was committed, or back
    /// to where it was picked up.
    pub fn release_at<P: Presentation>(
        &mut self,
        cell: Option<Cell>,
        presentation: &mut P,
    ) -> Option<DragResult> {
        let drag = self.drag.take()?;
        self.refresh(drag.previous, presentation);
        let result = match cell {
            None => DragResult::Cancelled,
            Some(dest) => match self.apply_move(drag.piece, dest, presentation) {
                Ok(outcome) => DragResult::Committed(outcome),
                Err(err) => DragResult::Rejected(err),
            },
        };
        if !matches!(result, DragResult::Committed(_)) {
            presentation
                .set_piece_world_position(drag.piece, self.layout.center_of(drag.previous));
        }
        debug!(piece = %drag.piece, result = ?result, "drag ended");
        Some(result)
    }

    /// Abandon the drag in progress, putting the piece back. Returns false if there was
    /// none.
    pub fn cancel_drag<P: Presentation>(&mut self, presentation: &mut P) -> bool {
        self.release_at(None, presentation).is_some()
    }

    /// Move `piece` to `dest` directly, updating the presentation on success.
    /// If `piece` is being dragged, the drag is cancelled first. A drag whose piece is
    /// captured by the move ends with it.
    pub fn move_piece<P: Presentation>(
        &mut self,
        piece: PieceId,
        dest: Cell,
        presentation: &mut P,
    ) -> Result<MoveOutcome, MoveError> {
        if let Some(drag) = self.drag {
            if drag.piece == piece {
                self.cancel_drag(presentation);
            }
        }
        let outcome = self.apply_move(piece, dest, presentation)?;
        if let (Some(drag), Some(captured)) = (self.drag, outcome.captured()) {
            if drag.piece == captured.id {
                self.drag = None;
                debug!(piece = %drag.piece, "dragged piece was captured");
                self.refresh(drag.previous, presentation);
            }
        }
        Ok(outcome)
    }

    fn apply_move<P: Presentation>(
        &mut self,
        piece: PieceId,
        dest: Cell,
        presentation: &mut P,
    ) -> Result<MoveOutcome, MoveError> {
        let outcome = moves::try_move(&mut self.board, &self.rules, piece, dest)?;
        if let Some(captured) = outcome.captured() {
            presentation.remove_piece_visual(captured.id);
        }
        presentation.set_piece_world_position(piece, self.layout.center_of(outcome.to()));
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::BoardSetup,
        game::moves::InvalidMoveReason,
        pieces::{PieceKind, Team},
    };

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Highlight(Cell, BitFlags<Highlight>),
        Position(PieceId, WorldPoint),
        Removed(PieceId),
    }

    #[derive(Default)]
    struct Recorder(Vec<Event>);

    impl Presentation for Recorder {
        type Template = ();
        type Material = ();

        fn set_cell_highlight(&mut self, cell: Cell, highlight: BitFlags<Highlight>) {
            self.0.push(Event::Highlight(cell, highlight));
        }

        fn set_piece_world_position(&mut self, piece: PieceId, position: WorldPoint) {
            self.0.push(Event::Position(piece, position));
        }

        fn instantiate_piece_visual(&mut self, _: PieceId, _: PieceKind, _: Team, _: &()) {}

        fn assign_material(&mut self, _: PieceId, _: &()) {}

        fn remove_piece_visual(&mut self, piece: PieceId) {
            self.0.push(Event::Removed(piece));
        }
    }

    fn standard() -> Session {
        Session::unruled(BoardSetup::standard().start(), BoardLayout::default())
    }

    #[test]
    fn hover_highlights_follow_pointer() {
        let mut session = standard();
        let mut out = Recorder::default();
        session.tick(Some(Cell::new(3, 3)), &mut out).unwrap();
        session.tick(Some(Cell::new(3, 3)), &mut out).unwrap();
        session.tick(Some(Cell::new(4, 3)), &mut out).unwrap();
        session.tick(None, &mut out).unwrap();
        assert_eq!(
            out.0,
            vec![
                Event::Highlight(Cell::new(3, 3), Highlight::Hovered.into()),
                Event::Highlight(Cell::new(3, 3), BitFlags::empty()),
                Event::Highlight(Cell::new(4, 3), Highlight::Hovered.into()),
                Event::Highlight(Cell::new(4, 3), BitFlags::empty()),
            ]
        );
    }

    #[test]
    fn press_on_empty_cell_does_nothing() {
        let mut session = standard();
        let mut out = Recorder::default();
        assert_eq!(session.press_at(Cell::new(4, 4), &mut out), Ok(None));
        assert!(session.drag().is_none());
        assert!(out.0.is_empty());
    }

    #[test]
    fn drag_and_drop_commits_move() {
        let mut session = standard();
        let mut out = Recorder::default();
        let from = Cell::new(4, 1);
        let to = Cell::new(4, 3);
        session.tick(Some(from), &mut out).unwrap();
        let pawn = session.press_at(from, &mut out).unwrap().unwrap();
        assert_eq!(
            session.highlight_of(from),
            Highlight::Hovered | Highlight::Selected
        );
        assert_eq!(session.drag().unwrap().previous(), from);
        session.tick(Some(to), &mut out).unwrap();
        let result = session.release_at(Some(to), &mut out).unwrap();
        assert!(matches!(result, DragResult::Committed(MoveOutcome::Moved { .. })));
        assert!(session.drag().is_none());
        assert_eq!(session.board().occupant_at(to).unwrap().unwrap().id(), pawn);
        assert_eq!(
            out.0.last(),
            Some(&Event::Position(pawn, session.layout().center_of(to)))
        );
        assert_eq!(session.highlight_of(from), BitFlags::empty());
    }

    #[test]
    fn rejected_drop_snaps_back() {
        let mut session = standard();
        let mut out = Recorder::default();
        let from = Cell::new(0, 0);
        let rook = session.press_at(from, &mut out).unwrap().unwrap();
        session.drag_to(WorldPoint::new(0.0, 1.0, 0.0), &mut out);
        let result = session.release_at(Some(Cell::new(0, 1)), &mut out).unwrap();
        match result {
            DragResult::Rejected(err) => {
                assert_eq!(err.reason(), InvalidMoveReason::OccupiedByTeammate)
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(
            out.0.last(),
            Some(&Event::Position(rook, session.layout().center_of(from)))
        );
        assert_eq!(session.board().occupant_at(from).unwrap().unwrap().id(), rook);
        assert!(session.drag().is_none());
    }

    #[test]
    fn drop_off_board_cancels() {
        let mut session = standard();
        let mut out = Recorder::default();
        let knight = session.press_at(Cell::new(6, 7), &mut out).unwrap().unwrap();
        assert!(matches!(
            session.release_at(None, &mut out),
            Some(DragResult::Cancelled)
        ));
        assert_eq!(
            session.board().piece(knight).unwrap().position(),
            Cell::new(6, 7)
        );
        assert!(session.release_at(None, &mut out).is_none());
        assert!(!session.cancel_drag(&mut out));
    }

    #[test]
    fn second_press_is_ignored_while_dragging() {
        let mut session = standard();
        let mut out = Recorder::default();
        let first = session.press_at(Cell::new(1, 0), &mut out).unwrap().unwrap();
        assert_eq!(session.press_at(Cell::new(2, 0), &mut out), Ok(None));
        assert_eq!(session.drag().unwrap().piece(), first);
    }

    #[test]
    fn capture_removes_visual() {
        let mut session = standard();
        let mut out = Recorder::default();
        let queen = session.board().occupant_at(Cell::new(3, 0)).unwrap().unwrap().id();
        let victim = session.board().occupant_at(Cell::new(3, 6)).unwrap().unwrap().id();
        let outcome = session.move_piece(queen, Cell::new(3, 6), &mut out).unwrap();
        assert_eq!(outcome.captured().map(|c| c.id), Some(victim));
        assert!(out.0.contains(&Event::Removed(victim)));
        assert_eq!(session.board().len(), 31);
    }

    #[test]
    fn off_board_pointer_is_refused() {
        let mut session = standard();
        let mut out = Recorder::default();
        let err = session.tick(Some(Cell::new(9, 9)), &mut out).unwrap_err();
        assert_eq!(err.cell(), Cell::new(9, 9));
        assert_eq!(session.hovered(), None);
        assert!(session.press_at(Cell::new(20, 20), &mut out).is_err());
        assert!(session.drag().is_none());
        assert!(out.0.is_empty());
    }

    #[test]
    fn capturing_the_dragged_piece_ends_the_drag() {
        let mut session = standard();
        let mut out = Recorder::default();
        let pawn = session.press_at(Cell::new(4, 1), &mut out).unwrap().unwrap();
        let queen = session.board().occupant_at(Cell::new(3, 7)).unwrap().unwrap().id();
        let outcome = session.move_piece(queen, Cell::new(4, 1), &mut out).unwrap();
        assert_eq!(outcome.captured().map(|c| c.id), Some(pawn));
        assert!(session.drag().is_none());
        assert_eq!(session.highlight_of(Cell::new(4, 1)), BitFlags::empty());
        assert_eq!(
            out.0.last(),
            Some(&Event::Highlight(Cell::new(4, 1), BitFlags::empty()))
        );
        out.0.clear();
        assert!(session.release_at(Some(Cell::new(4, 3)), &mut out).is_none());
        assert!(out.0.is_empty());
    }
}
