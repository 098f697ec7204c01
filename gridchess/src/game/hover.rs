//! Tracks which cell the pointer is over from one input tick to the next.
use enumflags2::BitFlags;
use tracing::debug;

use crate::{
    board::rectangular::Cell,
    presentation::{Highlight, Presentation},
};

/// Transition produced by a single hover tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct HoverChange {
    /// Cell the pointer left this tick, if any.
    pub left: Option<Cell>,
    /// Cell the pointer entered this tick, if any.
    pub entered: Option<Cell>,
}

impl HoverChange {
    /// Returns true if nothing changed this tick.
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }
}

/// Two-state machine: idle (no hovered cell) or hovering a single cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct HoverTracker {
    current: Option<Cell>,
}

impl HoverTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// The cell currently hovered, if any.
    pub fn current(&self) -> Option<Cell> {
        self.current
    }

    /// Feed the cell the pointer is over this tick (`None` when it is over no cell).
    ///
    /// A leave is always reported before the matching enter, and pointing at the
    /// hovered cell again reports nothing.
    pub fn tick(&mut self, pointed: Option<Cell>) -> HoverChange {
        if pointed == self.current {
            return HoverChange::default();
        }
        let change = HoverChange {
            left: self.current,
            entered: pointed,
        };
        self.current = pointed;
        debug!(left = ?change.left, entered = ?change.entered, "hover changed");
        change
    }

    /// Like [`tick`][Self::tick], also pushing the highlight changes to `presentation`.
    pub fn tick_with<P: Presentation>(
        &mut self,
        pointed: Option<Cell>,
        presentation: &mut P,
    ) -> HoverChange {
        let change = self.tick(pointed);
        if let Some(cell) = change.left {
            presentation.set_cell_highlight(cell, BitFlags::empty());
        }
        if let Some(cell) = change.entered {
            presentation.set_cell_highlight(cell, Highlight::Hovered.into());
        }
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Cell = Cell::new(3, 3);
    const B: Cell = Cell::new(4, 3);

    #[test]
    fn starts_idle() {
        assert_eq!(HoverTracker::new().current(), None);
    }

    #[test]
    fn enter_from_idle() {
        let mut hover = HoverTracker::new();
        let change = hover.tick(Some(A));
        assert_eq!(change, HoverChange { left: None, entered: Some(A) });
        assert_eq!(hover.current(), Some(A));
    }

    #[test]
    fn same_cell_is_quiet() {
        let mut hover = HoverTracker::new();
        hover.tick(Some(A));
        assert!(hover.tick(Some(A)).is_empty());
        assert!(hover.tick(Some(A)).is_empty());
    }

    #[test]
    fn moving_between_cells_leaves_then_enters() {
        let mut hover = HoverTracker::new();
        hover.tick(Some(A));
        let change = hover.tick(Some(B));
        assert_eq!(change, HoverChange { left: Some(A), entered: Some(B) });
        assert_eq!(hover.current(), Some(B));
    }

    #[test]
    fn pointer_off_board_leaves_once() {
        let mut hover = HoverTracker::new();
        hover.tick(Some(A));
        assert_eq!(hover.tick(None), HoverChange { left: Some(A), entered: None });
        assert!(hover.tick(None).is_empty());
        assert_eq!(hover.current(), None);
    }
}
