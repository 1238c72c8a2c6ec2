//! Layout query abstraction.
//!
//! The reorder algorithm needs three things from whatever renders the board:
//! the order of cards in a column, each card's on-screen bounds, and a way to
//! move a card. Browsers answer through the DOM; tests answer from memory.

mod memory;

pub use memory::MemoryLayout;

use kurbo::Rect;

use crate::drag::DragTarget;
use crate::ids::{ListId, TaskId};

/// Where a dragged card goes within a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Immediately before the given card.
    Before(TaskId),
    /// After every other card.
    End,
}

/// Read and rearrange the rendered board.
pub trait Layout {
    /// Cards rendered in `list`, in visual order. Empty for an unknown list.
    fn items(&self, list: &ListId) -> Vec<TaskId>;

    /// Current bounds of a card, in the same coordinate space as pointer
    /// positions.
    fn bounds(&self, item: &TaskId) -> Option<Rect>;

    /// Whether the card is rendered anywhere.
    fn contains(&self, item: &TaskId) -> bool;

    /// Move a card into `list` at `placement`, removing it from wherever it
    /// was. Returns `false`, leaving everything in place, when either the
    /// card or the column is not rendered.
    fn place(&mut self, item: &TaskId, list: &ListId, placement: &Placement) -> bool;

    /// Toggle the visual "being dragged" marker.
    fn set_dragging(&mut self, target: &DragTarget, dragging: bool);
}
