//! Drag-and-drop reordering of cards and columns.
//!
//! - Session tracking: one dragged card or one dragged column at a time
//! - Live reordering while the pointer moves over a column
//! - Persisting the final order on drop
//!
//! All rendering access goes through [`Layout`](crate::layout::Layout), so
//! the same code runs against the DOM and against memory.

mod coordinator;
mod reorder;

pub use coordinator::{DragCoordinator, DragOverEffect, DropOutcome, DropRequest};
pub use reorder::{insertion_point, is_in_place};

use serde::{Deserialize, Serialize};

use crate::ids::{ListId, TaskId};

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DragTarget {
    /// A card.
    Task(TaskId),
    /// A whole column.
    List(ListId),
}
