//! In-memory layout implementation.

use std::collections::{HashMap, HashSet};

use kurbo::Rect;

use super::{Layout, Placement};
use crate::drag::DragTarget;
use crate::ids::{ListId, TaskId};

/// Default card height in the stacked layout.
pub const DEFAULT_ROW_HEIGHT: f64 = 50.0;

/// Default column width in the stacked layout.
pub const DEFAULT_COLUMN_WIDTH: f64 = 280.0;

/// Board layout held in memory, for testing and headless use.
///
/// Columns sit side by side and cards stack from the top of each column
/// with a fixed row height, so bounds follow the order just like rendered
/// markup does. Explicit bounds can be pinned per card.
#[derive(Debug, Clone)]
pub struct MemoryLayout {
    columns: Vec<(ListId, Vec<TaskId>)>,
    pinned: HashMap<TaskId, Rect>,
    dragging: HashSet<DragTarget>,
    top: f64,
    row_height: f64,
    column_width: f64,
}

impl Default for MemoryLayout {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            pinned: HashMap::new(),
            dragging: HashSet::new(),
            top: 0.0,
            row_height: DEFAULT_ROW_HEIGHT,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl MemoryLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the y coordinate where every column starts.
    pub fn with_top(mut self, top: f64) -> Self {
        self.top = top;
        self
    }

    /// Append a column holding `items` in order.
    pub fn with_list<I, T>(mut self, list: impl Into<ListId>, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TaskId>,
    {
        self.columns
            .push((list.into(), items.into_iter().map(Into::into).collect()));
        self
    }

    /// Pin a card's bounds regardless of its position.
    pub fn pin_bounds(&mut self, item: impl Into<TaskId>, bounds: Rect) {
        self.pinned.insert(item.into(), bounds);
    }

    /// Whether the target currently carries the dragging marker.
    pub fn is_marked(&self, target: &DragTarget) -> bool {
        self.dragging.contains(target)
    }

    /// Total number of cards across all columns.
    pub fn item_count(&self) -> usize {
        self.columns.iter().map(|(_, items)| items.len()).sum()
    }

    /// Column index and row index of a card.
    fn position(&self, item: &TaskId) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(col, (_, items))| {
            items.iter().position(|i| i == item).map(|row| (col, row))
        })
    }
}

impl Layout for MemoryLayout {
    fn items(&self, list: &ListId) -> Vec<TaskId> {
        self.columns
            .iter()
            .find(|(id, _)| id == list)
            .map(|(_, items)| items.clone())
            .unwrap_or_default()
    }

    fn bounds(&self, item: &TaskId) -> Option<Rect> {
        if let Some(rect) = self.pinned.get(item) {
            return Some(*rect);
        }
        let (col, row) = self.position(item)?;
        let x0 = col as f64 * self.column_width;
        let y0 = self.top + row as f64 * self.row_height;
        Some(Rect::new(x0, y0, x0 + self.column_width, y0 + self.row_height))
    }

    fn contains(&self, item: &TaskId) -> bool {
        self.position(item).is_some()
    }

    fn place(&mut self, item: &TaskId, list: &ListId, placement: &Placement) -> bool {
        let Some(target_col) = self.columns.iter().position(|(id, _)| id == list) else {
            log::debug!("place: unknown list {}", list);
            return false;
        };
        let Some((col, row)) = self.position(item) else {
            log::debug!("place: unknown task {}", item);
            return false;
        };
        self.columns[col].1.remove(row);
        let items = &mut self.columns[target_col].1;
        let index = match placement {
            Placement::Before(before) => items.iter().position(|i| i == before),
            Placement::End => None,
        };
        match index {
            Some(index) => items.insert(index, item.clone()),
            None => items.push(item.clone()),
        }
        true
    }

    fn set_dragging(&mut self, target: &DragTarget, dragging: bool) {
        if dragging {
            self.dragging.insert(target.clone());
        } else {
            self.dragging.remove(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[&str]) -> Vec<TaskId> {
        items.iter().map(|s| TaskId::new(*s)).collect()
    }

    #[test]
    fn test_stacked_bounds() {
        let layout = MemoryLayout::new()
            .with_top(75.0)
            .with_list("1", ["a", "b"])
            .with_list("2", ["c"]);

        let b = layout.bounds(&TaskId::new("b")).unwrap();
        assert_eq!(b.y0, 125.0);
        assert_eq!(b.center().y, 150.0);

        let c = layout.bounds(&TaskId::new("c")).unwrap();
        assert_eq!(c.x0, DEFAULT_COLUMN_WIDTH);
        assert_eq!(c.y0, 75.0);
    }

    #[test]
    fn test_pinned_bounds_win() {
        let mut layout = MemoryLayout::new().with_list("1", ["a"]);
        layout.pin_bounds("a", Rect::new(0.0, 500.0, 10.0, 520.0));
        assert_eq!(layout.bounds(&TaskId::new("a")).unwrap().y0, 500.0);
    }

    #[test]
    fn test_place_within_list() {
        let mut layout = MemoryLayout::new().with_list("1", ["a", "b", "c"]);
        layout.place(&TaskId::new("c"), &ListId::new("1"), &Placement::Before(TaskId::new("a")));
        assert_eq!(layout.items(&ListId::new("1")), ids(&["c", "a", "b"]));

        layout.place(&TaskId::new("c"), &ListId::new("1"), &Placement::End);
        assert_eq!(layout.items(&ListId::new("1")), ids(&["a", "b", "c"]));
    }

    #[test]
    fn test_place_across_lists() {
        let mut layout = MemoryLayout::new()
            .with_list("1", ["a", "b"])
            .with_list("2", ["c"]);
        assert!(layout.place(&TaskId::new("a"), &ListId::new("2"), &Placement::Before(TaskId::new("c"))));

        assert_eq!(layout.items(&ListId::new("1")), ids(&["b"]));
        assert_eq!(layout.items(&ListId::new("2")), ids(&["a", "c"]));
        assert_eq!(layout.item_count(), 3);
    }

    #[test]
    fn test_place_into_unknown_list_keeps_item() {
        let mut layout = MemoryLayout::new().with_list("1", ["a"]);
        assert!(!layout.place(&TaskId::new("a"), &ListId::new("9"), &Placement::End));
        assert_eq!(layout.items(&ListId::new("1")), ids(&["a"]));
        assert!(!layout.place(&TaskId::new("z"), &ListId::new("1"), &Placement::End));
        assert_eq!(layout.item_count(), 1);
    }

    #[test]
    fn test_dragging_marker() {
        let mut layout = MemoryLayout::new().with_list("1", ["a"]);
        let target = DragTarget::Task(TaskId::new("a"));
        layout.set_dragging(&target, true);
        assert!(layout.is_marked(&target));
        layout.set_dragging(&target, false);
        assert!(!layout.is_marked(&target));
    }

    #[test]
    fn test_unknown_list_has_no_items() {
        let layout = MemoryLayout::new();
        assert!(layout.items(&ListId::new("1")).is_empty());
        assert!(!layout.contains(&TaskId::new("a")));
    }
}
