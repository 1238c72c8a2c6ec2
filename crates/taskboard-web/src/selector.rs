//! CSS selectors for the board markup.
//!
//! The server renders each column's card area as
//! `<div class="task-container" data-list-id="…">`, each card as
//! `<div draggable="true" data-task-id="…">` and each column wrapper as
//! `<div data-list-column="…">`.

use taskboard_core::{ListId, TaskId};

/// Matches every card.
pub const CARD_SELECTOR: &str = "[data-task-id]";

/// Classes marking the element being dragged.
pub const DRAGGING_CLASSES: [&str; 2] = ["opacity-50", "dragging"];

/// Card area of a column.
pub fn container(list: &ListId) -> String {
    format!(".task-container[data-list-id=\"{}\"]", escape(list.as_str()))
}

/// A single card.
pub fn card(task: &TaskId) -> String {
    format!("[data-task-id=\"{}\"]", escape(task.as_str()))
}

/// Outer wrapper of a column, used for the column drag marker.
pub fn column(list: &ListId) -> String {
    format!("[data-list-column=\"{}\"]", escape(list.as_str()))
}

/// Escape a value for a double-quoted CSS attribute selector.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors() {
        assert_eq!(container(&ListId::new("4")), ".task-container[data-list-id=\"4\"]");
        assert_eq!(card(&TaskId::from(12u64)), "[data-task-id=\"12\"]");
        assert_eq!(column(&ListId::new("4")), "[data-list-column=\"4\"]");
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(card(&TaskId::new("a\"b")), "[data-task-id=\"a\\\"b\"]");
        assert_eq!(card(&TaskId::new("a\\b")), "[data-task-id=\"a\\\\b\"]");
        assert_eq!(escape("x\ny"), "x\\a y");
    }
}
