//! Create/edit dialogs.
//!
//! These only hold form state; the forms themselves submit as regular page
//! posts to `action_url`.

use serde::{Deserialize, Serialize};

use crate::model::Priority;

/// Whether a dialog creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalMode {
    #[default]
    Create,
    Edit,
}

/// Existing task values used to prefill the edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    /// User id of the assignee, empty when unassigned.
    pub assigned_to: String,
    /// `YYYY-MM-DD` or empty.
    pub due_date: String,
    pub priority: Priority,
}

/// The task create/edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskModal {
    pub open: bool,
    pub mode: ModalMode,
    /// Title of the list the task is created in.
    pub list_title: String,
    pub action_url: String,
    #[serde(flatten)]
    pub draft: TaskDraft,
}

impl TaskModal {
    /// Open an empty dialog creating a task in the named list.
    pub fn open_create(&mut self, list_title: impl Into<String>, action_url: impl Into<String>) {
        *self = Self {
            open: true,
            mode: ModalMode::Create,
            list_title: list_title.into(),
            action_url: action_url.into(),
            draft: TaskDraft::default(),
        };
    }

    /// Open the dialog prefilled with an existing task.
    pub fn open_edit(&mut self, action_url: impl Into<String>, draft: TaskDraft) {
        *self = Self {
            open: true,
            mode: ModalMode::Edit,
            list_title: String::new(),
            action_url: action_url.into(),
            draft,
        };
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

/// The list create/edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListModal {
    pub open: bool,
    pub mode: ModalMode,
    pub title: String,
    pub action_url: String,
}

impl ListModal {
    pub fn open_create(&mut self, action_url: impl Into<String>) {
        *self = Self {
            open: true,
            mode: ModalMode::Create,
            title: String::new(),
            action_url: action_url.into(),
        };
    }

    pub fn open_edit(&mut self, action_url: impl Into<String>, title: impl Into<String>) {
        *self = Self {
            open: true,
            mode: ModalMode::Edit,
            title: title.into(),
            action_url: action_url.into(),
        };
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

/// A "really delete?" dialog posting to `action_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmDialog {
    pub open: bool,
    pub action_url: String,
}

impl ConfirmDialog {
    pub fn open(&mut self, action_url: impl Into<String>) {
        self.open = true;
        self.action_url = action_url.into();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.action_url.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_create_resets_fields() {
        let mut modal = TaskModal::default();
        modal.open_edit(
            "/board/task/3/edit/",
            TaskDraft {
                title: "Old".into(),
                priority: Priority::High,
                ..TaskDraft::default()
            },
        );
        modal.open_create("Backlog", "/board/task/create/2/");

        assert!(modal.open);
        assert_eq!(modal.mode, ModalMode::Create);
        assert_eq!(modal.list_title, "Backlog");
        assert_eq!(modal.draft.title, "");
        assert_eq!(modal.draft.priority, Priority::Medium);
    }

    #[test]
    fn test_task_edit_prefills() {
        let mut modal = TaskModal::default();
        let draft = TaskDraft {
            title: "Fix login".into(),
            description: "Session expires".into(),
            assigned_to: "7".into(),
            due_date: "2026-11-01".into(),
            priority: Priority::Low,
        };
        modal.open_edit("/board/task/3/edit/", draft.clone());

        assert_eq!(modal.mode, ModalMode::Edit);
        assert_eq!(modal.draft, draft);
        modal.close();
        assert!(!modal.open);
        assert_eq!(modal.draft.title, "Fix login");
    }

    #[test]
    fn test_task_modal_serializes_flat() {
        let mut modal = TaskModal::default();
        modal.open_create("Backlog", "/create/");
        let value = serde_json::to_value(&modal).unwrap();
        assert_eq!(value["listTitle"], "Backlog");
        assert_eq!(value["priority"], "medium");
        assert_eq!(value["mode"], "create");
    }

    #[test]
    fn test_task_draft_from_partial_json() {
        let draft: TaskDraft = serde_json::from_str(r#"{"title": "T", "dueDate": "2026-01-02"}"#).unwrap();
        assert_eq!(draft.due_date, "2026-01-02");
        assert_eq!(draft.priority, Priority::Medium);
    }

    #[test]
    fn test_list_modal() {
        let mut modal = ListModal::default();
        modal.open_edit("/board/list/4/edit/", "Doing");
        assert_eq!(modal.title, "Doing");
        modal.open_create("/board/1/list/create/");
        assert_eq!(modal.title, "");
        assert_eq!(modal.mode, ModalMode::Create);
    }

    #[test]
    fn test_confirm_dialog() {
        let mut dialog = ConfirmDialog::default();
        dialog.open("/board/list/4/delete/");
        assert!(dialog.open);
        dialog.close();
        assert!(!dialog.open);
        assert!(dialog.action_url.is_empty());
    }
}
