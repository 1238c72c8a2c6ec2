//! Project overview page: the grid of boards.

use serde::Serialize;

use super::modals::ConfirmDialog;
use crate::ids::BoardId;

/// Board create/edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardModal {
    pub open: bool,
    pub action_url: String,
    pub name: String,
    pub description: String,
    /// Object URL of a locally picked cover image.
    pub cover_preview: Option<String>,
}

/// View state of the project page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPage {
    pub create: BoardModal,
    pub edit: BoardModal,
    pub delete: ConfirmDialog,
    /// Board whose context menu is open.
    menu_board: Option<BoardId>,
}

impl ProjectPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_create(&mut self) {
        self.menu_board = None;
        self.create = BoardModal {
            open: true,
            ..BoardModal::default()
        };
    }

    pub fn open_edit(
        &mut self,
        action_url: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        cover_preview: Option<String>,
    ) {
        self.menu_board = None;
        self.edit = BoardModal {
            open: true,
            action_url: action_url.into(),
            name: name.into(),
            description: description.into(),
            cover_preview,
        };
    }

    pub fn open_delete(&mut self, action_url: impl Into<String>) {
        self.menu_board = None;
        self.delete.open(action_url);
    }

    /// Open the context menu of `board`, or close it if it is already open.
    /// Only one menu is open at a time.
    pub fn toggle_menu(&mut self, board: BoardId) {
        if self.menu_board.as_ref() == Some(&board) {
            self.menu_board = None;
        } else {
            self.menu_board = Some(board);
        }
    }

    pub fn close_menu(&mut self) {
        self.menu_board = None;
    }

    pub fn menu_board(&self) -> Option<&BoardId> {
        self.menu_board.as_ref()
    }

    /// Close every dialog and menu.
    pub fn close_all(&mut self) {
        self.create.open = false;
        self.edit.open = false;
        self.delete.close();
        self.menu_board = None;
    }
}
