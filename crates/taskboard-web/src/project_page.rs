//! JavaScript bindings for the project overview page.

use std::cell::RefCell;

use taskboard_core::{BoardId, ProjectPage};
use wasm_bindgen::prelude::*;

/// Project page controller exported to JavaScript. Everything here is local
/// state; the dialogs submit as ordinary forms.
#[wasm_bindgen]
pub struct ProjectOverviewPage {
    state: RefCell<ProjectPage>,
}

impl Default for ProjectOverviewPage {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl ProjectOverviewPage {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ProjectOverviewPage {
        Self {
            state: RefCell::new(ProjectPage::new()),
        }
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&*self.state.borrow())?)
    }

    #[wasm_bindgen(js_name = openCreate)]
    pub fn open_create(&self) {
        self.state.borrow_mut().open_create();
    }

    /// Preview of the cover image picked in the create dialog.
    #[wasm_bindgen(js_name = setCreateCover)]
    pub fn set_create_cover(&self, object_url: Option<String>) {
        self.state.borrow_mut().create.cover_preview = object_url;
    }

    #[wasm_bindgen(js_name = openEdit)]
    pub fn open_edit(
        &self,
        action_url: String,
        name: String,
        description: String,
        cover_preview: Option<String>,
    ) {
        self.state
            .borrow_mut()
            .open_edit(action_url, name, description, cover_preview);
    }

    /// Preview of a replacement cover picked in the edit dialog.
    #[wasm_bindgen(js_name = setEditCover)]
    pub fn set_edit_cover(&self, object_url: Option<String>) {
        self.state.borrow_mut().edit.cover_preview = object_url;
    }

    #[wasm_bindgen(js_name = openDelete)]
    pub fn open_delete(&self, action_url: String) {
        self.state.borrow_mut().open_delete(action_url);
    }

    #[wasm_bindgen(js_name = toggleMenu)]
    pub fn toggle_menu(&self, board_id: JsValue) -> Result<(), JsError> {
        let board: BoardId = serde_wasm_bindgen::from_value(board_id)?;
        self.state.borrow_mut().toggle_menu(board);
        Ok(())
    }

    /// Id of the board whose menu is open, as a string.
    #[wasm_bindgen(js_name = menuBoard)]
    pub fn menu_board(&self) -> Option<String> {
        self.state.borrow().menu_board().map(ToString::to_string)
    }

    #[wasm_bindgen(js_name = closeMenu)]
    pub fn close_menu(&self) {
        self.state.borrow_mut().close_menu();
    }

    #[wasm_bindgen(js_name = closeAll)]
    pub fn close_all(&self) {
        self.state.borrow_mut().close_all();
    }
}
