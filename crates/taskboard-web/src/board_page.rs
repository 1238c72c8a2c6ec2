//! JavaScript bindings for the board detail page.
//!
//! The page template creates one `BoardDetailPage` with its inline config
//! and forwards DOM events to it:
//!
//! ```js
//! const page = new BoardDetailPage({ boardId: 3, moveUrl: "...", listMoveUrl: "..." });
//! card.ondragstart = (e) => page.onDragStartTask(e, card.dataset.taskId);
//! column.ondragover = (e) => page.onDragOver(e, column.dataset.listId);
//! column.ondrop = (e) => page.onDrop(e, column.dataset.listId);
//! page.onChange(() => render(page.state()));
//! ```
//!
//! Requests run in `spawn_local`. State lives in `Rc<RefCell<_>>` and is
//! never borrowed across an await.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use taskboard_core::page::TaskDraft;
use taskboard_core::{BoardClient, BoardConfig, BoardPage, DragOverEffect, ListId, TaskId};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, Element};

use crate::dom_layout::DomLayout;
use crate::fetch::FetchTransport;
use crate::web::{BrowserShell, DocumentCookies};

/// Board detail page controller exported to JavaScript.
#[wasm_bindgen]
pub struct BoardDetailPage {
    inner: Rc<Inner>,
}

struct Inner {
    state: RefCell<BoardPage>,
    layout: RefCell<DomLayout>,
    client: BoardClient<FetchTransport>,
    shell: BrowserShell,
    listener: RefCell<Option<js_sys::Function>>,
}

impl Inner {
    /// Tell the template that state changed. Must be called with no borrow
    /// of `state` held, since the listener usually reads `state()`.
    fn notify(&self) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            if let Err(e) = listener.call0(&JsValue::NULL) {
                log::error!("Change listener failed: {:?}", e);
            }
        }
    }
}

/// Parse an id or config value handed over from JavaScript.
fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    Ok(serde_wasm_bindgen::from_value(value)?)
}

fn parse_config(value: JsValue) -> Result<BoardConfig, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(BoardConfig::default());
    }
    if let Some(json) = value.as_string() {
        return Ok(BoardConfig::from_json(&json)?);
    }
    from_js(value)
}

impl BoardDetailPage {
    fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce(Rc<Inner>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        wasm_bindgen_futures::spawn_local(task(self.inner.clone()));
    }
}

#[wasm_bindgen]
impl BoardDetailPage {
    /// Accepts the config as an object, a JSON string, or nothing.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<BoardDetailPage, JsError> {
        let config = parse_config(config)?;
        let layout = DomLayout::from_window().ok_or_else(|| JsError::new("No document"))?;
        let client = BoardClient::new(FetchTransport::new(), DocumentCookies)
            .with_endpoints(config.endpoints.clone())
            .with_csrf(config.csrf.clone());

        if config.move_url().is_none() {
            log::warn!("No moveUrl configured; task drops will be ignored");
        }

        Ok(Self {
            inner: Rc::new(Inner {
                state: RefCell::new(BoardPage::new(config)),
                layout: RefCell::new(layout),
                client,
                shell: BrowserShell,
                listener: RefCell::new(None),
            }),
        })
    }

    /// Register a callback run after every asynchronous state change.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, listener: js_sys::Function) {
        *self.inner.listener.borrow_mut() = Some(listener);
    }

    /// Snapshot of the page state for rendering.
    pub fn state(&self) -> Result<JsValue, JsError> {
        let state = self.inner.state.borrow();
        Ok(serde_wasm_bindgen::to_value(&state.view())?)
    }

    // --- Drag and drop ---

    #[wasm_bindgen(js_name = onDragStartTask)]
    pub fn on_drag_start_task(&self, event: DragEvent, task_id: JsValue) -> Result<(), JsError> {
        let task: TaskId = from_js(task_id)?;
        allow_move(&event, task.as_str());
        let mut layout = self.inner.layout.borrow_mut();
        self.inner
            .state
            .borrow_mut()
            .drag
            .begin_item_drag(task, &mut *layout);
        Ok(())
    }

    #[wasm_bindgen(js_name = onDragEndTask)]
    pub fn on_drag_end_task(&self, event: DragEvent) {
        let task = event_id(&event, "data-task-id").map(TaskId::new);
        let mut layout = self.inner.layout.borrow_mut();
        self.inner
            .state
            .borrow_mut()
            .drag
            .end_item_drag(task.as_ref(), &mut *layout);
    }

    #[wasm_bindgen(js_name = onDragStartList)]
    pub fn on_drag_start_list(&self, event: DragEvent, list_id: JsValue) -> Result<(), JsError> {
        let list: ListId = from_js(list_id)?;
        allow_move(&event, list.as_str());
        let mut layout = self.inner.layout.borrow_mut();
        self.inner
            .state
            .borrow_mut()
            .drag
            .begin_container_drag(list, &mut *layout);
        Ok(())
    }

    #[wasm_bindgen(js_name = onDragEndList)]
    pub fn on_drag_end_list(&self, event: DragEvent) {
        let list = event_id(&event, "data-list-column").map(ListId::new);
        let mut layout = self.inner.layout.borrow_mut();
        self.inner
            .state
            .borrow_mut()
            .drag
            .end_container_drag(list.as_ref(), &mut *layout);
    }

    /// Returns whether the dragged card moved.
    #[wasm_bindgen(js_name = onDragOver)]
    pub fn on_drag_over(&self, event: DragEvent, list_id: JsValue) -> Result<bool, JsError> {
        let list: ListId = from_js(list_id)?;
        let mut layout = self.inner.layout.borrow_mut();
        let effect = self.inner.state.borrow_mut().drag.drag_over(
            f64::from(event.client_y()),
            &list,
            &mut *layout,
        );
        if effect.prevents_default() {
            event.prevent_default();
        }
        Ok(matches!(effect, DragOverEffect::Moved(_)))
    }

    /// Persist the drop. Returns whether a request was sent; the page reloads
    /// once it completes.
    #[wasm_bindgen(js_name = onDrop)]
    pub fn on_drop(&self, event: DragEvent, list_id: JsValue) -> Result<bool, JsError> {
        let list: ListId = from_js(list_id)?;
        let request = {
            let mut layout = self.inner.layout.borrow_mut();
            self.inner
                .state
                .borrow_mut()
                .drag
                .prepare_drop(&list, &mut *layout)
        };
        let Some(request) = request else {
            return Ok(false);
        };
        event.prevent_default();
        self.spawn(|inner| async move {
            let outcome = request.submit(&inner.client, &inner.shell).await;
            log::debug!("Drop finished: {:?}", outcome);
        });
        Ok(true)
    }

    // --- Task detail and comments ---

    /// Open the detail modal of a task and load its comments.
    #[wasm_bindgen(js_name = openTask)]
    pub fn open_task(&self, task_id: JsValue) -> Result<(), JsError> {
        let task: TaskId = from_js(task_id)?;
        self.inner.state.borrow_mut().comments.begin_load(task.clone());
        self.inner.notify();
        self.spawn(|inner| async move {
            let result = inner.client.comments(&task).await;
            inner.state.borrow_mut().comments.finish_load(&task, result);
            inner.notify();
        });
        Ok(())
    }

    #[wasm_bindgen(js_name = closeTask)]
    pub fn close_task(&self) {
        self.inner.state.borrow_mut().comments.close();
    }

    #[wasm_bindgen(js_name = setCommentDraft)]
    pub fn set_comment_draft(&self, text: String) {
        self.inner.state.borrow_mut().comments.draft = text;
    }

    #[wasm_bindgen(js_name = postComment)]
    pub fn post_comment(&self) {
        let pending = self.inner.state.borrow_mut().comments.begin_post();
        let Some(pending) = pending else {
            return;
        };
        self.inner.notify();
        self.spawn(|inner| async move {
            let result = inner
                .client
                .add_comment(&pending.task, &pending.content)
                .await;
            inner
                .state
                .borrow_mut()
                .comments
                .finish_post(pending, result, &inner.shell);
            inner.notify();
        });
    }

    // --- Archive and activity ---

    #[wasm_bindgen(js_name = openArchive)]
    pub fn open_archive(&self) {
        let board = {
            let mut state = self.inner.state.borrow_mut();
            let Some(board) = state.board_id().cloned() else {
                log::warn!("Archive panel needs a boardId in the page configuration");
                return;
            };
            state.archive.begin_load();
            board
        };
        self.inner.notify();
        self.spawn(|inner| async move {
            let result = inner.client.archived_tasks(&board).await;
            inner.state.borrow_mut().archive.finish_load(result);
            inner.notify();
        });
    }

    #[wasm_bindgen(js_name = closeArchive)]
    pub fn close_archive(&self) {
        self.inner.state.borrow_mut().archive.close();
    }

    /// Archive or restore a task.
    #[wasm_bindgen(js_name = toggleArchive)]
    pub fn toggle_archive(&self, task_id: JsValue) -> Result<(), JsError> {
        let task: TaskId = from_js(task_id)?;
        self.spawn(|inner| async move {
            let result = inner.client.toggle_archive(&task).await;
            inner
                .state
                .borrow_mut()
                .archive
                .finish_toggle(&task, result, &inner.shell);
            inner.notify();
        });
        Ok(())
    }

    #[wasm_bindgen(js_name = openActivity)]
    pub fn open_activity(&self) {
        let board = {
            let mut state = self.inner.state.borrow_mut();
            let Some(board) = state.board_id().cloned() else {
                log::warn!("Activity feed needs a boardId in the page configuration");
                return;
            };
            state.activity.begin_load();
            board
        };
        self.inner.notify();
        self.spawn(|inner| async move {
            let result = inner.client.activity(&board).await;
            inner.state.borrow_mut().activity.finish_load(result);
            inner.notify();
        });
    }

    #[wasm_bindgen(js_name = closeActivity)]
    pub fn close_activity(&self) {
        self.inner.state.borrow_mut().activity.close();
    }

    // --- Dialogs ---

    #[wasm_bindgen(js_name = openCreateTask)]
    pub fn open_create_task(&self, list_title: String, action_url: String) {
        self.inner
            .state
            .borrow_mut()
            .task_modal
            .open_create(list_title, action_url);
    }

    /// `draft` is `{ title, description, assignedTo, dueDate, priority }`.
    #[wasm_bindgen(js_name = openEditTask)]
    pub fn open_edit_task(&self, action_url: String, draft: JsValue) -> Result<(), JsError> {
        let draft: TaskDraft = from_js(draft)?;
        self.inner
            .state
            .borrow_mut()
            .task_modal
            .open_edit(action_url, draft);
        Ok(())
    }

    #[wasm_bindgen(js_name = closeTaskModal)]
    pub fn close_task_modal(&self) {
        self.inner.state.borrow_mut().task_modal.close();
    }

    #[wasm_bindgen(js_name = openCreateList)]
    pub fn open_create_list(&self, action_url: String) {
        self.inner
            .state
            .borrow_mut()
            .list_modal
            .open_create(action_url);
    }

    #[wasm_bindgen(js_name = openEditList)]
    pub fn open_edit_list(&self, action_url: String, title: String) {
        self.inner
            .state
            .borrow_mut()
            .list_modal
            .open_edit(action_url, title);
    }

    #[wasm_bindgen(js_name = closeListModal)]
    pub fn close_list_modal(&self) {
        self.inner.state.borrow_mut().list_modal.close();
    }

    #[wasm_bindgen(js_name = openDeleteList)]
    pub fn open_delete_list(&self, action_url: String) {
        self.inner.state.borrow_mut().list_delete.open(action_url);
    }

    #[wasm_bindgen(js_name = closeDeleteList)]
    pub fn close_delete_list(&self) {
        self.inner.state.borrow_mut().list_delete.close();
    }

    #[wasm_bindgen(js_name = toggleAddMember)]
    pub fn toggle_add_member(&self) {
        self.inner.state.borrow_mut().toggle_add_member();
    }

    /// Escape key: close every dialog and panel.
    #[wasm_bindgen(js_name = closeAll)]
    pub fn close_all(&self) {
        self.inner.state.borrow_mut().close_all();
    }
}

/// Id carried in `attribute` by the event target or its nearest ancestor.
fn event_id(event: &DragEvent, attribute: &str) -> Option<String> {
    let target: Element = event.target()?.dyn_into().ok()?;
    let element = target.closest(&format!("[{}]", attribute)).ok()??;
    element.get_attribute(attribute)
}

/// Mark a drag as a move. Firefox only starts the drag when some data is set.
fn allow_move(event: &DragEvent, id: &str) {
    let Some(transfer) = event.data_transfer() else {
        return;
    };
    transfer.set_effect_allowed("move");
    transfer.set_drop_effect("move");
    if let Err(e) = transfer.set_data("text/plain", id) {
        log::debug!("Could not set drag data: {:?}", e);
    }
}
