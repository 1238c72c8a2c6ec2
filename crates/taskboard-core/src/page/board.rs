//! Board detail page state.

use serde::Serialize;

use super::archive::{ActivityFeed, ArchivePanel};
use super::comments::CommentThread;
use super::modals::{ConfirmDialog, ListModal, TaskModal};
use crate::api::{BoardClient, Transport};
use crate::config::BoardConfig;
use crate::drag::{DragCoordinator, DragTarget};
use crate::ids::BoardId;

/// Everything the board detail page keeps between events.
///
/// One instance per page, owned by the view layer.
#[derive(Debug, Clone, Default)]
pub struct BoardPage {
    config: BoardConfig,
    pub drag: DragCoordinator,
    pub comments: CommentThread,
    pub archive: ArchivePanel,
    pub activity: ActivityFeed,
    pub task_modal: TaskModal,
    pub list_modal: ListModal,
    pub list_delete: ConfirmDialog,
    pub add_member_open: bool,
}

/// Serializable view of [`BoardPage`] for templates.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPageView<'a> {
    pub dragging: Option<&'a DragTarget>,
    pub comments: &'a CommentThread,
    pub archive: &'a ArchivePanel,
    pub activity: &'a ActivityFeed,
    pub task_modal: &'a TaskModal,
    pub list_modal: &'a ListModal,
    pub list_delete: &'a ConfirmDialog,
    pub add_member_open: bool,
}

impl BoardPage {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            drag: DragCoordinator::from_config(&config),
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn board_id(&self) -> Option<&BoardId> {
        self.config.board_id.as_ref()
    }

    pub fn view(&self) -> BoardPageView<'_> {
        BoardPageView {
            dragging: self.drag.session(),
            comments: &self.comments,
            archive: &self.archive,
            activity: &self.activity,
            task_modal: &self.task_modal,
            list_modal: &self.list_modal,
            list_delete: &self.list_delete,
            add_member_open: self.add_member_open,
        }
    }

    pub fn toggle_add_member(&mut self) {
        self.add_member_open = !self.add_member_open;
    }

    /// Open the archive panel and load it.
    pub async fn open_archive<T: Transport>(&mut self, client: &BoardClient<T>) {
        let Some(board) = self.config.board_id.clone() else {
            log::warn!("Archive panel needs a boardId in the page configuration");
            return;
        };
        self.archive.load(&board, client).await;
    }

    /// Open the activity feed and load it.
    pub async fn open_activity<T: Transport>(&mut self, client: &BoardClient<T>) {
        let Some(board) = self.config.board_id.clone() else {
            log::warn!("Activity feed needs a boardId in the page configuration");
            return;
        };
        self.activity.load(&board, client).await;
    }

    /// Close every dialog and panel. Drag state is left alone.
    pub fn close_all(&mut self) {
        self.task_modal.close();
        self.list_modal.close();
        self.list_delete.close();
        self.archive.close();
        self.activity.close();
        self.comments.close();
        self.add_member_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryTransport;
    use crate::csrf::StaticCookies;
    use crate::ids::{ListId, TaskId};
    use crate::layout::{Layout, MemoryLayout};
    use crate::shell::RecordingShell;
    use pollster::block_on;
    use serde_json::json;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn config() -> BoardConfig {
        BoardConfig::from_json(
            r#"{"boardId": 1, "moveUrl": "/board/task/move/", "listMoveUrl": "/board/1/list/reorder/"}"#,
        )
        .unwrap()
    }

    fn client() -> BoardClient<MemoryTransport> {
        BoardClient::new(MemoryTransport::new(), StaticCookies::new("csrftoken=tok"))
    }

    #[test]
    fn test_drag_uses_configured_urls() {
        init_logging();
        let mut page = BoardPage::new(config());
        let mut layout = MemoryLayout::new()
            .with_list("1", ["a", "b"])
            .with_list("2", Vec::<&str>::new());
        let client = client();
        let shell = RecordingShell::new();

        page.drag.begin_item_drag(TaskId::new("a"), &mut layout);
        page.drag.drag_over(10.0, &ListId::new("2"), &mut layout);
        block_on(page.drag.drop(&ListId::new("2"), &mut layout, &client, &shell));

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.url, "/board/task/move/");
        assert_eq!(request.body.form_field("order"), Some("a"));
        assert_eq!(layout.items(&ListId::new("1")), vec![TaskId::new("b")]);
    }

    #[test]
    fn test_open_archive_uses_board_id() {
        init_logging();
        let mut page = BoardPage::new(config());
        let client = client();
        client.transport().respond_json(200, json!({"tasks": []}));

        block_on(page.open_archive(&client));
        assert!(page.archive.open);
        assert_eq!(client.transport().last_request().unwrap().url, "/board/1/archived/");
    }

    #[test]
    fn test_panels_without_board_id_do_nothing() {
        init_logging();
        let mut page = BoardPage::new(BoardConfig::default());
        let client = client();

        block_on(page.open_archive(&client));
        block_on(page.open_activity(&client));
        assert!(!page.archive.open);
        assert!(!page.activity.open);
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn test_view_serializes() {
        let mut page = BoardPage::new(config());
        let mut layout = MemoryLayout::new().with_list("1", ["a"]);
        page.drag.begin_container_drag(ListId::new("1"), &mut layout);
        page.task_modal.open_create("Backlog", "/board/task/create/1/");

        let value = serde_json::to_value(page.view()).unwrap();
        assert_eq!(value["dragging"], json!({"kind": "list", "id": "1"}));
        assert_eq!(value["taskModal"]["open"], true);
        assert_eq!(value["addMemberOpen"], false);
    }

    #[test]
    fn test_close_all_keeps_drag() {
        let mut page = BoardPage::new(config());
        let mut layout = MemoryLayout::new().with_list("1", ["a"]);
        page.drag.begin_item_drag(TaskId::new("a"), &mut layout);
        page.toggle_add_member();
        page.list_delete.open("/board/list/1/delete/");

        page.close_all();
        assert!(!page.add_member_open);
        assert!(!page.list_delete.open);
        assert!(page.drag.dragging_task().is_some());
    }
}
