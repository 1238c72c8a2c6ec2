//! View state of the board and project pages.
//!
//! Each page owns one state object. Operations that talk to the server come
//! in two flavours: an `async fn` for owners that can hold `&mut self`
//! across an await, and a `begin_*`/`finish_*` pair for event handlers that
//! must release their borrow while the request is in flight.

mod archive;
mod board;
mod comments;
mod modals;
mod project;

pub use archive::{ActivityFeed, ArchivePanel, ArchiveToggle, TOGGLE_FAILED_MESSAGE};
pub use board::{BoardPage, BoardPageView};
pub use comments::{CommentThread, POST_FAILED_MESSAGE, PendingComment};
pub use modals::{ConfirmDialog, ListModal, ModalMode, TaskDraft, TaskModal};
pub use project::{BoardModal, ProjectPage};
