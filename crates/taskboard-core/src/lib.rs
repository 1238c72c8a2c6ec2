//! Taskboard Core Library
//!
//! Platform-agnostic client logic for the Taskboard kanban board: drag-and-drop
//! reordering, the board API client and page view state.

pub mod api;
pub mod config;
pub mod csrf;
pub mod drag;
pub mod ids;
pub mod layout;
pub mod model;
pub mod page;
pub mod shell;

pub use api::{ApiError, ApiResult, BoardClient, MemoryTransport, Transport};
pub use config::{BoardConfig, ConfigError, CsrfConfig, Endpoints};
pub use csrf::{CookieSource, StaticCookies};
pub use drag::{DragCoordinator, DragOverEffect, DragTarget, DropOutcome, DropRequest};
pub use ids::{ActivityId, BoardId, CommentId, ListId, TaskId};
pub use layout::{Layout, MemoryLayout, Placement};
pub use model::{Activity, ArchivedTask, Comment, Priority, Status};
pub use page::{BoardPage, ProjectPage};
pub use shell::{RecordingShell, Shell, ShellEffect};
