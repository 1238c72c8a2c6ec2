//! Taskboard Web Shell
//!
//! Binds the board and project pages to the browser: DOM drag events,
//! `fetch`, `document.cookie`, reloads and alerts.

mod selector;

pub use selector::{CARD_SELECTOR, DRAGGING_CLASSES, card, column, container};

#[cfg(target_arch = "wasm32")]
mod board_page;
#[cfg(target_arch = "wasm32")]
mod dom_layout;
#[cfg(target_arch = "wasm32")]
mod fetch;
#[cfg(target_arch = "wasm32")]
mod project_page;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use board_page::BoardDetailPage;
#[cfg(target_arch = "wasm32")]
pub use dom_layout::DomLayout;
#[cfg(target_arch = "wasm32")]
pub use fetch::FetchTransport;
#[cfg(target_arch = "wasm32")]
pub use project_page::ProjectOverviewPage;
#[cfg(target_arch = "wasm32")]
pub use web::{BrowserShell, DocumentCookies, run_wasm};
