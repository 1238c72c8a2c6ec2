//! Archive panel and activity feed of the board page.

use serde::Serialize;

use crate::api::{ApiError, ApiResult, BoardClient, Transport};
use crate::ids::{BoardId, TaskId};
use crate::model::{Activity, ArchivedTask};
use crate::shell::Shell;

/// Message shown when an archive toggle never reached the server.
pub const TOGGLE_FAILED_MESSAGE: &str = "Could not update the archive.";

/// Result of toggling a task's archive state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveToggle {
    /// The server applied the change; the page is reloading.
    Applied { archived: bool },
    /// The server refused; the message was shown to the user.
    Refused(String),
    /// The request failed in transit.
    Failed,
}

/// Side panel listing a board's archived tasks.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivePanel {
    pub open: bool,
    loading: bool,
    tasks: Vec<ArchivedTask>,
}

impl ArchivePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[ArchivedTask] {
        &self.tasks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_load(&mut self) {
        self.open = true;
        self.loading = true;
    }

    pub fn finish_load(&mut self, result: ApiResult<Vec<ArchivedTask>>) {
        self.loading = false;
        match result {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => log::error!("Failed to load archived tasks: {}", e),
        }
    }

    /// Open the panel and fetch the board's archived tasks.
    pub async fn load<T: Transport>(&mut self, board: &BoardId, client: &BoardClient<T>) {
        self.begin_load();
        let result = client.archived_tasks(board).await;
        self.finish_load(result);
    }

    /// Apply the server's answer to a toggle of `task`.
    pub fn finish_toggle(&mut self, task: &TaskId, result: ApiResult<bool>, shell: &dyn Shell) -> ArchiveToggle {
        match result {
            Ok(archived) => {
                log::info!("Task {} archived: {}", task, archived);
                if !archived {
                    self.tasks.retain(|t| &t.id != task);
                }
                shell.reload();
                ArchiveToggle::Applied { archived }
            }
            Err(e) if e.is_rejection() => {
                log::error!("Archive toggle refused for task {}: {}", task, e);
                let message = match e {
                    ApiError::Rejected(reason) => reason,
                    other => other.to_string(),
                };
                shell.alert(&message);
                ArchiveToggle::Refused(message)
            }
            Err(e) => {
                log::error!("Archive toggle failed for task {}: {}", task, e);
                shell.alert(TOGGLE_FAILED_MESSAGE);
                ArchiveToggle::Failed
            }
        }
    }

    /// Archive or restore `task`.
    pub async fn toggle<T: Transport>(
        &mut self,
        task: &TaskId,
        client: &BoardClient<T>,
        shell: &dyn Shell,
    ) -> ArchiveToggle {
        let result = client.toggle_archive(task).await;
        self.finish_toggle(task, result, shell)
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

/// Side panel showing a board's activity log.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFeed {
    pub open: bool,
    loading: bool,
    entries: Vec<Activity>,
}

impl ActivityFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Activity] {
        &self.entries
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_load(&mut self) {
        self.open = true;
        self.loading = true;
    }

    pub fn finish_load(&mut self, result: ApiResult<Vec<Activity>>) {
        self.loading = false;
        match result {
            Ok(entries) => self.entries = entries,
            Err(e) => log::error!("Failed to load activity: {}", e),
        }
    }

    /// Open the feed and fetch the board's activity log.
    pub async fn load<T: Transport>(&mut self, board: &BoardId, client: &BoardClient<T>) {
        self.begin_load();
        let result = client.activity(board).await;
        self.finish_load(result);
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}
