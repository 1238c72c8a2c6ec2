//! Page configuration.
//!
//! The board page embeds its configuration as a small object in the markup
//! (`{ moveUrl: "...", listMoveUrl: "..." }`). Keys are camelCase to match it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{BoardId, TaskId};

/// Default name of the cookie holding the CSRF token.
pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";

/// Default request header echoing the CSRF token.
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid board configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Endpoint template {template:?} has no {{{placeholder}}} placeholder")]
    MissingPlaceholder {
        template: String,
        placeholder: &'static str,
    },
}

/// Where the CSRF token comes from and where it goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CsrfConfig {
    pub cookie_name: String,
    pub header_name: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_CSRF_COOKIE.to_string(),
            header_name: DEFAULT_CSRF_HEADER.to_string(),
        }
    }
}

/// URL templates for the per-entity endpoints.
///
/// `{task_id}` and `{board_id}` are substituted at request time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Endpoints {
    pub comments: String,
    pub add_comment: String,
    pub archived_tasks: String,
    pub activity: String,
    pub toggle_archive: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            comments: "/board/task/{task_id}/comments/".to_string(),
            add_comment: "/board/task/{task_id}/comments/add/".to_string(),
            archived_tasks: "/board/{board_id}/archived/".to_string(),
            activity: "/board/{board_id}/activity/".to_string(),
            toggle_archive: "/board/task/{task_id}/archive/".to_string(),
        }
    }
}

impl Endpoints {
    pub fn comments_url(&self, task: &TaskId) -> Result<String, ConfigError> {
        fill(&self.comments, "task_id", task.as_str())
    }

    pub fn add_comment_url(&self, task: &TaskId) -> Result<String, ConfigError> {
        fill(&self.add_comment, "task_id", task.as_str())
    }

    pub fn archived_tasks_url(&self, board: &BoardId) -> Result<String, ConfigError> {
        fill(&self.archived_tasks, "board_id", board.as_str())
    }

    pub fn activity_url(&self, board: &BoardId) -> Result<String, ConfigError> {
        fill(&self.activity, "board_id", board.as_str())
    }

    pub fn toggle_archive_url(&self, task: &TaskId) -> Result<String, ConfigError> {
        fill(&self.toggle_archive, "task_id", task.as_str())
    }
}

/// Substitute `{placeholder}` in `template`, percent-encoding the value.
fn fill(template: &str, placeholder: &'static str, value: &str) -> Result<String, ConfigError> {
    let pattern = format!("{{{placeholder}}}");
    if !template.contains(&pattern) {
        return Err(ConfigError::MissingPlaceholder {
            template: template.to_string(),
            placeholder,
        });
    }
    Ok(template.replace(&pattern, &urlencoding::encode(value)))
}

/// Configuration of a board detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardConfig {
    /// Board shown on the page; needed by the archive and activity panels.
    pub board_id: Option<BoardId>,
    /// Endpoint receiving task moves.
    pub move_url: Option<String>,
    /// Endpoint receiving list moves.
    pub list_move_url: Option<String>,
    pub endpoints: Endpoints,
    pub csrf: CsrfConfig,
}

impl BoardConfig {
    /// Parse from the JSON form of the page configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Task move endpoint, if configured. Blank counts as unset.
    pub fn move_url(&self) -> Option<&str> {
        non_blank(self.move_url.as_deref())
    }

    /// List move endpoint, if configured. Blank counts as unset.
    pub fn list_move_url(&self) -> Option<&str> {
        non_blank(self.list_move_url.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
