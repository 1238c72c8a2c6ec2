//! Board records exchanged with the backend.
//!
//! Everything here is deserialized leniently: unknown fields are ignored and
//! optional fields default, because the server-rendered application owns the
//! payload shapes and may grow them at any time.

use serde::{Deserialize, Serialize};

use crate::ids::{ActivityId, CommentId, TaskId};

/// Task priority, mirroring the backend's choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Task workflow status, mirroring the backend's choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

/// A comment on a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: Option<CommentId>,
    /// Display name of the author.
    #[serde(default, alias = "user", alias = "username")]
    pub author: String,
    pub content: String,
    /// Server-formatted timestamp, shown verbatim.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A task listed in the archive panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedTask {
    pub id: TaskId,
    #[serde(default)]
    pub title: String,
    /// Title of the list the task was archived from.
    #[serde(default, alias = "list")]
    pub list_title: Option<String>,
    #[serde(default)]
    pub archived_at: Option<String>,
}

/// One entry of a board's activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub id: Option<ActivityId>,
    #[serde(default, alias = "user", alias = "username")]
    pub actor: String,
    /// Human-readable description of what happened.
    #[serde(default, alias = "message", alias = "verb")]
    pub action: String,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `GET .../comments/` response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CommentsResponse {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// `GET .../archived/` response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ArchivedTasksResponse {
    #[serde(default)]
    pub tasks: Vec<ArchivedTask>,
}

/// `GET .../activity/` response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ActivitiesResponse {
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// Envelope shared by the mutating endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SuccessEnvelope {
    pub success: Option<bool>,
    pub error: Option<String>,
    pub is_archived: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_author_aliases() {
        let c: Comment = serde_json::from_str(r#"{"id": 1, "user": "somchai", "content": "hi"}"#).unwrap();
        assert_eq!(c.author, "somchai");
        assert_eq!(c.id, Some(CommentId::new("1")));
        assert!(c.created_at.is_none());
    }

    #[test]
    fn test_comments_response_missing_field() {
        let r: CommentsResponse = serde_json::from_str("{}").unwrap();
        assert!(r.comments.is_empty());
    }

    #[test]
    fn test_priority_default_and_wire_format() {
        assert_eq!(Priority::default(), Priority::Medium);
        let p: Priority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(p, Priority::High);
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"low\"");
    }

    #[test]
    fn test_status_snake_case() {
        let s: Status = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(s, Status::InProgress);
    }

    #[test]
    fn test_activity_lenient() {
        let a: Activity =
            serde_json::from_str(r#"{"username": "anan", "message": "moved Fix login", "extra": true}"#).unwrap();
        assert_eq!(a.actor, "anan");
        assert_eq!(a.action, "moved Fix login");
    }

    #[test]
    fn test_integer_ids_decode_on_every_record() {
        let a: Activity = serde_json::from_str(r#"{"id": 7, "actor": "anan", "action": "moved a card"}"#).unwrap();
        assert_eq!(a.id, Some(ActivityId::new("7")));

        let c: Comment = serde_json::from_str(r#"{"id": 12, "author": "anan", "content": "ok"}"#).unwrap();
        assert_eq!(c.id, Some(CommentId::new("12")));

        let t: ArchivedTask = serde_json::from_str(r#"{"id": 3, "title": "Old"}"#).unwrap();
        assert_eq!(t.id, TaskId::new("3"));

        let r: ActivitiesResponse =
            serde_json::from_str(r#"{"activities": [{"id": 7, "actor": "anan"}, {"id": "8"}]}"#).unwrap();
        assert_eq!(r.activities.len(), 2);
    }
}
