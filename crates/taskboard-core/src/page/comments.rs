//! Comment thread of the task detail modal.

use serde::Serialize;

use crate::api::{ApiResult, BoardClient, Transport};
use crate::ids::TaskId;
use crate::model::Comment;
use crate::shell::Shell;

/// Message shown when the server refuses a comment.
pub const POST_FAILED_MESSAGE: &str = "Could not post the comment.";

/// A comment taken from the input box, waiting for the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingComment {
    pub task: TaskId,
    pub content: String,
}

/// Comments of the task currently open in the detail modal.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    current_task: Option<TaskId>,
    comments: Vec<Comment>,
    /// Text in the comment input box.
    pub draft: String,
    loading: bool,
}

impl CommentThread {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_task(&self) -> Option<&TaskId> {
        self.current_task.as_ref()
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Switch to `task` and mark its comments as loading.
    pub fn begin_load(&mut self, task: TaskId) {
        self.current_task = Some(task);
        self.comments.clear();
        self.loading = true;
    }

    /// Apply the result of loading `task`'s comments.
    ///
    /// Results for a task that is no longer shown are dropped.
    pub fn finish_load(&mut self, task: &TaskId, result: ApiResult<Vec<Comment>>) {
        if self.current_task.as_ref() != Some(task) {
            log::debug!("Dropping stale comments for task {}", task);
            return;
        }
        self.loading = false;
        match result {
            Ok(comments) => self.comments = comments,
            Err(e) => log::error!("Failed to load comments for task {}: {}", task, e),
        }
    }

    /// Load the comments of `task`.
    pub async fn load<T: Transport>(&mut self, task: TaskId, client: &BoardClient<T>) {
        self.begin_load(task.clone());
        let result = client.comments(&task).await;
        self.finish_load(&task, result);
    }

    /// Take the draft for sending and clear the input box.
    ///
    /// Returns `None` for a blank draft or when no task is open.
    pub fn begin_post(&mut self) -> Option<PendingComment> {
        if self.draft.trim().is_empty() {
            return None;
        }
        let task = self.current_task.clone()?;
        Some(PendingComment {
            task,
            content: std::mem::take(&mut self.draft),
        })
    }

    /// Apply the server's answer to a posted comment.
    ///
    /// The new comment goes to the top of the thread. On failure the text
    /// returns to the input box unless something new was typed meanwhile.
    pub fn finish_post(&mut self, pending: PendingComment, result: ApiResult<Comment>, shell: &dyn Shell) {
        match result {
            Ok(comment) => {
                if self.current_task.as_ref() == Some(&pending.task) {
                    self.comments.insert(0, comment);
                }
            }
            Err(e) => {
                log::error!("Failed to post comment on task {}: {}", pending.task, e);
                if e.is_rejection() {
                    shell.alert(POST_FAILED_MESSAGE);
                }
                self.restore_draft(pending);
            }
        }
    }

    fn restore_draft(&mut self, pending: PendingComment) {
        if self.current_task.as_ref() != Some(&pending.task) {
            return;
        }
        if self.draft.is_empty() {
            self.draft = pending.content;
        } else {
            log::warn!("Comment input changed while posting; keeping the new text");
        }
    }

    /// Post the draft as a comment on the current task.
    pub async fn post<T: Transport>(&mut self, client: &BoardClient<T>, shell: &dyn Shell) {
        let Some(pending) = self.begin_post() else {
            return;
        };
        let result = client.add_comment(&pending.task, &pending.content).await;
        self.finish_post(pending, result, shell);
    }

    /// Close the thread.
    pub fn close(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MemoryTransport};
    use crate::csrf::StaticCookies;
    use crate::shell::RecordingShell;
    use pollster::block_on;
    use serde_json::json;

    fn client() -> BoardClient<MemoryTransport> {
        BoardClient::new(MemoryTransport::new(), StaticCookies::new("csrftoken=tok"))
    }

    fn comment(content: &str) -> Comment {
        Comment {
            id: None,
            author: "me".into(),
            content: content.into(),
            created_at: None,
        }
    }

    #[test]
    fn test_load_comments() {
        let client = client();
        client.transport().respond_json(
            200,
            json!({"comments": [{"author": "a", "content": "one"}, {"author": "b", "content": "two"}]}),
        );
        let mut thread = CommentThread::new();
        block_on(thread.load(TaskId::new("1"), &client));

        assert!(!thread.is_loading());
        assert_eq!(thread.current_task(), Some(&TaskId::new("1")));
        assert_eq!(thread.comments().len(), 2);
    }

    #[test]
    fn test_load_failure_leaves_empty() {
        let client = client();
        client.transport().fail("offline");
        let mut thread = CommentThread::new();
        block_on(thread.load(TaskId::new("1"), &client));

        assert!(!thread.is_loading());
        assert!(thread.comments().is_empty());
    }

    #[test]
    fn test_stale_load_is_dropped() {
        let mut thread = CommentThread::new();
        thread.begin_load(TaskId::new("1"));
        thread.begin_load(TaskId::new("2"));

        thread.finish_load(&TaskId::new("1"), Ok(vec![comment("old")]));
        assert!(thread.is_loading());
        assert!(thread.comments().is_empty());

        thread.finish_load(&TaskId::new("2"), Ok(vec![comment("new")]));
        assert_eq!(thread.comments()[0].content, "new");
    }

    #[test]
    fn test_blank_draft_posts_nothing() {
        let client = client();
        let shell = RecordingShell::new();
        let mut thread = CommentThread::new();
        thread.begin_load(TaskId::new("1"));
        thread.draft = "   ".into();

        block_on(thread.post(&client, &shell));
        assert!(client.transport().requests().is_empty());
        assert_eq!(thread.draft, "   ");
    }

    #[test]
    fn test_post_without_task_posts_nothing() {
        let client = client();
        let shell = RecordingShell::new();
        let mut thread = CommentThread::new();
        thread.draft = "hello".into();

        block_on(thread.post(&client, &shell));
        assert!(client.transport().requests().is_empty());
        assert_eq!(thread.draft, "hello");
    }

    #[test]
    fn test_post_success_prepends() {
        let client = client();
        client
            .transport()
            .respond_json(200, json!({"comments": [{"author": "a", "content": "older"}]}))
            .respond_json(201, json!({"author": "me", "content": "hello"}));
        let shell = RecordingShell::new();
        let mut thread = CommentThread::new();
        block_on(thread.load(TaskId::new("1"), &client));

        thread.draft = "hello".into();
        block_on(thread.post(&client, &shell));

        assert_eq!(thread.draft, "");
        assert_eq!(thread.comments()[0].content, "hello");
        assert_eq!(thread.comments()[1].content, "older");
        assert!(shell.effects().is_empty());
    }

    #[test]
    fn test_begin_post_clears_input_immediately() {
        let mut thread = CommentThread::new();
        thread.begin_load(TaskId::new("1"));
        thread.draft = "hello".into();

        let pending = thread.begin_post().unwrap();
        assert_eq!(pending.content, "hello");
        assert_eq!(thread.draft, "");
    }

    #[test]
    fn test_rejected_post_alerts_and_restores() {
        let client = client();
        client.transport().respond(500, "error");
        let shell = RecordingShell::new();
        let mut thread = CommentThread::new();
        thread.begin_load(TaskId::new("1"));
        thread.draft = "hello".into();

        block_on(thread.post(&client, &shell));
        assert_eq!(thread.draft, "hello");
        assert_eq!(shell.alerts(), vec![POST_FAILED_MESSAGE.to_string()]);
        assert!(thread.comments().is_empty());
    }

    #[test]
    fn test_network_failure_restores_without_alert() {
        let client = client();
        client.transport().fail("offline");
        let shell = RecordingShell::new();
        let mut thread = CommentThread::new();
        thread.begin_load(TaskId::new("1"));
        thread.draft = "hello".into();

        block_on(thread.post(&client, &shell));
        assert_eq!(thread.draft, "hello");
        assert!(shell.effects().is_empty());
    }

    #[test]
    fn test_restore_keeps_newer_text() {
        let shell = RecordingShell::new();
        let mut thread = CommentThread::new();
        thread.begin_load(TaskId::new("1"));
        thread.draft = "first".into();
        let pending = thread.begin_post().unwrap();

        thread.draft = "second".into();
        thread.finish_post(pending, Err(ApiError::Network("offline".into())), &shell);
        assert_eq!(thread.draft, "second");
    }

    #[test]
    fn test_close_resets() {
        let mut thread = CommentThread::new();
        thread.begin_load(TaskId::new("1"));
        thread.draft = "x".into();
        thread.close();
        assert!(thread.current_task().is_none());
        assert!(thread.draft.is_empty());
    }
}
