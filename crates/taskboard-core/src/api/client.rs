//! Typed board API over a [`Transport`].

use serde_json::json;

use super::{ApiError, ApiRequest, ApiResponse, ApiResult, RequestBody, Transport};
use crate::config::{CsrfConfig, Endpoints};
use crate::csrf::{CookieSource, find_cookie};
use crate::ids::{BoardId, ListId, TaskId};
use crate::model::{
    ActivitiesResponse, Activity, ArchivedTask, ArchivedTasksResponse, Comment, CommentsResponse,
    SuccessEnvelope,
};

/// Client for the board backend.
///
/// Mutating requests carry the CSRF token read from the cookie source at
/// send time.
pub struct BoardClient<T: Transport> {
    transport: T,
    endpoints: Endpoints,
    csrf: CsrfConfig,
    cookies: Box<dyn CookieSource>,
}

impl<T: Transport> BoardClient<T> {
    /// Create a client with default endpoints and CSRF settings.
    pub fn new(transport: T, cookies: impl CookieSource + 'static) -> Self {
        Self {
            transport,
            endpoints: Endpoints::default(),
            csrf: CsrfConfig::default(),
            cookies: Box::new(cookies),
        }
    }

    /// Override the endpoint templates.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Override the CSRF cookie and header names.
    pub fn with_csrf(mut self, csrf: CsrfConfig) -> Self {
        self.csrf = csrf;
        self
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Current CSRF token, if the cookie is present.
    pub fn csrf_token(&self) -> Option<String> {
        let cookies = self.cookies.cookie_string()?;
        find_cookie(&cookies, &self.csrf.cookie_name)
    }

    /// Move a task into `list` and persist the list's full order.
    pub async fn move_task(
        &self,
        url: &str,
        task: &TaskId,
        list: &ListId,
        order: &[TaskId],
    ) -> ApiResult<()> {
        let order = order
            .iter()
            .map(TaskId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let body = RequestBody::Form(vec![
            ("task_id".to_string(), task.to_string()),
            ("list_id".to_string(), list.to_string()),
            ("order".to_string(), order),
        ]);
        let response = self.post(url, body).await?;
        check_envelope(&response)?;
        Ok(())
    }

    /// Move `list` so that it sits before `target`.
    pub async fn move_list(&self, url: &str, list: &ListId, target: &ListId) -> ApiResult<()> {
        let body = RequestBody::Form(vec![
            ("list_id".to_string(), list.to_string()),
            ("target_id".to_string(), target.to_string()),
        ]);
        let response = self.post(url, body).await?;
        check_envelope(&response)?;
        Ok(())
    }

    /// Comments on a task, newest first as the server orders them.
    pub async fn comments(&self, task: &TaskId) -> ApiResult<Vec<Comment>> {
        let url = self.endpoints.comments_url(task)?;
        let response = self.get(&url).await?;
        Ok(response.json::<CommentsResponse>()?.comments)
    }

    /// Add a comment and return the comment the server created.
    pub async fn add_comment(&self, task: &TaskId, content: &str) -> ApiResult<Comment> {
        let url = self.endpoints.add_comment_url(task)?;
        let response = self
            .post(&url, RequestBody::Json(json!({ "content": content })))
            .await?;
        response.json()
    }

    /// Archived tasks of a board.
    pub async fn archived_tasks(&self, board: &BoardId) -> ApiResult<Vec<ArchivedTask>> {
        let url = self.endpoints.archived_tasks_url(board)?;
        let response = self.get(&url).await?;
        Ok(response.json::<ArchivedTasksResponse>()?.tasks)
    }

    /// Activity log of a board.
    pub async fn activity(&self, board: &BoardId) -> ApiResult<Vec<Activity>> {
        let url = self.endpoints.activity_url(board)?;
        let response = self.get(&url).await?;
        Ok(response.json::<ActivitiesResponse>()?.activities)
    }

    /// Flip a task's archived flag. Returns the new state.
    pub async fn toggle_archive(&self, task: &TaskId) -> ApiResult<bool> {
        let url = self.endpoints.toggle_archive_url(task)?;
        let response = self.post(&url, RequestBody::Empty).await?;
        let envelope = check_envelope(&response)?;
        envelope
            .is_archived
            .ok_or_else(|| ApiError::Decode("missing is_archived".to_string()))
    }

    async fn get(&self, url: &str) -> ApiResult<ApiResponse> {
        self.send(ApiRequest::get(url)).await
    }

    async fn post(&self, url: &str, body: RequestBody) -> ApiResult<ApiResponse> {
        self.send(ApiRequest::post(url, body)).await
    }

    async fn send(&self, mut request: ApiRequest) -> ApiResult<ApiResponse> {
        log::debug!("{} {}", request.method.as_str(), request.url);
        if request.is_mutating() {
            match self.csrf_token() {
                Some(token) => request = request.with_header(self.csrf.header_name.clone(), token),
                None => log::warn!(
                    "No {} cookie; sending {} {} without a CSRF token",
                    self.csrf.cookie_name,
                    request.method.as_str(),
                    request.url
                ),
            }
        }
        self.transport.send(request).await?.error_for_status()
    }
}

/// Check a mutating endpoint's `{success, error}` envelope.
///
/// Empty and non-JSON 2xx bodies count as success; only an explicit
/// `"success": false` is a rejection.
fn check_envelope(response: &ApiResponse) -> ApiResult<SuccessEnvelope> {
    if response.body.trim().is_empty() {
        return Ok(SuccessEnvelope::default());
    }
    let envelope: SuccessEnvelope = match serde_json::from_str(&response.body) {
        Ok(envelope) => envelope,
        Err(_) => return Ok(SuccessEnvelope::default()),
    };
    if envelope.success == Some(false) {
        let reason = envelope
            .error
            .clone()
            .unwrap_or_else(|| "request failed".to_string());
        return Err(ApiError::Rejected(reason));
    }
    Ok(envelope)
}
