//! In-memory transport implementation.

use super::{ApiError, ApiRequest, ApiResponse, ApiResult, BoxFuture, Transport};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Body returned when no response has been scripted.
const DEFAULT_BODY: &str = r#"{"success": true}"#;

/// Transport that records requests and replays scripted responses,
/// for testing and offline use.
///
/// Responses are consumed in order; once the script runs out every request
/// gets `200 {"success": true}`.
#[derive(Default)]
pub struct MemoryTransport {
    script: Mutex<VecDeque<ApiResult<ApiResponse>>>,
    sent: Mutex<Vec<ApiRequest>>,
}

impl MemoryTransport {
    /// Create a new transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        self.push(Ok(ApiResponse::new(status, body)))
    }

    /// Queue a JSON response.
    pub fn respond_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.respond(status, body.to_string())
    }

    /// Queue a network failure.
    pub fn fail(&self, message: impl Into<String>) -> &Self {
        self.push(Err(ApiError::Network(message.into())))
    }

    fn push(&self, result: ApiResult<ApiResponse>) -> &Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(result);
        }
        self
    }

    /// All requests sent so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.sent.lock().ok().and_then(|sent| sent.last().cloned())
    }
}

impl Transport for MemoryTransport {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, ApiResult<ApiResponse>> {
        Box::pin(async move {
            self.sent
                .lock()
                .map_err(|e| ApiError::Network(format!("Lock error: {}", e)))?
                .push(request);
            let next = self
                .script
                .lock()
                .map_err(|e| ApiError::Network(format!("Lock error: {}", e)))?
                .pop_front();
            next.unwrap_or_else(|| Ok(ApiResponse::new(200, DEFAULT_BODY)))
        })
    }
}
