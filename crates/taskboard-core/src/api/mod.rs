//! HTTP access to the board backend.

mod client;
mod memory;
mod request;

pub use client::BoardClient;
pub use memory::MemoryTransport;
pub use request::{ApiRequest, ApiResponse, Method, RequestBody};

use crate::config::ConfigError;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Board API errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("Server returned HTTP {status}")]
    Status { status: u16, body: String },
    /// The server answered 2xx but reported `"success": false`.
    #[error("Request rejected: {0}")]
    Rejected(String),
    /// The response body was not what the endpoint promises.
    #[error("Malformed response: {0}")]
    Decode(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether the server saw and refused the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Rejected(_))
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Sends requests to the backend.
///
/// Implementations exist for the browser's `fetch` and for memory.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Transport: Send + Sync {
    /// Send a request and resolve with whatever status the server returned.
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, ApiResult<ApiResponse>>;
}

/// Sends requests to the backend (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Transport {
    /// Send a request and resolve with whatever status the server returned.
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, ApiResult<ApiResponse>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_classification() {
        assert!(ApiError::Status { status: 403, body: String::new() }.is_rejection());
        assert!(ApiError::Rejected("nope".into()).is_rejection());
        assert!(!ApiError::Network("offline".into()).is_rejection());
        assert!(!ApiError::Decode("eof".into()).is_rejection());
    }

    #[test]
    fn test_config_error_conversion() {
        let err: ApiError = ConfigError::MissingPlaceholder {
            template: "/x/".into(),
            placeholder: "task_id",
        }
        .into();
        assert!(matches!(err, ApiError::Config(msg) if msg.contains("{task_id}")));
    }
}
