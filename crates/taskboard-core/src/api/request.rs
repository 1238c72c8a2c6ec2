//! Transport-neutral request and response values.

use serde::de::DeserializeOwned;

use super::{ApiError, ApiResult};

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Form fields, in order. The browser sends these as `FormData`.
    Form(Vec<(String, String)>),
    Json(serde_json::Value),
}

impl RequestBody {
    /// Look up a form field by name.
    pub fn form_field(&self, name: &str) -> Option<&str> {
        match self {
            Self::Form(fields) => fields
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }
}

/// A request to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn post(url: impl Into<String>, body: RequestBody) -> Self {
        let mut request = Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body,
        };
        if matches!(request.body, RequestBody::Json(_)) {
            request = request.with_header("Content-Type", "application/json");
        }
        request
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether the request changes server state and so needs a CSRF token.
    pub fn is_mutating(&self) -> bool {
        self.method != Method::Get
    }
}

/// A response from the backend, with the body already read as text.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into [`ApiError::Status`].
    pub fn error_for_status(self) -> ApiResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_field_lookup() {
        let body = RequestBody::Form(vec![
            ("task_id".into(), "5".into()),
            ("order".into(), "10,5,8".into()),
        ]);
        assert_eq!(body.form_field("order"), Some("10,5,8"));
        assert_eq!(body.form_field("missing"), None);
    }

    #[test]
    fn test_json_post_sets_content_type() {
        let request = ApiRequest::post("/x/", RequestBody::Json(serde_json::json!({"content": "hi"})));
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert!(request.is_mutating());
    }

    #[test]
    fn test_get_is_not_mutating() {
        let request = ApiRequest::get("/x/");
        assert!(!request.is_mutating());
        assert_eq!(request.header("Content-Type"), None);
    }

    #[test]
    fn test_error_for_status() {
        assert!(ApiResponse::new(204, "").error_for_status().is_ok());
        let err = ApiResponse::new(404, "missing").error_for_status().unwrap_err();
        assert_eq!(err, ApiError::Status { status: 404, body: "missing".into() });
    }

    #[test]
    fn test_json_decode_error() {
        let response = ApiResponse::new(200, "<html>");
        let result: ApiResult<serde_json::Value> = response.json();
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
