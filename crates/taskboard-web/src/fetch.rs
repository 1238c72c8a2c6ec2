//! [`Transport`] over the browser's `fetch`.

use taskboard_core::api::{ApiRequest, ApiResponse, BoxFuture, RequestBody};
use taskboard_core::{ApiError, ApiResult, Transport};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestCredentials, RequestInit, Response};

/// Sends requests with `window.fetch`, including same-origin cookies.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for FetchTransport {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, ApiResult<ApiResponse>> {
        Box::pin(async move {
            fetch(request)
                .await
                .map_err(|e| ApiError::Network(js_error_message(&e)))
        })
    }
}

async fn fetch(request: ApiRequest) -> Result<ApiResponse, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

    let init = RequestInit::new();
    init.set_method(request.method.as_str());
    init.set_credentials(RequestCredentials::SameOrigin);

    let headers = Headers::new()?;
    for (name, value) in &request.headers {
        headers.set(name, value)?;
    }
    init.set_headers(&headers);

    match &request.body {
        RequestBody::Empty => {}
        RequestBody::Form(fields) => {
            // The browser picks the multipart boundary and content type.
            let form = FormData::new()?;
            for (name, value) in fields {
                form.append_with_str(name, value)?;
            }
            init.set_body(&form);
        }
        RequestBody::Json(value) => {
            init.set_body(&JsValue::from_str(&value.to_string()));
        }
    }

    let js_request = Request::new_with_str_and_init(&request.url, &init)?;
    let response: Response = JsFuture::from(window.fetch_with_request(&js_request))
        .await?
        .dyn_into()?;
    let body = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .unwrap_or_default();

    Ok(ApiResponse::new(response.status(), body))
}

/// Best-effort readable text of a thrown JS value.
pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}
