//! Request handlers, one module per resource type.

pub mod acl;
pub mod credentials;
pub mod health;
pub mod profile;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, Method, Uri},
    response::{IntoResponse, Response},
};
use webid_pds::PdsError;

use crate::error::ApiError;
use crate::state::AppState;

/// A stored document with its content type, never cached.
pub(crate) fn document(content_type: &'static str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response()
}

/// An owned header value, if present and visible ASCII.
pub(crate) fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub(crate) fn now() -> String {
    webid_pds::time::now_rfc3339()
}

/// Unmatched routes.
pub async fn not_found(State(state): State<AppState>, method: Method, uri: Uri) -> ApiError {
    ApiError::new(
        PdsError::NotFound(format!("Route {method} {} not found", uri.path())),
        uri.path(),
        state.development(),
    )
}

/// Known routes asked for a method they do not serve.
pub async fn method_not_allowed(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> ApiError {
    ApiError::new(
        PdsError::UnsupportedOperation(format!("{method} is not allowed on {}", uri.path())),
        uri.path(),
        state.development(),
    )
}
