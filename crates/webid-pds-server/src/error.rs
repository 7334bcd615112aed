//! Structured error responses.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use webid_pds::PdsError;

/// A store error bound to the request path it occurred on.
#[derive(Debug)]
pub struct ApiError {
    pub error: PdsError,
    pub path: String,
    /// Include debug detail in the body.
    pub development: bool,
    status: Option<StatusCode>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
    pub message: String,
    pub timestamp: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(error: PdsError, path: impl Into<String>, development: bool) -> Self {
        Self {
            error,
            path: path.into(),
            development,
            status: None,
        }
    }

    /// Answer with `status` instead of the one mapped from the error kind.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or_else(|| status_of(&self.error))
    }
}

/// HTTP status for each error kind.
pub fn status_of(error: &PdsError) -> StatusCode {
    match error {
        PdsError::InvalidIdentity(_)
        | PdsError::InvalidIdentifier(_)
        | PdsError::UnsupportedMediaType(_)
        | PdsError::MalformedBody(_) => StatusCode::BAD_REQUEST,
        PdsError::NotFound(_) => StatusCode::NOT_FOUND,
        PdsError::Unauthorized(_) | PdsError::TokenExpired => StatusCode::UNAUTHORIZED,
        PdsError::UnsupportedOperation(_) => StatusCode::METHOD_NOT_ALLOWED,
        PdsError::PathEscape(_)
        | PdsError::SerializationError(_)
        | PdsError::InvalidConfig(_)
        | PdsError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if self.error.is_server_fault() {
            tracing::error!(path = %self.path, error = %self.error, "request failed");
            if self.development {
                self.error.to_string()
            } else {
                "Internal server error".to_string()
            }
        } else {
            self.error.to_string()
        };

        let body = ErrorBody {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            kind: self.error.kind(),
            message,
            timestamp: webid_pds::time::now_rfc3339(),
            path: self.path,
            detail: self.development.then(|| format!("{:?}", self.error)),
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
