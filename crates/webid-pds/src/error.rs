//! Error types for the personal data store.
//!
//! All errors are strongly typed and propagated without panicking.
//! Validation failures are raised before any filesystem access, so a
//! rejected request never leaves a partial write behind.

use std::path::PathBuf;

/// Store error types covering all operations.
#[derive(Debug, thiserror::Error)]
pub enum PdsError {
    #[error("Invalid WebID: {0}")]
    InvalidIdentity(String),

    #[error("Invalid credential ID format: {0}")]
    InvalidIdentifier(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Malformed body: {0}")]
    MalformedBody(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Path escapes storage root: {}", .0.display())]
    PathEscape(PathBuf),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Operation not supported: {0}")]
    UnsupportedOperation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PdsError {
    /// Stable machine-readable kind, suitable for API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            PdsError::InvalidIdentity(_) => "invalid_identity",
            PdsError::InvalidIdentifier(_) => "invalid_identifier",
            PdsError::UnsupportedMediaType(_) => "unsupported_media_type",
            PdsError::MalformedBody(_) => "malformed_body",
            PdsError::NotFound(_) => "not_found",
            PdsError::PathEscape(_) => "path_escape",
            PdsError::Unauthorized(_) => "unauthorized",
            PdsError::TokenExpired => "token_expired",
            PdsError::UnsupportedOperation(_) => "unsupported_operation",
            PdsError::InvalidConfig(_) => "invalid_config",
            PdsError::SerializationError(_) => "serialization",
            PdsError::Io(_) => "io_failure",
        }
    }

    /// `true` for faults of the storage layer rather than of the request.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            PdsError::Io(_)
                | PdsError::PathEscape(_)
                | PdsError::SerializationError(_)
                | PdsError::InvalidConfig(_)
        )
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, PdsError>;
