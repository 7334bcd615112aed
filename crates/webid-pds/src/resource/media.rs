//! The two credential representations and content-type handling.

use serde::{Deserialize, Serialize};

use crate::error::{PdsError, Result};

/// A stored document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    /// `text/turtle`, stored as `.ttl`.
    Turtle,
    /// `application/ld+json`, stored as `.jsonld`.
    JsonLd,
}

impl MediaType {
    pub const TURTLE: &'static str = "text/turtle";
    pub const JSON_LD: &'static str = "application/ld+json";

    /// The content type sent on the wire.
    pub fn content_type(self) -> &'static str {
        match self {
            MediaType::Turtle => Self::TURTLE,
            MediaType::JsonLd => Self::JSON_LD,
        }
    }

    /// File extension of the stored representation.
    pub fn extension(self) -> &'static str {
        match self {
            MediaType::Turtle => "ttl",
            MediaType::JsonLd => "jsonld",
        }
    }

    /// Parse a `Content-Type` header accepted for credentials.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::UnsupportedMediaType` unless the essence is
    /// `text/turtle` or `application/ld+json`.
    pub fn from_content_type(header: Option<&str>) -> Result<Self> {
        let essence = header.map(essence).unwrap_or_default();
        match essence.as_str() {
            Self::TURTLE => Ok(MediaType::Turtle),
            Self::JSON_LD => Ok(MediaType::JsonLd),
            _ => Err(PdsError::UnsupportedMediaType(format!(
                "Content-Type must be {} or {}, got {:?}",
                Self::TURTLE,
                Self::JSON_LD,
                header.unwrap_or("")
            ))),
        }
    }

    /// Require a Turtle `Content-Type` (profiles and ACL documents).
    ///
    /// # Errors
    ///
    /// Returns `PdsError::UnsupportedMediaType` for anything else.
    pub fn require_turtle(header: Option<&str>) -> Result<()> {
        match Self::from_content_type(header) {
            Ok(MediaType::Turtle) => Ok(()),
            _ => Err(PdsError::UnsupportedMediaType(format!(
                "Content-Type must be {}",
                Self::TURTLE
            ))),
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.content_type())
    }
}

/// The media type essence: parameters dropped, trimmed, lowercased.
pub fn essence(header: &str) -> String {
    header
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Validate a plain-text document body (Turtle, ACL, profile).
///
/// # Errors
///
/// Returns `PdsError::MalformedBody` if `body` is not UTF-8 or is blank.
pub fn require_text(body: &[u8]) -> Result<&str> {
    let text = std::str::from_utf8(body)
        .map_err(|_| PdsError::MalformedBody("Invalid Turtle content".to_string()))?;
    if text.trim().is_empty() {
        return Err(PdsError::MalformedBody("Missing request body".to_string()));
    }
    Ok(text)
}
