//! Credential identifiers.

use serde::{Deserialize, Serialize};

use crate::error::{PdsError, Result};

/// A caller-supplied credential identifier matching `[a-zA-Z0-9_-]+`.
///
/// Construction is the only validation point: once a `CredentialId`
/// exists it can be joined onto a directory without further checks,
/// because it can never hold a separator or a `..` sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CredentialId(String);

impl CredentialId {
    /// Validate `raw` against the identifier grammar.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::InvalidIdentifier` if `raw` is empty or contains
    /// any character outside `[a-zA-Z0-9_-]`.
    pub fn parse(raw: &str) -> Result<Self> {
        let valid = !raw.is_empty()
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if !valid {
            return Err(PdsError::InvalidIdentifier(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CredentialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CredentialId {
    type Error = PdsError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CredentialId> for String {
    fn from(value: CredentialId) -> Self {
        value.0
    }
}

impl std::str::FromStr for CredentialId {
    type Err = PdsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
