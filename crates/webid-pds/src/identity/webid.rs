//! WebID identities and their mapping onto identity roots.
//!
//! A WebID is an absolute URI. It is used purely as a partition key: the
//! host is kept (with unusual characters replaced) and every
//! non-alphanumeric character of the path is replaced by `_`, giving one
//! directory name per identity under the storage root.
//!
//! ```text
//! https://user.example.org/profile/card#me
//!   → {storage_root}/user.example.org_profile_card/
//! ```
//!
//! Distinct WebIDs can collapse onto the same directory name (for example
//! `/a-b` and `/a_b`). No collision detection is attempted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{PdsError, Result};

/// Character substituted for anything outside the allowed set.
const FILLER: char = '_';

/// A syntactically valid absolute URI naming an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WebId {
    uri: String,
    dir_name: String,
}

impl WebId {
    /// Parse and validate a WebID.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::InvalidIdentity` if `uri` is not an absolute URI
    /// or if no usable directory name can be derived from it.
    pub fn parse(uri: &str) -> Result<Self> {
        let url = Url::parse(uri)
            .map_err(|e| PdsError::InvalidIdentity(format!("{uri}: {e}")))?;
        let dir_name = derive_dir_name(&url);

        if dir_name.is_empty() || dir_name.chars().all(|c| c == '.') {
            return Err(PdsError::InvalidIdentity(format!(
                "{uri}: no storage name can be derived"
            )));
        }

        Ok(Self {
            uri: uri.to_string(),
            dir_name,
        })
    }

    /// The URI exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// The filesystem-safe directory name derived from this WebID.
    pub fn dir_name(&self) -> &str {
        &self.dir_name
    }

    /// The profile document URI: the WebID without its fragment.
    pub fn document_uri(&self) -> &str {
        self.uri.split('#').next().unwrap_or(&self.uri)
    }
}

impl std::fmt::Display for WebId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}

impl TryFrom<String> for WebId {
    type Error = PdsError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<WebId> for String {
    fn from(value: WebId) -> Self {
        value.uri
    }
}

impl std::str::FromStr for WebId {
    type Err = PdsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn derive_dir_name(url: &Url) -> String {
    let host: String = url
        .host_str()
        .unwrap_or("")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                FILLER
            }
        })
        .collect();

    let path: String = url
        .path()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { FILLER })
        .collect();

    format!("{host}{path}")
}

// ── IdentityResolver ──────────────────────────────────────────────────────────

/// Maps identities to their root directory under the storage root.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    storage_root: PathBuf,
}

impl IdentityResolver {
    /// Create a resolver for identity roots under `storage_root`.
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
        }
    }

    /// Directory under which identity roots are placed.
    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    /// Resolve an identity to its root directory. Deterministic.
    pub fn resolve(&self, webid: &WebId) -> PathBuf {
        self.storage_root.join(webid.dir_name())
    }

    /// Parse `uri` and resolve it in one step.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::InvalidIdentity` if `uri` is not a valid WebID.
    pub fn resolve_str(&self, uri: &str) -> Result<PathBuf> {
        Ok(self.resolve(&WebId::parse(uri)?))
    }
}
