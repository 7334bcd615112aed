//! Store configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default OpenID issuer advertised in generated profiles.
pub const DEFAULT_OIDC_ISSUER: &str = "https://oidc.solid.gov.uk";

/// Configuration for a [`Pds`](crate::Pds) instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding all store state. Identity roots live under
    /// `{data_root}/storage`.
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,

    /// Issuer written into default profile documents.
    #[serde(default = "default_oidc_issuer")]
    pub oidc_issuer: String,
}

impl StoreConfig {
    /// Configuration rooted at `data_root` with every other field defaulted.
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            oidc_issuer: default_oidc_issuer(),
        }
    }

    /// Directory under which every identity root is created.
    pub fn storage_root(&self) -> PathBuf {
        storage_root_of(&self.data_root)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(default_data_root())
    }
}

fn storage_root_of(data_root: &Path) -> PathBuf {
    data_root.join("storage")
}

fn default_data_root() -> PathBuf {
    PathBuf::from("./data")
}

fn default_oidc_issuer() -> String {
    DEFAULT_OIDC_ISSUER.to_string()
}
