//! Server configuration.
//!
//! Assembled from command-line flags (which also read the environment)
//! or loaded from a TOML file passed with `--config`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use webid_pds::{AcceptAllVerifier, IdentityVerifier, SignatureVerifier, StoreConfig};

/// Deployment environment. Only `Development` exposes error detail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
    Test,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }
}

/// Complete server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind.
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(flatten)]
    pub store: StoreConfig,

    #[serde(default)]
    pub environment: Environment,

    /// Accept bearer tokens without checking signatures.
    #[serde(default)]
    pub mock_mode: bool,

    /// Base64 Ed25519 public key of the token issuer.
    #[serde(default)]
    pub issuer_public_key: Option<String>,

    /// Expected `aud` claim, if any.
    #[serde(default)]
    pub audience: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            store: StoreConfig::default(),
            environment: Environment::default(),
            mock_mode: false,
            issuer_public_key: None,
            audience: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file. Missing keys take defaults.
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Build the identity verifier this configuration asks for.
    pub fn build_verifier(&self) -> anyhow::Result<Arc<dyn IdentityVerifier>> {
        if self.mock_mode {
            tracing::warn!("mock mode enabled: bearer token signatures are NOT verified");
            return Ok(Arc::new(AcceptAllVerifier));
        }

        let Some(key) = &self.issuer_public_key else {
            bail!("no issuer public key configured; set PDS_ISSUER_PUBLIC_KEY or enable MOCK_MODE");
        };
        let verifier = SignatureVerifier::from_base64(key, self.audience.clone())
            .context("invalid issuer public key")?;
        Ok(Arc::new(verifier))
    }
}

fn default_listen() -> String {
    "127.0.0.1:3000".to_string()
}
