//! Shared application state.

use std::sync::Arc;
use std::time::Instant;

use webid_pds::{IdentityVerifier, Pds, PdsError};

use crate::config::Environment;

/// State handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub pds: Arc<Pds>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub environment: Environment,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(pds: Pds, verifier: Arc<dyn IdentityVerifier>, environment: Environment) -> Self {
        Self {
            pds: Arc::new(pds),
            verifier,
            environment,
            started_at: Instant::now(),
        }
    }

    pub fn development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Run a store operation on the blocking pool.
    pub async fn run<T, F>(&self, op: F) -> webid_pds::Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Pds) -> webid_pds::Result<T> + Send + 'static,
    {
        let pds = Arc::clone(&self.pds);
        tokio::task::spawn_blocking(move || op(&pds))
            .await
            .map_err(|e| PdsError::Io(std::io::Error::other(format!("store task failed: {e}"))))?
    }
}
