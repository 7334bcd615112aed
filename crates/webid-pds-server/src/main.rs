//! `pdsd`: the WebID personal data store server.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use webid_pds::config::DEFAULT_OIDC_ISSUER;
use webid_pds::{Pds, StoreConfig};
use webid_pds_server::{build_router, AppState, Environment, ServerConfig};

#[derive(Debug, Parser)]
#[command(name = "pdsd", version, about = "WebID personal data store server")]
struct Cli {
    /// TOML configuration file. When given, the remaining flags are ignored.
    #[arg(long, env = "PDS_CONFIG")]
    config: Option<PathBuf>,

    /// Socket address to bind, e.g. 127.0.0.1:3000
    #[arg(long, env = "PDS_LISTEN", default_value = "127.0.0.1:3000")]
    listen: String,

    /// Directory holding all store state.
    #[arg(long, env = "DATA_ROOT", default_value = "./data")]
    data_root: PathBuf,

    /// Issuer written into default profiles.
    #[arg(long, env = "OIDC_ISSUER", default_value = DEFAULT_OIDC_ISSUER)]
    oidc_issuer: String,

    #[arg(long, env = "PDS_ENV", value_enum, default_value_t = Environment::Production)]
    environment: Environment,

    /// Accept bearer tokens without verifying signatures.
    #[arg(long, env = "MOCK_MODE")]
    mock_mode: bool,

    /// Base64 Ed25519 public key of the token issuer.
    #[arg(long, env = "PDS_ISSUER_PUBLIC_KEY")]
    issuer_public_key: Option<String>,

    /// Expected `aud` claim of bearer tokens.
    #[arg(long, env = "PDS_AUDIENCE")]
    audience: Option<String>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<ServerConfig> {
        if let Some(path) = &self.config {
            return ServerConfig::from_toml_file(path);
        }
        Ok(ServerConfig {
            listen: self.listen,
            store: StoreConfig {
                data_root: self.data_root,
                oidc_issuer: self.oidc_issuer,
            },
            environment: self.environment,
            mock_mode: self.mock_mode,
            issuer_public_key: self.issuer_public_key,
            audience: self.audience,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "webid_pds=info,webid_pds_server=info,tower_http=info".to_string()),
        )
        .init();

    let config = Cli::parse().into_config()?;
    let verifier = config.build_verifier()?;
    let pds = Pds::open(config.store.clone()).context("failed to initialize storage")?;
    let state = AppState::new(pds, verifier, config.environment);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    info!(
        environment = config.environment.as_str(),
        "webid-pds listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
