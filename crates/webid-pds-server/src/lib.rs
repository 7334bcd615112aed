//! HTTP surface of the WebID personal data store.
//!
//! The router is built over an [`AppState`] holding the store and the
//! identity verifier, so tests can drive it in-process without a socket.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use config::{Environment, ServerConfig};
pub use error::ApiError;
pub use state::AppState;

use routes::{acl, credentials, health, method_not_allowed, profile};

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health).fallback(method_not_allowed))
        .route("/health/ready", get(health::ready).fallback(method_not_allowed))
        .route("/health/live", get(health::live).fallback(method_not_allowed))
        .route(
            "/profile/card",
            get(profile::get_card)
                .put(profile::put_card)
                .fallback(method_not_allowed),
        )
        .route(
            "/credentials/index.ttl",
            get(credentials::get_index).fallback(method_not_allowed),
        )
        .route(
            "/credentials/:id",
            get(credentials::get_credential)
                .put(credentials::put_credential)
                .delete(credentials::delete_credential)
                .fallback(method_not_allowed),
        )
        .route(
            "/credentials/:id/.acl",
            get(acl::get_credential_acl)
                .put(acl::put_credential_acl)
                .fallback(method_not_allowed),
        )
        .route(
            "/.acl",
            get(acl::get_container_acl)
                .put(acl::put_container_acl)
                .fallback(method_not_allowed),
        )
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
