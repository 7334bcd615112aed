//! Unauthenticated health probes.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use super::now;
use crate::state::AppState;

async fn storage_ready(state: &AppState) -> bool {
    state.run(|pds| Ok(pds.is_ready())).await.unwrap_or(false)
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let ready = storage_ready(&state).await;
    Json(json!({
        "status": "healthy",
        "service": "webid-pds",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": now(),
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "environment": state.environment.as_str(),
        "checks": {
            "storage": if ready { "ok" } else { "unavailable" },
        },
    }))
}

pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if storage_ready(&state).await {
        (StatusCode::OK, Json(json!({ "status": "ready", "timestamp": now() })))
    } else {
        tracing::warn!("readiness check failed: storage root unavailable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not_ready", "timestamp": now() })),
        )
    }
}

pub async fn live() -> Json<Value> {
    Json(json!({ "status": "alive", "timestamp": now() }))
}
