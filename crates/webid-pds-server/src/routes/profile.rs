//! `/profile/card`

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::Response,
    Json,
};
use serde_json::{json, Value};
use webid_pds::MediaType;

use super::{document, header_value, now};
use crate::auth::Caller;
use crate::error::ApiError;
use crate::extract::Payload;
use crate::state::AppState;

pub async fn get_card(caller: Caller, State(state): State<AppState>) -> Result<Response, ApiError> {
    let webid = caller.webid().clone();
    let body = state
        .run(move |pds| pds.profiles().get(&webid))
        .await
        .map_err(|e| caller.fail(e))?;
    Ok(document(MediaType::TURTLE, body))
}

pub async fn put_card(
    caller: Caller,
    State(state): State<AppState>,
    headers: HeaderMap,
    Payload(body): Payload,
) -> Result<Json<Value>, ApiError> {
    let webid = caller.webid().clone();
    let content_type = header_value(&headers, header::CONTENT_TYPE);
    state
        .run(move |pds| pds.profiles().put(&webid, content_type.as_deref(), &body))
        .await
        .map_err(|e| caller.fail(e))?;

    tracing::info!(webid = %caller.webid(), "profile updated");
    Ok(Json(json!({
        "message": "Profile updated successfully",
        "webid": caller.webid().as_str(),
        "timestamp": now(),
    })))
}
