//! `/.acl` and `/credentials/{id}/.acl`

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
use crate::extract::{CredentialPath, Payload};
use crate::state::AppState;

pub async fn get_container_acl(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let webid = caller.webid().clone();
    let body = state
        .run(move |pds| pds.acl().get_container(&webid))
        .await
        .map_err(|e| caller.fail(e))?;
    Ok(document(MediaType::TURTLE, body))
}

pub async fn put_container_acl(
    caller: Caller,
    State(state): State<AppState>,
    headers: HeaderMap,
    Payload(body): Payload,
) -> Result<Json<Value>, ApiError> {
    let webid = caller.webid().clone();
    let content_type = header_value(&headers, header::CONTENT_TYPE);
    state
        .run(move |pds| pds.acl().put_container(&webid, content_type.as_deref(), &body))
        .await
        .map_err(|e| caller.fail(e))?;

    Ok(Json(json!({
        "message": "Access rules updated successfully",
        "webid": caller.webid().as_str(),
        "timestamp": now(),
    })))
}

pub async fn get_credential_acl(
    caller: Caller,
    State(state): State<AppState>,
    CredentialPath(id): CredentialPath,
) -> Result<Response, ApiError> {
    let webid = caller.webid().clone();
    let body = state
        .run(move |pds| pds.acl().get_credential(&webid, &id))
        .await
        .map_err(|e| caller.fail(e))?;
    Ok(document(MediaType::TURTLE, body))
}

pub async fn put_credential_acl(
    caller: Caller,
    State(state): State<AppState>,
    CredentialPath(id): CredentialPath,
    headers: HeaderMap,
    Payload(body): Payload,
) -> Result<Json<Value>, ApiError> {
    let webid = caller.webid().clone();
    let content_type = header_value(&headers, header::CONTENT_TYPE);
    let vc_id = id.clone();
    state
        .run(move |pds| {
            pds.acl()
                .put_credential(&webid, &id, content_type.as_deref(), &body)
        })
        .await
        .map_err(|e| caller.fail(e))?;

    Ok(Json(json!({
        "message": "Credential access rules updated successfully",
        "vcId": vc_id.as_str(),
        "webid": caller.webid().as_str(),
        "timestamp": now(),
    })))
}
