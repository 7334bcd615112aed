//! `/credentials/{id}` and the container index.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use webid_pds::MediaType;

use super::{document, header_value, now};
use crate::auth::Caller;
use crate::error::ApiError;
use crate::extract::{CredentialPath, Payload};
use crate::state::AppState;

pub async fn get_index(caller: Caller, State(state): State<AppState>) -> Result<Response, ApiError> {
    let webid = caller.webid().clone();
    let doc = state
        .run(move |pds| pds.credentials().index(&webid))
        .await
        .map_err(|e| caller.fail(e))?;
    Ok(document(MediaType::TURTLE, doc.into_bytes()))
}

pub async fn get_credential(
    caller: Caller,
    State(state): State<AppState>,
    CredentialPath(id): CredentialPath,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let webid = caller.webid().clone();
    let accept = header_value(&headers, header::ACCEPT);

    let doc = state
        .run(move |pds| pds.credentials().get(&webid, &id, accept.as_deref()))
        .await
        .map_err(|e| caller.fail(e))?;
    Ok(document(doc.media_type.content_type(), doc.body))
}

pub async fn put_credential(
    caller: Caller,
    State(state): State<AppState>,
    CredentialPath(id): CredentialPath,
    headers: HeaderMap,
    Payload(body): Payload,
) -> Result<Response, ApiError> {
    let webid = caller.webid().clone();
    let content_type = header_value(&headers, header::CONTENT_TYPE);

    let stored = state
        .run(move |pds| {
            pds.credentials()
                .put(&webid, &id, content_type.as_deref(), &body)
        })
        .await
        .map_err(|e| caller.fail(e))?;

    tracing::info!(webid = %caller.webid(), id = %stored.id, media_type = %stored.media_type, "credential stored");
    let ack = json!({
        "message": "Credential stored successfully",
        "id": stored.id.as_str(),
        "contentType": stored.media_type.content_type(),
        "location": stored.location,
        "timestamp": now(),
    });
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, stored.location)],
        Json(ack),
    )
        .into_response())
}

pub async fn delete_credential(
    caller: Caller,
    State(state): State<AppState>,
    CredentialPath(id): CredentialPath,
) -> Result<StatusCode, ApiError> {
    let webid = caller.webid().clone();

    let deleted = id.clone();
    state
        .run(move |pds| pds.credentials().delete(&webid, &id))
        .await
        .map_err(|e| caller.fail(e))?;

    tracing::info!(webid = %caller.webid(), id = %deleted, "credential deleted");
    Ok(StatusCode::NO_CONTENT)
}
