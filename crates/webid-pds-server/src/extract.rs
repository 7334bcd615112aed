//! Request extractors whose rejections answer with the JSON error body.
//!
//! axum's own `Path` and `Bytes` extractors reject with plain text; these
//! wrap them so malformed ids and unreadable bodies carry a kind and
//! timestamp like every other failure.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use webid_pds::{CredentialId, PdsError};

use crate::error::ApiError;
use crate::state::AppState;

/// The validated `{id}` segment of a credential route.
#[derive(Debug, Clone)]
pub struct CredentialPath(pub CredentialId);

#[async_trait]
impl FromRequestParts<AppState> for CredentialPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();
        let development = state.development();
        let fail = |error: PdsError| ApiError::new(error, path.clone(), development);

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| fail(PdsError::InvalidIdentifier(rejection.body_text())))?;
        CredentialId::parse(&raw).map(Self).map_err(fail)
    }
}

/// The raw request body.
///
/// Oversized bodies keep their 413 status.
#[derive(Debug, Clone)]
pub struct Payload(pub Bytes);

#[async_trait]
impl FromRequest<AppState> for Payload {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let path = req.uri().path().to_string();
        Bytes::from_request(req, state)
            .await
            .map(Self)
            .map_err(|rejection| {
                ApiError::new(
                    PdsError::MalformedBody(rejection.body_text()),
                    path,
                    state.development(),
                )
                .with_status(rejection.status())
            })
    }
}
