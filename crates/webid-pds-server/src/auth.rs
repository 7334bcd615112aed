//! Bearer authentication.
//!
//! Every non-health handler takes a [`Caller`] first, so a request with
//! a missing or rejected token is answered with 401 before anything else
//! about it is looked at.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use webid_pds::{PdsError, VerifiedIdentity, WebId};

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller of a request.
#[derive(Debug, Clone)]
pub struct Caller {
    pub identity: VerifiedIdentity,
    /// Request path, carried for error bodies.
    pub path: String,
    development: bool,
}

impl Caller {
    pub fn webid(&self) -> &WebId {
        &self.identity.webid
    }

    /// Attach this request's context to a store error.
    pub fn fail(&self, error: PdsError) -> ApiError {
        ApiError::new(error, self.path.clone(), self.development)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();
        let development = state.development();

        let token = bearer_token(&parts.headers).ok_or_else(|| {
            ApiError::new(
                PdsError::Unauthorized("Missing or invalid authorization header".to_string()),
                path.clone(),
                development,
            )
        })?;

        let identity = state.verifier.verify(token).map_err(|e| {
            tracing::debug!(path = %path, error = %e, "token rejected");
            ApiError::new(e, path.clone(), development)
        })?;

        tracing::debug!(webid = %identity.webid, "authenticated");
        Ok(Self {
            identity,
            path,
            development,
        })
    }
}

/// The token of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
