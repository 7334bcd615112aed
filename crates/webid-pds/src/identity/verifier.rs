//! Identity verification, the trust boundary in front of the store.
//!
//! The store never inspects tokens itself. A boundary layer holds an
//! `Arc<dyn IdentityVerifier>` and turns each bearer token into a
//! [`VerifiedIdentity`] before any store operation runs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ed25519_dalek::VerifyingKey;

use crate::error::{PdsError, Result};
use crate::identity::token::{decode_token, TokenClaims};
use crate::identity::webid::WebId;

/// The caller an operation is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub webid: WebId,
    pub subject: Option<String>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

/// Capability that turns a bearer token into a verified identity.
pub trait IdentityVerifier: Send + Sync {
    /// Verify `bearer_token` (without the `Bearer ` prefix).
    ///
    /// # Errors
    ///
    /// Returns `PdsError::Unauthorized` for a malformed, forged, or
    /// WebID-less token and `PdsError::TokenExpired` for an expired one.
    fn verify(&self, bearer_token: &str) -> Result<VerifiedIdentity>;
}

/// Accepts any well-formed token without checking its signature.
///
/// For mock deployments and tests only.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllVerifier;

impl IdentityVerifier for AcceptAllVerifier {
    fn verify(&self, bearer_token: &str) -> Result<VerifiedIdentity> {
        let decoded = decode_token(bearer_token)?;
        check_claims(decoded.claims)
    }
}

/// Verifies Ed25519 signatures against a single issuer key.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    issuer_key: VerifyingKey,
    audience: Option<String>,
}

impl SignatureVerifier {
    /// Create a verifier trusting `issuer_key`. When `audience` is set,
    /// tokens must carry a matching `aud` claim.
    pub fn new(issuer_key: VerifyingKey, audience: Option<String>) -> Self {
        Self {
            issuer_key,
            audience,
        }
    }

    /// Create a verifier from a base64-encoded 32-byte public key.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::InvalidConfig` if the key does not decode to a
    /// valid Ed25519 public key.
    pub fn from_base64(public_key_b64: &str, audience: Option<String>) -> Result<Self> {
        let bytes = STANDARD
            .decode(public_key_b64.trim())
            .map_err(|e| PdsError::InvalidConfig(format!("invalid issuer key base64: {e}")))?;
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|_| PdsError::InvalidConfig("issuer key must be 32 bytes".to_string()))?;
        let key = VerifyingKey::from_bytes(&array)
            .map_err(|e| PdsError::InvalidConfig(format!("invalid issuer key: {e}")))?;
        Ok(Self::new(key, audience))
    }
}

impl IdentityVerifier for SignatureVerifier {
    fn verify(&self, bearer_token: &str) -> Result<VerifiedIdentity> {
        let decoded = decode_token(bearer_token)?;
        decoded.verify_signature(&self.issuer_key)?;

        if let Some(expected) = &self.audience {
            if decoded.claims.aud.as_deref() != Some(expected.as_str()) {
                return Err(PdsError::Unauthorized(
                    "Token audience mismatch".to_string(),
                ));
            }
        }

        check_claims(decoded.claims)
    }
}

/// Claim checks shared by every verifier.
fn check_claims(claims: TokenClaims) -> Result<VerifiedIdentity> {
    let webid = claims
        .webid
        .ok_or_else(|| PdsError::Unauthorized("Token missing WebID claim".to_string()))?;
    let webid = WebId::parse(&webid)
        .map_err(|_| PdsError::Unauthorized("Invalid WebID format".to_string()))?;

    if let Some(exp) = claims.exp {
        if crate::time::now_unix_secs() >= exp {
            return Err(PdsError::TokenExpired);
        }
    }

    Ok(VerifiedIdentity {
        webid,
        subject: claims.sub,
        issuer: claims.iss,
        audience: claims.aud,
    })
}
