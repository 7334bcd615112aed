//! Bearer tokens: compact JWS with Ed25519 signatures.
//!
//! A token is `base64url(header) "." base64url(claims) "." base64url(sig)`
//! without padding, where the signature covers the first two segments.
//!
//! ```json
//! { "alg": "EdDSA", "typ": "JWT", "kid": "pdskey_..." }
//! { "webid": "https://alice.example/profile/card#me", "exp": 1735689600 }
//! ```

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{PdsError, Result};

/// The only signature algorithm issued or accepted.
pub const TOKEN_ALGORITHM: &str = "EdDSA";

const TOKEN_TYPE: &str = "JWT";

/// JOSE header of a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

/// Claims carried by a bearer token.
///
/// `webid` is optional at the type level so that a token lacking it can
/// be reported precisely instead of failing to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Expiry, Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Issued-at, Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Claims for `webid`, issued now and valid for `ttl_secs`.
    ///
    /// An expiry past the end of `i64` saturates.
    pub fn for_webid(webid: impl Into<String>, ttl_secs: i64) -> Self {
        let now = crate::time::now_unix_secs();
        Self {
            webid: Some(webid.into()),
            scope: Some("openid profile webid".to_string()),
            exp: Some(now.saturating_add(ttl_secs)),
            iat: Some(now),
            ..Self::default()
        }
    }
}

/// A token split into its parts. The signature has not been checked.
#[derive(Debug, Clone)]
pub struct DecodedToken {
    pub header: TokenHeader,
    pub claims: TokenClaims,
    /// The `header.claims` prefix the signature covers.
    pub signing_input: String,
    pub signature: Vec<u8>,
}

/// Key identifier for an issuer key.
///
/// Format: `pdskey_` + base58 of the first 16 bytes of SHA-256(public_key).
pub fn key_id(key: &VerifyingKey) -> String {
    let hash = Sha256::digest(key.as_bytes());
    format!("pdskey_{}", bs58::encode(&hash[..16]).into_string())
}

/// Sign `claims` into a compact token.
///
/// # Errors
///
/// Returns `PdsError::SerializationError` if the header or claims cannot
/// be encoded.
pub fn mint_token(signing_key: &SigningKey, claims: &TokenClaims) -> Result<String> {
    let header = TokenHeader {
        alg: TOKEN_ALGORITHM.to_string(),
        typ: Some(TOKEN_TYPE.to_string()),
        kid: Some(key_id(&signing_key.verifying_key())),
    };

    let header_json =
        serde_json::to_vec(&header).map_err(|e| PdsError::SerializationError(e.to_string()))?;
    let claims_json =
        serde_json::to_vec(claims).map_err(|e| PdsError::SerializationError(e.to_string()))?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header_json),
        URL_SAFE_NO_PAD.encode(claims_json)
    );
    let signature = signing_key.sign(signing_input.as_bytes());

    Ok(format!(
        "{signing_input}.{}",
        URL_SAFE_NO_PAD.encode(signature.to_bytes())
    ))
}

/// Split and decode a compact token without verifying it.
///
/// # Errors
///
/// Returns `PdsError::Unauthorized` if the token is not three base64url
/// segments carrying a JSON header and JSON claims.
pub fn decode_token(token: &str) -> Result<DecodedToken> {
    let mut parts = token.trim().split('.');
    let (Some(h), Some(c), Some(s), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid("Invalid token format"));
    };

    let header_bytes = URL_SAFE_NO_PAD
        .decode(h)
        .map_err(|_| invalid("Invalid token header encoding"))?;
    let claims_bytes = URL_SAFE_NO_PAD
        .decode(c)
        .map_err(|_| invalid("Invalid token claims encoding"))?;
    let signature = URL_SAFE_NO_PAD
        .decode(s)
        .map_err(|_| invalid("Invalid token signature encoding"))?;

    let header: TokenHeader =
        serde_json::from_slice(&header_bytes).map_err(|_| invalid("Invalid token header"))?;
    let claims: TokenClaims =
        serde_json::from_slice(&claims_bytes).map_err(|_| invalid("Invalid token claims"))?;

    Ok(DecodedToken {
        header,
        claims,
        signing_input: format!("{h}.{c}"),
        signature,
    })
}

impl DecodedToken {
    /// Check the Ed25519 signature against `key`.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::Unauthorized` on algorithm mismatch, key-id
    /// mismatch, or a bad signature.
    pub fn verify_signature(&self, key: &VerifyingKey) -> Result<()> {
        if self.header.alg != TOKEN_ALGORITHM {
            return Err(invalid("Unsupported token algorithm"));
        }
        if let Some(kid) = &self.header.kid {
            if *kid != key_id(key) {
                return Err(invalid("Unknown token signing key"));
            }
        }

        let sig_array: [u8; 64] = self
            .signature
            .as_slice()
            .try_into()
            .map_err(|_| invalid("Invalid or expired token"))?;
        let signature = Signature::from_bytes(&sig_array);

        key.verify_strict(self.signing_input.as_bytes(), &signature)
            .map_err(|_| invalid("Invalid or expired token"))
    }
}

fn invalid(message: &str) -> PdsError {
    PdsError::Unauthorized(message.to_string())
}
