//! WebID parsing, identity-root resolution, and the bearer token
//! verification that establishes who a caller is.

pub mod token;
pub mod verifier;
pub mod webid;

pub use token::{decode_token, key_id, mint_token, DecodedToken, TokenClaims, TokenHeader};
pub use verifier::{AcceptAllVerifier, IdentityVerifier, SignatureVerifier, VerifiedIdentity};
pub use webid::{IdentityResolver, WebId};
