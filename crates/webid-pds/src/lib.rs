//! WebID PDS: a personal data store keyed by WebID.
//!
//! Each authenticated WebID owns an isolated identity root holding a
//! profile document, verifiable credentials in Turtle and JSON-LD with
//! generated metadata, a container index, and access-control documents.
//! Everything is plain files under a configured storage root.

pub mod config;
pub mod container;
pub mod convert;
pub mod error;
pub mod identity;
pub mod manager;
pub mod metadata;
pub mod pds;
pub mod resource;
pub mod store;
pub mod time;

// Re-export primary types
pub use config::StoreConfig;
pub use error::{PdsError, Result};
pub use pds::Pds;

// Re-export identity types
pub use identity::{
    AcceptAllVerifier, IdentityResolver, IdentityVerifier, SignatureVerifier, TokenClaims,
    VerifiedIdentity, WebId,
};

// Re-export resource types
pub use manager::{CredentialDocument, StoredCredential};
pub use resource::{CredentialId, IdentityLayout, MediaType};
pub use store::{Entry, ResourceStore};
