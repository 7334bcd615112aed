//! Per-resource-type managers composed from the store, the resolver,
//! the metadata generator and the container indexer.

pub mod acl;
pub mod credential;
pub mod profile;

pub use acl::AclManager;
pub use credential::{canonical_json_ld, CredentialDocument, CredentialManager, StoredCredential};
pub use profile::ProfileManager;
