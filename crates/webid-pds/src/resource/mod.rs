//! Typed resources: identifiers, formats, negotiation, and on-disk paths.

pub mod id;
pub mod layout;
pub mod media;
pub mod negotiate;

pub use id::CredentialId;
pub use layout::IdentityLayout;
pub use media::{essence, require_text, MediaType};
pub use negotiate::select_representation;
