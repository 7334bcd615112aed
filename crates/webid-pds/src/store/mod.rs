//! Storage layer for identity roots.
//!
//! # Directory layout
//!
//! ```text
//! {data_root}/storage/
//! └── {derived identity name}/
//!     ├── .acl
//!     ├── profile/
//!     │   └── card.ttl
//!     └── credentials/
//!         ├── index.ttl
//!         ├── {id}.ttl
//!         ├── {id}.jsonld
//!         ├── {id}.meta.ttl
//!         └── {id}.acl
//! ```
//!
//! # Modules
//!
//! - [`resource_store`]: confined read/write/delete/list primitives.

pub mod resource_store;

pub use resource_store::{Entry, ResourceStore};
