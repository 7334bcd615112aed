//! The store object shared by every request.
//!
//! A `Pds` is constructed once at startup from a [`StoreConfig`] and then
//! passed by reference (typically inside an `Arc`). It owns no mutable
//! in-memory state; everything lives on disk.

use std::path::Path;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::identity::{IdentityResolver, WebId};
use crate::manager::{AclManager, CredentialManager, ProfileManager};
use crate::resource::IdentityLayout;
use crate::store::ResourceStore;

/// Personal data store rooted at a configured directory.
#[derive(Debug, Clone)]
pub struct Pds {
    config: StoreConfig,
    store: ResourceStore,
    resolver: IdentityResolver,
}

impl Pds {
    /// Initialize the data and storage roots and build the store.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::Io` if the roots cannot be created.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let storage_root = config.storage_root();
        let store = ResourceStore::open(&storage_root)?;
        let resolver = IdentityResolver::new(&storage_root);
        log::info!("storage initialized at {}", storage_root.display());
        Ok(Self {
            config,
            store,
            resolver,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    /// Resource paths of `webid`'s identity root.
    pub fn layout(&self, webid: &WebId) -> IdentityLayout {
        IdentityLayout::new(self.resolver.resolve(webid))
    }

    pub fn profiles(&self) -> ProfileManager<'_> {
        ProfileManager::new(self)
    }

    pub fn credentials(&self) -> CredentialManager<'_> {
        CredentialManager::new(self)
    }

    pub fn acl(&self) -> AclManager<'_> {
        AclManager::new(self)
    }

    /// `true` when the storage root is a directory that can be written.
    pub fn is_ready(&self) -> bool {
        is_writable_dir(self.store.root())
    }
}

fn is_writable_dir(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_dir() && !m.permissions().readonly())
        .unwrap_or(false)
}
