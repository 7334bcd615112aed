//! Resource paths inside one identity root.

use std::path::{Path, PathBuf};

use crate::resource::id::CredentialId;
use crate::resource::media::MediaType;

pub const PROFILE_DIR: &str = "profile";
pub const PROFILE_FILE: &str = "card.ttl";
pub const CREDENTIALS_DIR: &str = "credentials";
pub const INDEX_FILE: &str = "index.ttl";
pub const ACL_FILE: &str = ".acl";
pub const META_SUFFIX: &str = ".meta.ttl";
pub const ACL_SUFFIX: &str = ".acl";

/// Paths of every typed resource under an identity root.
#[derive(Debug, Clone)]
pub struct IdentityLayout {
    root: PathBuf,
}

impl IdentityLayout {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `profile/card.ttl`
    pub fn profile(&self) -> PathBuf {
        self.root.join(PROFILE_DIR).join(PROFILE_FILE)
    }

    /// `.acl`
    pub fn container_acl(&self) -> PathBuf {
        self.root.join(ACL_FILE)
    }

    /// `credentials/`
    pub fn credentials_dir(&self) -> PathBuf {
        self.root.join(CREDENTIALS_DIR)
    }

    /// `credentials/index.ttl`
    pub fn index(&self) -> PathBuf {
        self.credentials_dir().join(INDEX_FILE)
    }

    /// `credentials/{id}.ttl` or `credentials/{id}.jsonld`
    pub fn credential(&self, id: &CredentialId, media: MediaType) -> PathBuf {
        self.credentials_dir()
            .join(format!("{id}.{}", media.extension()))
    }

    /// `credentials/{id}.meta.ttl`
    pub fn metadata(&self, id: &CredentialId) -> PathBuf {
        self.credentials_dir().join(format!("{id}{META_SUFFIX}"))
    }

    /// `credentials/{id}.acl`
    pub fn credential_acl(&self, id: &CredentialId) -> PathBuf {
        self.credentials_dir().join(format!("{id}{ACL_SUFFIX}"))
    }
}
