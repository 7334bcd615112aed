//! Access-control documents: the container-level `.acl` and the
//! per-credential `credentials/{id}.acl`.
//!
//! Both are get-or-create-default. Their statements are stored as given
//! and are not enforced anywhere in the store.

use crate::error::Result;
use crate::identity::WebId;
use crate::metadata::escape_iri;
use crate::pds::Pds;
use crate::resource::{require_text, CredentialId, MediaType};

/// ACL reads and writes for one store.
pub struct AclManager<'a> {
    pds: &'a Pds,
}

impl<'a> AclManager<'a> {
    pub(crate) fn new(pds: &'a Pds) -> Self {
        Self { pds }
    }

    /// Return the container ACL, materializing the default if absent.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::Io` on storage faults.
    pub fn get_container(&self, webid: &WebId) -> Result<Vec<u8>> {
        let path = self.pds.layout(webid).container_acl();
        if let Some(existing) = self.pds.store().read(&path)? {
            return Ok(existing);
        }
        log::debug!("materializing default container ACL for {webid}");
        self.pds
            .store()
            .create_if_absent(&path, default_container_acl(webid).as_bytes())
    }

    /// Replace the container ACL.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::UnsupportedMediaType`, `PdsError::MalformedBody`,
    /// or `PdsError::Io`.
    pub fn put_container(
        &self,
        webid: &WebId,
        content_type: Option<&str>,
        body: &[u8],
    ) -> Result<()> {
        MediaType::require_turtle(content_type)?;
        let text = require_text(body)?;
        let path = self.pds.layout(webid).container_acl();
        self.pds.store().write(&path, text.as_bytes())
    }

    /// Return the ACL of credential `id`, materializing the default if
    /// absent. The credential itself need not exist.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::Io` on storage faults.
    pub fn get_credential(&self, webid: &WebId, id: &CredentialId) -> Result<Vec<u8>> {
        let path = self.pds.layout(webid).credential_acl(id);
        if let Some(existing) = self.pds.store().read(&path)? {
            return Ok(existing);
        }
        log::debug!("materializing default ACL of credential {id} for {webid}");
        self.pds
            .store()
            .create_if_absent(&path, default_credential_acl(webid, id).as_bytes())
    }

    /// Replace the ACL of credential `id`.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::UnsupportedMediaType`, `PdsError::MalformedBody`,
    /// or `PdsError::Io`.
    pub fn put_credential(
        &self,
        webid: &WebId,
        id: &CredentialId,
        content_type: Option<&str>,
        body: &[u8],
    ) -> Result<()> {
        MediaType::require_turtle(content_type)?;
        let text = require_text(body)?;
        let path = self.pds.layout(webid).credential_acl(id);
        self.pds.store().write(&path, text.as_bytes())
    }
}

/// Owner gets full control of the identity root; everyone may read the
/// profile.
pub fn default_container_acl(webid: &WebId) -> String {
    format!(
        "@prefix acl: <http://www.w3.org/ns/auth/acl#> .
@prefix foaf: <http://xmlns.com/foaf/0.1/> .

<#owner>
    a acl:Authorization ;
    acl:agent <{owner}> ;
    acl:accessTo <./> ;
    acl:default <./> ;
    acl:mode acl:Read, acl:Write, acl:Control .

<#public>
    a acl:Authorization ;
    acl:agentClass foaf:Agent ;
    acl:accessTo <./profile/card> ;
    acl:mode acl:Read .
",
        owner = escape_iri(webid.as_str()),
    )
}

/// Owner gets full control of both representations of credential `id`.
pub fn default_credential_acl(webid: &WebId, id: &CredentialId) -> String {
    format!(
        "@prefix acl: <http://www.w3.org/ns/auth/acl#> .

<#owner>
    a acl:Authorization ;
    acl:agent <{owner}> ;
    acl:accessTo <{id}.ttl>, <{id}.jsonld> ;
    acl:mode acl:Read, acl:Write, acl:Control .
",
        owner = escape_iri(webid.as_str()),
    )
}
