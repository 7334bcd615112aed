//! Verifiable credentials under `credentials/`.
//!
//! A credential id has two independently addressable representations
//! (`{id}.ttl`, `{id}.jsonld`) and one metadata document
//! (`{id}.meta.ttl`). Writing one representation leaves the other
//! untouched; deleting the credential removes all three. Every mutation
//! ends with a full rebuild of `credentials/index.ttl`.
//!
//! The Turtle representation of id `index` would be that index file, so it
//! is reserved: it cannot be written, reads as absent, and is never deleted.

use serde::Serialize;

use crate::container;
use crate::error::{PdsError, Result};
use crate::identity::WebId;
use crate::metadata;
use crate::pds::Pds;
use crate::resource::{require_text, select_representation, CredentialId, MediaType};

/// Outcome of a successful [`CredentialManager::put`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredCredential {
    pub id: CredentialId,
    pub media_type: MediaType,
    /// Request path at which the credential can be read back.
    pub location: String,
}

/// A credential representation read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialDocument {
    pub media_type: MediaType,
    pub body: Vec<u8>,
}

/// Credential CRUD for one store.
pub struct CredentialManager<'a> {
    pds: &'a Pds,
}

impl<'a> CredentialManager<'a> {
    pub(crate) fn new(pds: &'a Pds) -> Self {
        Self { pds }
    }

    /// Store one representation of credential `id`.
    ///
    /// Turtle bodies are stored verbatim; linked-data bodies are parsed
    /// and re-serialized in canonical indented form. Then the metadata
    /// document is regenerated and the index rebuilt.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::UnsupportedMediaType`, `PdsError::MalformedBody`
    /// or `PdsError::InvalidIdentifier` (reserved representation) before
    /// anything is written, or `PdsError::Io` on storage faults.
    pub fn put(
        &self,
        webid: &WebId,
        id: &CredentialId,
        content_type: Option<&str>,
        body: &[u8],
    ) -> Result<StoredCredential> {
        let media_type = MediaType::from_content_type(content_type)?;
        let content = match media_type {
            MediaType::Turtle => require_text(body)?.as_bytes().to_vec(),
            MediaType::JsonLd => canonical_json_ld(body)?,
        };

        let layout = self.pds.layout(webid);
        let store = self.pds.store();

        let path = layout.credential(id, media_type);
        if path == layout.index() {
            log::warn!("refused {media_type} credential {id} for {webid}: reserved for the index");
            return Err(PdsError::InvalidIdentifier(format!(
                "{id} is reserved for the container index in {media_type}"
            )));
        }
        store.write(&path, &content)?;

        let meta = metadata::generate(
            webid,
            &format!("urn:uuid:{id}"),
            media_type.content_type(),
            Some(&format!("Verifiable Credential {id}")),
        );
        store.write(&layout.metadata(id), meta.as_bytes())?;

        container::rebuild(store, &layout.credentials_dir())?;
        log::debug!("stored credential {id} ({media_type}) for {webid}");

        Ok(StoredCredential {
            id: id.clone(),
            media_type,
            location: format!("/credentials/{id}"),
        })
    }

    /// Read credential `id` in the representation `accept` selects.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::NotFound` if that representation is absent, or
    /// `PdsError::Io` on storage faults.
    pub fn get(
        &self,
        webid: &WebId,
        id: &CredentialId,
        accept: Option<&str>,
    ) -> Result<CredentialDocument> {
        let media_type = select_representation(accept);
        let layout = self.pds.layout(webid);
        let path = layout.credential(id, media_type);

        let body = if path == layout.index() {
            None
        } else {
            self.pds.store().read(&path)?
        };
        match body {
            Some(body) => Ok(CredentialDocument { media_type, body }),
            None => {
                log::debug!("credential {id} ({media_type}) not found for {webid}");
                Err(PdsError::NotFound(format!("credential {id}")))
            }
        }
    }

    /// Delete both representations and the metadata of credential `id`.
    ///
    /// The index is rebuilt whether or not anything was removed. Metadata
    /// alone does not count as the credential being present.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::NotFound` if neither representation existed, or
    /// `PdsError::Io` on storage faults.
    pub fn delete(&self, webid: &WebId, id: &CredentialId) -> Result<()> {
        let layout = self.pds.layout(webid);
        let store = self.pds.store();

        let turtle_path = layout.credential(id, MediaType::Turtle);
        let turtle = turtle_path != layout.index() && store.delete(&turtle_path)?;
        let json_ld = store.delete(&layout.credential(id, MediaType::JsonLd))?;
        store.delete(&layout.metadata(id))?;

        container::rebuild(store, &layout.credentials_dir())?;

        if turtle || json_ld {
            log::debug!("deleted credential {id} for {webid}");
            Ok(())
        } else {
            Err(PdsError::NotFound(format!("credential {id}")))
        }
    }

    /// Rebuild and return the container index.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::Io` on storage faults.
    pub fn index(&self, webid: &WebId) -> Result<String> {
        let layout = self.pds.layout(webid);
        container::rebuild(self.pds.store(), &layout.credentials_dir())
    }

    /// File names of the representations currently stored.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::Io` on storage faults.
    pub fn members(&self, webid: &WebId) -> Result<Vec<String>> {
        let layout = self.pds.layout(webid);
        container::members(self.pds.store(), &layout.credentials_dir())
    }
}

/// Parse a linked-data body and re-serialize it with two-space indents.
///
/// # Errors
///
/// Returns `PdsError::MalformedBody` unless `body` is a JSON object or
/// array.
pub fn canonical_json_ld(body: &[u8]) -> Result<Vec<u8>> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| PdsError::MalformedBody(format!("Invalid JSON-LD format: {e}")))?;

    if !(value.is_object() || value.is_array()) {
        return Err(PdsError::MalformedBody(
            "Invalid JSON-LD format: expected an object or array".to_string(),
        ));
    }

    serde_json::to_vec_pretty(&value).map_err(|e| PdsError::SerializationError(e.to_string()))
}
