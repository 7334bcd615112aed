//! The WebID profile document, `profile/card.ttl`.

use crate::error::Result;
use crate::identity::WebId;
use crate::metadata::{escape_iri, escape_literal};
use crate::pds::Pds;
use crate::resource::{require_text, MediaType};
use crate::time;

/// Profile reads and writes for one store.
pub struct ProfileManager<'a> {
    pds: &'a Pds,
}

impl<'a> ProfileManager<'a> {
    pub(crate) fn new(pds: &'a Pds) -> Self {
        Self { pds }
    }

    /// Return the stored profile, materializing the default on first read.
    ///
    /// Concurrent first reads converge on a single default document.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::Io` on storage faults.
    pub fn get(&self, webid: &WebId) -> Result<Vec<u8>> {
        let path = self.pds.layout(webid).profile();
        if let Some(existing) = self.pds.store().read(&path)? {
            return Ok(existing);
        }

        let default = default_profile(webid, &self.pds.config().oidc_issuer, &time::now_rfc3339());
        log::debug!("materializing default profile for {webid}");
        self.pds.store().create_if_absent(&path, default.as_bytes())
    }

    /// Replace the profile.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::UnsupportedMediaType` unless `content_type` is
    /// Turtle, `PdsError::MalformedBody` for a blank or non-UTF-8 body,
    /// or `PdsError::Io` on storage faults.
    pub fn put(&self, webid: &WebId, content_type: Option<&str>, body: &[u8]) -> Result<()> {
        MediaType::require_turtle(content_type)?;
        let text = require_text(body)?;
        let path = self.pds.layout(webid).profile();
        self.pds.store().write(&path, text.as_bytes())
    }
}

/// The profile served before the owner has written one.
pub fn default_profile(webid: &WebId, oidc_issuer: &str, now: &str) -> String {
    format!(
        "@prefix solid: <http://www.w3.org/ns/solid/terms#> .
@prefix foaf: <http://xmlns.com/foaf/0.1/> .
@prefix pim: <http://www.w3.org/ns/pim/space#> .
@prefix dc: <http://purl.org/dc/terms/> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

<> a foaf:PersonalProfileDocument ;
    foaf:maker <{webid}> ;
    foaf:primaryTopic <{webid}> .

<#me> a foaf:Person ;
    foaf:name \"PDS User\" ;
    solid:oidcIssuer <{issuer}> ;
    pim:storage <../> ;
    dc:created \"{now}\"^^xsd:dateTime ;
    dc:modified \"{now}\"^^xsd:dateTime .

<../> a pim:Storage .
",
        webid = escape_iri(webid.as_str()),
        issuer = escape_iri(oidc_issuer),
        now = escape_literal(now),
    )
}
