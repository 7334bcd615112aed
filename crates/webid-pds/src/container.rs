//! Container index: a materialized view over the credentials directory.
//!
//! The index is recomputed from the directory listing on every call;
//! there is no incremental patching. Two rebuilds with no intervening
//! mutation differ only in the embedded `dc:created` timestamp.

use std::path::Path;

use crate::error::Result;
use crate::resource::layout::{INDEX_FILE, META_SUFFIX};
use crate::store::{Entry, ResourceStore};
use crate::time;

/// `true` for a stored credential representation.
fn is_member(entry: &Entry) -> bool {
    let name = entry.name.as_str();
    !entry.is_directory
        && !name.starts_with('.')
        && name != INDEX_FILE
        && !name.ends_with(META_SUFFIX)
        && (name.ends_with(".ttl") || name.ends_with(".jsonld"))
}

/// Names of the credential representations currently in `dir`.
///
/// # Errors
///
/// Returns the store's error if `dir` cannot be listed.
pub fn members(store: &ResourceStore, dir: &Path) -> Result<Vec<String>> {
    Ok(store
        .list(dir)?
        .into_iter()
        .filter(is_member)
        .map(|e| e.name)
        .collect())
}

/// Render an index document for `members` (already sorted).
pub fn render(members: &[String], created: &str) -> String {
    let mut doc = format!(
        "@prefix ldp: <http://www.w3.org/ns/ldp#> .
@prefix dc: <http://purl.org/dc/terms/> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix cred: <https://www.w3.org/2018/credentials#> .

<./> a ldp:Container ;
     dc:title \"Credentials Container\" ;
     dc:created \"{created}\"^^<http://www.w3.org/2001/XMLSchema#dateTime> .

"
    );
    for name in members {
        doc.push_str(&format!("<./> ldp:contains <./{name}> .\n"));
    }
    doc
}

/// Rebuild the index of `dir`, write it to `dir/index.ttl`, and return it.
///
/// # Errors
///
/// Returns the store's error if listing or writing fails.
pub fn rebuild(store: &ResourceStore, dir: &Path) -> Result<String> {
    let members = members(store, dir)?;
    let doc = render(&members, &time::now_rfc3339());
    store.write(&dir.join(INDEX_FILE), doc.as_bytes())?;
    log::debug!(
        "rebuilt index of {} with {} member(s)",
        dir.display(),
        members.len()
    );
    Ok(doc)
}
