//! Provenance documents stamped next to each stored credential.
//!
//! The document is regenerated, never merged, on every write, so both
//! `dc:created` and `dc:modified` always carry the time of the latest
//! write.

use crate::identity::WebId;
use crate::time;

/// Build the metadata document for a stored resource.
///
/// Pure apart from reading the clock.
pub fn generate(
    webid: &WebId,
    resource_id: &str,
    content_type: &str,
    title: Option<&str>,
) -> String {
    generate_at(webid, resource_id, content_type, title, &time::now_rfc3339())
}

/// [`generate`] with an explicit timestamp.
pub fn generate_at(
    webid: &WebId,
    resource_id: &str,
    content_type: &str,
    title: Option<&str>,
    now: &str,
) -> String {
    let title_line = title
        .map(|t| format!("    dc:title \"{}\" ;\n", escape_literal(t)))
        .unwrap_or_default();

    format!(
        "@prefix dc: <http://purl.org/dc/terms/> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
@prefix cred: <https://www.w3.org/2018/credentials#> .

<{resource_id}>
    rdf:type cred:VerifiableCredential ;
    dc:created \"{now}\"^^xsd:dateTime ;
    dc:modified \"{now}\"^^xsd:dateTime ;
    dc:creator <{creator}> ;
{title_line}    dc:format \"{format}\" .
",
        resource_id = escape_iri(resource_id),
        creator = escape_iri(webid.as_str()),
        format = escape_literal(content_type),
    )
}

/// Percent-encode the characters Turtle forbids inside `<...>`.
pub(crate) fn escape_iri(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => {
                out.push_str(&format!("%{:02X}", c as u32));
            }
            c if c <= ' ' => out.push_str(&format!("%{:02X}", c as u32)),
            other => out.push(other),
        }
    }
    out
}

/// Escape a string for use inside a double-quoted Turtle literal.
pub(crate) fn escape_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}
