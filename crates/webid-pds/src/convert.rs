//! Shallow Turtle to JSON-LD conversion.
//!
//! This is not an RDF converter. It emits the credential context and,
//! when a type statement can be picked out of the text, the local name of
//! its object. Stored representations are never converted into each
//! other; this backs the CLI `convert` command only.

use serde_json::{json, Value};

/// Contexts placed on every converted document.
pub const CREDENTIAL_CONTEXT: [&str; 2] = ["https://www.w3.org/2018/credentials/v1", "https://schema.org/"];

const RDF_TYPE_IRI: &str = "<http://www.w3.org/1999/02/22-rdf-syntax-ns#type>";

/// Best-effort conversion. Never fails; unrecognized input yields just
/// the context. When several type statements appear, the last one wins.
pub fn turtle_to_json_ld(turtle: &str) -> Value {
    let mut doc = json!({ "@context": CREDENTIAL_CONTEXT });

    let tokens: Vec<&str> = turtle
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.starts_with('@'))
        .flat_map(str::split_whitespace)
        .collect();

    let mut found = None;
    for pair in tokens.windows(2) {
        if matches!(pair[0], "a" | "rdf:type" | RDF_TYPE_IRI) {
            if let Some(name) = local_name(pair[1]) {
                found = Some(name);
            }
        }
    }

    if let Some(name) = found {
        doc["type"] = Value::String(name);
    }
    doc
}

/// `<http://x#Foo>` → `Foo`, `cred:Foo` → `Foo`.
fn local_name(term: &str) -> Option<String> {
    let term = term.trim_end_matches([';', ',', '.']);
    let term = term
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
        .unwrap_or(term);
    let name = term.rsplit(['#', '/', ':']).next().unwrap_or(term);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
