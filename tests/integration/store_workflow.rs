//! End-to-end store workflow through the public library API.
//!
//! Covers round trips, delete finality, identifier grammar, index
//! completeness, lazy defaults, representation independence and media
//! type rejection across two identities sharing one data root.

use webid_pds::manager::canonical_json_ld;
use webid_pds::{CredentialId, MediaType, Pds, PdsError, StoreConfig, WebId};

const TURTLE_VC: &str = "@prefix cred: <https://www.w3.org/2018/credentials#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

<urn:uuid:test-vc-123> a cred:VerifiableCredential ;
    cred:issuer <https://issuer.example.org> ;
    cred:issuanceDate \"2024-01-01T00:00:00Z\"^^xsd:dateTime .
";

const JSON_LD_VC: &str = r#"{
  "@context": ["https://www.w3.org/2018/credentials/v1"],
  "id": "urn:uuid:test-vc-456",
  "type": ["VerifiableCredential"],
  "issuer": "https://issuer.example.org",
  "issuanceDate": "2024-01-01T00:00:00Z",
  "credentialSubject": { "id": "https://user.example.org/profile/card#me" }
}"#;

fn setup() -> (tempfile::TempDir, Pds) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let pds = Pds::open(StoreConfig::new(tmp.path())).expect("open store");
    (tmp, pds)
}

fn alice() -> WebId {
    WebId::parse("https://alice.example.org/profile/card#me").unwrap()
}

fn bob() -> WebId {
    WebId::parse("https://bob.example.org/profile/card#me").unwrap()
}

fn id(raw: &str) -> CredentialId {
    CredentialId::parse(raw).unwrap()
}

#[test]
fn full_credential_lifecycle() {
    let (_tmp, pds) = setup();
    let webid = alice();
    let creds = pds.credentials();

    // ── Step 1: store in both formats ───────────────────────────────────
    let stored = creds
        .put(&webid, &id("vc-1"), Some("text/turtle; charset=utf-8"), TURTLE_VC.as_bytes())
        .unwrap();
    assert_eq!(stored.location, "/credentials/vc-1");
    creds
        .put(&webid, &id("vc-2"), Some("application/ld+json"), JSON_LD_VC.as_bytes())
        .unwrap();

    // ── Step 2: read back, canonicalized ────────────────────────────────
    let turtle = creds.get(&webid, &id("vc-1"), Some("text/turtle")).unwrap();
    assert_eq!(turtle.body, TURTLE_VC.as_bytes());
    assert_eq!(turtle.media_type, MediaType::Turtle);

    let json = creds
        .get(&webid, &id("vc-2"), Some("application/ld+json, */*;q=0.1"))
        .unwrap();
    assert_eq!(json.body, canonical_json_ld(JSON_LD_VC.as_bytes()).unwrap());

    // ── Step 3: index lists exactly the stored representations ──────────
    let index = creds.index(&webid).unwrap();
    assert!(index.contains("<./> ldp:contains <./vc-1.ttl> ."));
    assert!(index.contains("<./> ldp:contains <./vc-2.jsonld> ."));
    assert_eq!(index.matches("ldp:contains").count(), 2);
    assert!(!index.contains("meta.ttl"));

    // ── Step 4: delete and confirm finality ─────────────────────────────
    creds.delete(&webid, &id("vc-1")).unwrap();
    assert!(matches!(
        creds.get(&webid, &id("vc-1"), Some("text/turtle")),
        Err(PdsError::NotFound(_))
    ));
    let index = std::fs::read_to_string(pds.layout(&webid).index()).unwrap();
    assert!(!index.contains("vc-1"));
    assert!(index.contains("vc-2.jsonld"));
}

#[test]
fn identities_are_isolated() {
    let (_tmp, pds) = setup();
    pds.credentials()
        .put(&alice(), &id("shared"), Some("text/turtle"), TURTLE_VC.as_bytes())
        .unwrap();

    assert!(matches!(
        pds.credentials().get(&bob(), &id("shared"), None),
        Err(PdsError::NotFound(_))
    ));
    assert!(pds.credentials().members(&bob()).unwrap().is_empty());
    assert_ne!(pds.layout(&alice()).root(), pds.layout(&bob()).root());
}

#[test]
fn identifier_grammar_rejects_before_io() {
    for raw in ["a/b", "..", "../x", "a.b", "", "a b", "vc%2F1", "é"] {
        assert!(
            matches!(CredentialId::parse(raw), Err(PdsError::InvalidIdentifier(_))),
            "{raw:?} should be rejected"
        );
    }
    for raw in ["a", "vc-1", "VC_2", "0", "-_-"] {
        assert!(CredentialId::parse(raw).is_ok(), "{raw:?} should be accepted");
    }
}

#[test]
fn lazy_profile_default_is_idempotent() {
    let (_tmp, pds) = setup();
    let first = pds.profiles().get(&alice()).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = pds.profiles().get(&alice()).unwrap();
    assert_eq!(first, second);

    let text = String::from_utf8(first).unwrap();
    assert!(text.contains("foaf:primaryTopic <https://alice.example.org/profile/card#me>"));
    assert!(text.contains("solid:oidcIssuer <https://oidc.solid.gov.uk>"));
}

#[test]
fn representations_do_not_overwrite_each_other() {
    let (_tmp, pds) = setup();
    let webid = alice();
    let creds = pds.credentials();

    creds
        .put(&webid, &id("x"), Some("text/turtle"), TURTLE_VC.as_bytes())
        .unwrap();
    creds
        .put(&webid, &id("x"), Some("application/ld+json"), JSON_LD_VC.as_bytes())
        .unwrap();

    let turtle = creds.get(&webid, &id("x"), Some("text/turtle")).unwrap();
    assert_eq!(turtle.body, TURTLE_VC.as_bytes());
    assert_eq!(creds.members(&webid).unwrap(), vec!["x.jsonld", "x.ttl"]);
}

#[test]
fn unsupported_media_type_creates_nothing() {
    let (_tmp, pds) = setup();
    let webid = alice();
    let err = pds
        .credentials()
        .put(&webid, &id("vc"), Some("application/json"), JSON_LD_VC.as_bytes())
        .unwrap_err();
    assert!(matches!(err, PdsError::UnsupportedMediaType(_)));
    assert!(!pds.layout(&webid).root().exists());
}

#[test]
fn acl_documents_default_and_override() {
    let (_tmp, pds) = setup();
    let webid = alice();

    let container = String::from_utf8(pds.acl().get_container(&webid).unwrap()).unwrap();
    assert!(container.contains("acl:Control"));

    let custom = "<#r> a <http://www.w3.org/ns/auth/acl#Authorization> .";
    pds.acl()
        .put_credential(&webid, &id("vc"), Some("text/turtle"), custom.as_bytes())
        .unwrap();
    assert_eq!(
        pds.acl().get_credential(&webid, &id("vc")).unwrap(),
        custom.as_bytes()
    );
}

#[test]
fn metadata_tracks_latest_representation() {
    let (_tmp, pds) = setup();
    let webid = alice();
    let creds = pds.credentials();
    let meta_path = pds.layout(&webid).metadata(&id("m"));

    creds
        .put(&webid, &id("m"), Some("text/turtle"), TURTLE_VC.as_bytes())
        .unwrap();
    let meta = std::fs::read_to_string(&meta_path).unwrap();
    assert!(meta.contains("dc:format \"text/turtle\""));
    assert!(meta.contains("dc:creator <https://alice.example.org/profile/card#me>"));

    creds
        .put(&webid, &id("m"), Some("application/ld+json"), b"{}")
        .unwrap();
    let meta = std::fs::read_to_string(&meta_path).unwrap();
    assert!(meta.contains("dc:format \"application/ld+json\""));
}
