//! Bearer token verification across both verifier variants.

use std::sync::Arc;

use ed25519_dalek::SigningKey;
use webid_pds::identity::{decode_token, key_id, mint_token};
use webid_pds::{
    AcceptAllVerifier, IdentityVerifier, PdsError, SignatureVerifier, TokenClaims,
};

const WEBID: &str = "https://alice.example.org/profile/card#me";

fn signing_key() -> SigningKey {
    SigningKey::generate(&mut rand::thread_rng())
}

fn verifiers(issuer: &SigningKey) -> Vec<(&'static str, Arc<dyn IdentityVerifier>)> {
    vec![
        ("accept-all", Arc::new(AcceptAllVerifier)),
        (
            "signature",
            Arc::new(SignatureVerifier::new(issuer.verifying_key(), None)),
        ),
    ]
}

#[test]
fn valid_token_accepted_by_both_variants() {
    let issuer = signing_key();
    let token = mint_token(&issuer, &TokenClaims::for_webid(WEBID, 3600)).unwrap();

    for (name, verifier) in verifiers(&issuer) {
        let identity = verifier
            .verify(&token)
            .unwrap_or_else(|e| panic!("{name} rejected a valid token: {e}"));
        assert_eq!(identity.webid.as_str(), WEBID);
    }
}

#[test]
fn claim_checks_shared_by_both_variants() {
    let issuer = signing_key();

    let expired = TokenClaims {
        exp: Some(1),
        ..TokenClaims::for_webid(WEBID, 3600)
    };
    let no_webid = TokenClaims {
        webid: None,
        ..TokenClaims::for_webid(WEBID, 3600)
    };
    let bad_webid = TokenClaims::for_webid("not a uri", 3600);

    for (name, verifier) in verifiers(&issuer) {
        let token = mint_token(&issuer, &expired).unwrap();
        assert!(
            matches!(verifier.verify(&token), Err(PdsError::TokenExpired)),
            "{name} accepted an expired token"
        );

        let token = mint_token(&issuer, &no_webid).unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(PdsError::Unauthorized(m)) if m == "Token missing WebID claim"
        ));

        let token = mint_token(&issuer, &bad_webid).unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(PdsError::Unauthorized(m)) if m == "Invalid WebID format"
        ));

        assert!(matches!(
            verifier.verify("garbage"),
            Err(PdsError::Unauthorized(_))
        ));
    }
}

#[test]
fn foreign_key_only_passes_accept_all() {
    let issuer = signing_key();
    let forger = signing_key();
    let token = mint_token(&forger, &TokenClaims::for_webid(WEBID, 3600)).unwrap();

    assert!(AcceptAllVerifier.verify(&token).is_ok());
    let strict = SignatureVerifier::new(issuer.verifying_key(), None);
    assert!(matches!(strict.verify(&token), Err(PdsError::Unauthorized(_))));
}

#[test]
fn tampered_claims_fail_signature() {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    let issuer = signing_key();
    let token = mint_token(&issuer, &TokenClaims::for_webid(WEBID, 3600)).unwrap();
    let parts: Vec<&str> = token.split('.').collect();

    let forged_claims = TokenClaims::for_webid("https://mallory.example/profile/card#me", 3600);
    let forged = format!(
        "{}.{}.{}",
        parts[0],
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap()),
        parts[2]
    );

    let strict = SignatureVerifier::new(issuer.verifying_key(), None);
    assert!(strict.verify(&forged).is_err());
}

#[test]
fn audience_enforced_when_configured() {
    let issuer = signing_key();
    let verifier = SignatureVerifier::new(issuer.verifying_key(), Some("pds".to_string()));

    let right = TokenClaims {
        aud: Some("pds".to_string()),
        ..TokenClaims::for_webid(WEBID, 3600)
    };
    let wrong = TokenClaims {
        aud: Some("other".to_string()),
        ..TokenClaims::for_webid(WEBID, 3600)
    };

    assert!(verifier.verify(&mint_token(&issuer, &right).unwrap()).is_ok());
    assert!(verifier.verify(&mint_token(&issuer, &wrong).unwrap()).is_err());
    assert!(verifier
        .verify(&mint_token(&issuer, &TokenClaims::for_webid(WEBID, 60)).unwrap())
        .is_err());
}

#[test]
fn token_header_names_issuer_key() {
    let issuer = signing_key();
    let token = mint_token(&issuer, &TokenClaims::for_webid(WEBID, 60)).unwrap();
    let decoded = decode_token(&token).unwrap();

    assert_eq!(decoded.header.alg, "EdDSA");
    assert_eq!(decoded.header.kid, Some(key_id(&issuer.verifying_key())));
    assert!(key_id(&issuer.verifying_key()).starts_with("pdskey_"));
}
