//! Stress tests: concurrent writers and first readers against one store.

use std::sync::{Arc, Barrier};
use std::thread;

use webid_pds::{CredentialId, MediaType, Pds, StoreConfig, WebId};

const THREADS: usize = 8;

fn store() -> (tempfile::TempDir, Arc<Pds>, WebId) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let pds = Arc::new(Pds::open(StoreConfig::new(tmp.path())).expect("open store"));
    let webid = WebId::parse("https://busy.example.org/profile/card#me").unwrap();
    (tmp, pds, webid)
}

#[test]
fn stress_concurrent_first_profile_reads_converge() {
    for _ in 0..20 {
        let (_tmp, pds, webid) = store();
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let pds = Arc::clone(&pds);
                let webid = webid.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    pds.profiles().get(&webid).expect("profile read")
                })
            })
            .collect();

        let bodies: Vec<Vec<u8>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let on_disk = std::fs::read(pds.layout(&webid).profile()).unwrap();
        for body in &bodies {
            assert_eq!(body, &on_disk, "every first reader sees the stored default");
        }
    }
}

#[test]
fn stress_concurrent_default_acl_reads_converge() {
    let (_tmp, pds, webid) = store();
    let id = CredentialId::parse("contended").unwrap();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let pds = Arc::clone(&pds);
            let webid = webid.clone();
            let id = id.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                pds.acl().get_credential(&webid, &id).expect("acl read")
            })
        })
        .collect();

    let bodies: Vec<Vec<u8>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn stress_concurrent_distinct_puts_all_indexed() {
    let (_tmp, pds, webid) = store();
    let per_thread = 25;

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let pds = Arc::clone(&pds);
            let webid = webid.clone();
            thread::spawn(move || {
                for i in 0..per_thread {
                    let id = CredentialId::parse(&format!("t{t}-vc{i}")).unwrap();
                    let body = format!("<urn:uuid:t{t}-{i}> a <https://www.w3.org/2018/credentials#VerifiableCredential> .");
                    pds.credentials()
                        .put(&webid, &id, Some("text/turtle"), body.as_bytes())
                        .expect("put");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // With writers quiesced, the index reflects every completed put.
    let index = pds.credentials().index(&webid).unwrap();
    assert_eq!(index.matches("ldp:contains").count(), THREADS * per_thread);
    assert_eq!(pds.credentials().members(&webid).unwrap().len(), THREADS * per_thread);
}

#[test]
fn stress_concurrent_writers_same_id_leave_whole_document() {
    let (_tmp, pds, webid) = store();
    let id = CredentialId::parse("hot").unwrap();
    let barrier = Arc::new(Barrier::new(THREADS));

    let bodies: Vec<String> = (0..THREADS)
        .map(|t| format!("<urn:uuid:writer-{t}> a <https://www.w3.org/2018/credentials#VerifiableCredential> ."))
        .collect();

    let handles: Vec<_> = bodies
        .iter()
        .cloned()
        .map(|body| {
            let pds = Arc::clone(&pds);
            let webid = webid.clone();
            let id = id.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..10 {
                    pds.credentials()
                        .put(&webid, &id, Some("text/turtle"), body.as_bytes())
                        .expect("put");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stored = pds.credentials().get(&webid, &id, None).unwrap();
    assert_eq!(stored.media_type, MediaType::Turtle);
    let stored = String::from_utf8(stored.body).unwrap();
    assert!(bodies.contains(&stored), "no torn or interleaved write");
    assert_eq!(pds.credentials().members(&webid).unwrap(), vec!["hot.ttl"]);
}

#[test]
fn stress_put_delete_churn_ends_consistent() {
    let (_tmp, pds, webid) = store();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let pds = Arc::clone(&pds);
            let webid = webid.clone();
            thread::spawn(move || {
                let id = CredentialId::parse(&format!("churn-{t}")).unwrap();
                for _ in 0..20 {
                    pds.credentials()
                        .put(&webid, &id, Some("application/ld+json"), b"{\"n\":1}")
                        .expect("put");
                    pds.credentials().delete(&webid, &id).expect("delete");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(pds.credentials().members(&webid).unwrap().is_empty());
    let index = pds.credentials().index(&webid).unwrap();
    assert!(!index.contains("ldp:contains"));
}
