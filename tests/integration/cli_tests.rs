//! Integration tests for the CLI binary.
//!
//! This test is registered as a [[test]] in the webid-pds-cli crate
//! so that CARGO_BIN_EXE_pds is available.

use std::process::{Command, Output};

const WEBID: &str = "https://cli.example.org/profile/card#me";

/// Get a Command pointing to the `pds` binary.
fn pds_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pds"))
}

fn run(args: &[&str]) -> Output {
    pds_binary()
        .args(args)
        .output()
        .expect("failed to execute pds")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn cli_responds_to_help() {
    let output = run(&["--help"]);
    assert!(
        output.status.success(),
        "pds --help should exit with success, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let out = stdout(&output);
    assert!(out.contains("keygen") && out.contains("token"), "got: {out}");
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let output = run(&["--nonexistent-flag"]);
    assert!(!output.status.success());
}

#[test]
fn keygen_then_signed_token() {
    let tmp = tempfile::tempdir().unwrap();
    let key = tmp.path().join("issuer.key");
    let key_arg = key.to_str().unwrap();

    let output = run(&["keygen", "--out", key_arg]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("pdskey_"));

    // Refuses to clobber without --force.
    assert!(!run(&["keygen", "--out", key_arg]).status.success());

    let output = run(&["token", "--webid", WEBID, "--key", key_arg, "--ttl", "10m"]);
    assert!(output.status.success());
    let token = stdout(&output);
    assert_eq!(token.trim().split('.').count(), 3);
}

#[test]
fn token_rejects_invalid_webid() {
    let output = run(&["token", "--webid", "not a uri"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid --webid"));
}

#[test]
fn token_rejects_overlong_ttl() {
    let output = run(&[
        "token",
        "--webid",
        "https://alice.example.org/profile/card#me",
        "--ttl",
        "999999999999999d",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("too long"));
}

#[test]
fn resolve_ls_and_reindex() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().to_str().unwrap();

    let output = run(&["--data-root", root, "resolve", "--webid", WEBID]);
    assert!(output.status.success());
    assert!(stdout(&output)
        .trim()
        .ends_with("storage/cli.example.org_profile_card"));

    let output = run(&["--data-root", root, "ls", "--webid", WEBID]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No credentials stored"));

    let creds = tmp
        .path()
        .join("storage/cli.example.org_profile_card/credentials");
    std::fs::create_dir_all(&creds).unwrap();
    std::fs::write(creds.join("vc1.ttl"), "<#a> <#b> <#c> .").unwrap();

    let output = run(&["--data-root", root, "reindex", "--webid", WEBID]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("1 member(s)"));
    let index = std::fs::read_to_string(creds.join("index.ttl")).unwrap();
    assert!(index.contains("<./vc1.ttl>"));

    let output = run(&["--data-root", root, "ls", "--webid", WEBID, "--json"]);
    assert!(output.status.success());
    let entries: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(entries[0]["name"], "vc1.ttl");
}

#[test]
fn convert_turtle_file() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("vc.ttl");
    std::fs::write(
        &file,
        "@prefix cred: <https://www.w3.org/2018/credentials#> .\n<urn:uuid:1> a cred:VerifiableCredential .\n",
    )
    .unwrap();

    let output = run(&["convert", file.to_str().unwrap()]);
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(doc["type"], "VerifiableCredential");
}
