use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn bin() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("safeguard"));
    cmd.env_remove("SAFEGUARD_TEXT")
        .arg("--iterations")
        .arg("10")
        .arg("--key-length")
        .arg("16")
        .arg("--salt-length")
        .arg("16");
    cmd
}

fn hash(text: &str) -> String {
    let output = bin()
        .env("SAFEGUARD_TEXT", text)
        .arg("hash")
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn hash_prints_packet() {
    bin()
        .env("SAFEGUARD_TEXT", "pw")
        .arg("hash")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^16,10,16,[0-9a-f]{48}\n$").unwrap());
}

#[test]
fn hash_and_verify_roundtrip() {
    let packet = hash("pw");

    bin()
        .env("SAFEGUARD_TEXT", "pw")
        .arg("verify")
        .arg(&packet)
        .assert()
        .success()
        .stdout("match\n");
}

#[test]
fn verify_ignores_current_parameters() {
    let packet = hash("pw");

    Command::new(assert_cmd::cargo::cargo_bin!("safeguard"))
        .env("SAFEGUARD_TEXT", "pw")
        .arg("--iterations")
        .arg("99")
        .arg("verify")
        .arg(&packet)
        .assert()
        .success();
}

#[test]
fn verify_wrong_text_fails() {
    let packet = hash("pw");

    bin()
        .env("SAFEGUARD_TEXT", "wrong_pw")
        .arg("verify")
        .arg(&packet)
        .assert()
        .failure()
        .stdout(predicate::str::contains("no match"));
}

#[test]
fn verify_reads_piped_text() {
    let packet = hash("pw");

    bin()
        .arg("verify")
        .arg(&packet)
        .write_stdin("pw\n")
        .assert()
        .success();
}

#[test]
fn verify_without_text_is_no_match() {
    let packet = hash("pw");

    bin()
        .arg("verify")
        .arg(&packet)
        .assert()
        .failure()
        .stdout(predicate::str::contains("no match"));
}

#[test]
fn hash_without_text_fails() {
    bin()
        .arg("hash")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be hashed"));
}

#[test]
fn hash_without_text_uses_placeholder_length() {
    bin()
        .arg("--default-plain-text-length")
        .arg("16")
        .arg("--quiet")
        .arg("hash")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("16,10,16,"));
}

#[test]
fn hash_with_negative_iterations_fails() {
    Command::new(assert_cmd::cargo::cargo_bin!("safeguard"))
        .env("SAFEGUARD_TEXT", "pw")
        .arg("--iterations")
        .arg("-1")
        .arg("hash")
        .assert()
        .failure()
        .stderr(predicate::str::contains("key derivation failed"));
}

#[test]
fn decode_rejects_short_packet() {
    bin()
        .arg("decode")
        .arg("a,b,cd")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 4 items, found 3"));
}

#[test]
fn decode_prints_record() {
    let output = bin().arg("decode").arg("2,10,4,abcd0123").output().unwrap();
    assert!(output.status.success());

    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["keyLength"], 2);
    assert_eq!(record["iterations"], 10);
    assert_eq!(record["saltLength"], 4);
    assert_eq!(record["salt"], "abcd");
    assert_eq!(record["derivedKey"], "0123");
}

#[test]
fn config_file_is_merged_under_flags() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "crypto": {{ "iterations": 5, "keyLength": 8, "defaultPlainTextLength": 32 }} }}"#
    )
    .unwrap();

    let output = Command::new(assert_cmd::cargo::cargo_bin!("safeguard"))
        .arg("--config")
        .arg(file.path())
        .arg("--key-length")
        .arg("24")
        .arg("config")
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["crypto"]["iterations"], 5);
    assert_eq!(config["crypto"]["keyLength"], 24);
    assert_eq!(config["crypto"]["saltLength"], 64);
    assert_eq!(config["crypto"]["defaultPlainTextLength"], 32);
}

#[test]
fn missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("safeguard"))
        .arg("--config")
        .arg(dir.path().join("missing.json"))
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}
