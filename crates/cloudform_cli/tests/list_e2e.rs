//! End-to-end tests for the `cloudform list` command.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cloudform() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cloudform"))
}

#[test]
fn lists_every_provider() {
    let dir = TempDir::new().unwrap();

    cloudform()
        .arg("list")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("6 connections"))
        .stdout(predicate::str::contains("Amazon Web Services"))
        .stdout(predicate::str::contains("Microsoft Azure"))
        .stdout(predicate::str::contains("Google Cloud Platform"));
}

#[test]
fn shows_flags_as_words() {
    let dir = TempDir::new().unwrap();
    let output = cloudform().arg("list").current_dir(dir.path()).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    let prod = stdout.lines().find(|l| l.contains("cloud-aws-prod")).unwrap();
    assert!(prod.contains("valid") && prod.contains("on"));

    let dev = stdout.lines().find(|l| l.contains("cloud-aws-dev")).unwrap();
    assert!(dev.contains("invalid") && dev.contains("off"));
}

#[test]
fn provider_filter_limits_rows() {
    let dir = TempDir::new().unwrap();

    cloudform()
        .args(["list", "--provider", "gcp"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 connections"))
        .stdout(predicate::str::contains("cloud-gcp-data"))
        .stdout(predicate::str::contains("cloud-aws-prod").not());
}

#[test]
fn unknown_provider_is_rejected() {
    cloudform().args(["list", "--provider", "oracle"]).assert().failure();
}

#[test]
fn never_prints_secrets() {
    let dir = TempDir::new().unwrap();

    cloudform()
        .arg("list")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("wJalrXUtnFEMI").not());
}
