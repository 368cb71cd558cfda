//! End-to-end tests for the `cloudform init` command.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cloudform() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cloudform"))
}

#[test]
fn creates_config_file() {
    let dir = TempDir::new().unwrap();

    cloudform().arg("init").current_dir(dir.path()).assert().success();

    let content = fs::read_to_string(dir.path().join(".cloudform.toml")).unwrap();
    assert!(content.contains("mandatory_region = \"global\""));
    assert!(content.contains("load_timeout_ms"));
}

#[test]
fn existing_file_is_left_alone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".cloudform.toml");
    fs::write(&path, "max_latency_ms = 0\n").unwrap();

    cloudform()
        .arg("init")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&path).unwrap(), "max_latency_ms = 0\n");
}

#[test]
fn force_overwrites() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".cloudform.toml");
    fs::write(&path, "max_latency_ms = 0\n").unwrap();

    cloudform().args(["init", "--force"]).current_dir(dir.path()).assert().success();

    assert!(fs::read_to_string(&path).unwrap().contains("mandatory_region"));
}

#[test]
fn output_flag_specifies_path() {
    let dir = TempDir::new().unwrap();

    cloudform()
        .args(["init", "--output", "custom.toml"])
        .current_dir(dir.path())
        .assert()
        .success();

    assert!(dir.path().join("custom.toml").exists());
    assert!(!dir.path().join(".cloudform.toml").exists());
}

#[test]
fn written_config_is_accepted_by_list() {
    let dir = TempDir::new().unwrap();

    cloudform().arg("init").current_dir(dir.path()).assert().success();
    cloudform().arg("list").current_dir(dir.path()).assert().success();
}
