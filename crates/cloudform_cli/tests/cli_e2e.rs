//! End-to-end tests for global CLI behaviour (help, version, etc.).

use assert_cmd::Command;
use predicates::prelude::*;

fn cloudform() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cloudform"))
}

#[test]
fn help_shows_usage() {
    cloudform()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cloud connection"));
}

#[test]
fn help_lists_commands() {
    cloudform()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("edit"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn version_flag() {
    cloudform()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cloudform"));
}

#[test]
fn no_args_shows_help() {
    cloudform().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn invalid_command_fails() {
    cloudform().arg("invalid-command").assert().failure();
}

#[test]
fn missing_explicit_config_is_an_error() {
    cloudform()
        .args(["list", "--config", "does-not-exist.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config file not found"));
}
