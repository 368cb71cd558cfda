//! End-to-end tests for the `cloudform edit` command.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cloudform() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cloudform"))
}

/// A working directory whose config disables the simulated lookup latency.
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".cloudform.toml"), "max_latency_ms = 0\n").unwrap();
    dir
}

fn edit_in(dir: &TempDir, id: &str) -> Command {
    let mut cmd = cloudform();
    cmd.args(["edit", id]).current_dir(dir.path());
    cmd
}

#[test]
fn rename_keeps_id() {
    let dir = workspace();

    edit_in(&dir, "cloud-aws-prod")
        .args(["--name", "AWS Production EU"])
        .assert()
        .success()
        .stdout(predicate::str::contains("loaded AWS Production"))
        .stdout(predicate::str::contains("[updated] AWS Production EU"))
        .stdout(predicate::str::contains("\"id\": \"cloud-aws-prod\""))
        .stdout(predicate::str::contains("updated cloud-aws-prod"));
}

#[test]
fn unknown_id_fails() {
    let dir = workspace();

    edit_in(&dir, "cloud-missing")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no cloud connection with id 'cloud-missing'"));
}

#[test]
fn blank_subscription_is_the_only_error() {
    let dir = workspace();

    edit_in(&dir, "cloud-azure-corp")
        .args(["--cred", "subscriptionId="])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 field"))
        .stderr(predicate::str::contains("subscriptionId"));
}

#[test]
fn switching_provider_requires_new_credentials() {
    let dir = workspace();

    edit_in(&dir, "cloud-aws-prod")
        .args(["--provider", "gcp"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("jsonText"));
}

#[test]
fn week_to_month_replaces_weekday_with_date() {
    let dir = workspace();

    edit_in(&dir, "cloud-aws-dev")
        .args(["--schedule", "month", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"frequency\": \"MONTH\""))
        .stdout(predicate::str::contains("\"date\": \"1\""))
        .stdout(predicate::str::contains("\"weekday\"").not());
}

#[test]
fn disabling_schedule_drops_setting() {
    let dir = workspace();

    edit_in(&dir, "cloud-aws-prod")
        .args(["--no-schedule", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"scheduleScanEnabled\": false"))
        .stdout(predicate::str::contains("scheduleScanSetting").not());
}

#[test]
fn hour_is_not_applicable_to_hourly_schedule() {
    let dir = workspace();

    edit_in(&dir, "cloud-aws-tokyo")
        .args(["--hour", "4"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("hour"));
}

#[test]
fn off_grid_minute_is_rejected() {
    let dir = workspace();

    edit_in(&dir, "cloud-aws-prod")
        .args(["--minute", "7"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("7"));
}
