//! Exit codes and suggestions for failing invocations.

use assert_cmd::{Command, cargo};
use predicates::prelude::*;
use tempfile::TempDir;

fn printmatch() -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("printmatch");
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn invalid_artwork_is_a_user_error() {
    printmatch()
        .args(["encode", "11K00", "UTS"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Suggestions:"))
        .stderr(predicate::str::contains("11K001"));
}

#[test]
fn reserved_code_is_rejected() {
    printmatch()
        .args(["encode", "11K001", "UTS", "99"])
        .assert()
        .code(2);
}

#[test]
fn missing_catalog_is_not_found() {
    let dir = TempDir::new().unwrap();
    printmatch()
        .current_dir(dir.path())
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .args(["suggest", "11K001"])
        .assert()
        .code(4);

    printmatch()
        .current_dir(dir.path())
        .args(["suggest", "11K001", "--catalog", "nope.toml", "--files", "."])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Catalog not found"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    printmatch().assert().code(2);
}

#[test]
fn apply_without_selection_is_usage_error() {
    printmatch()
        .args(["apply", "11K001"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--min-score"));
}

#[test]
fn unknown_config_key() {
    printmatch()
        .args(["config", "get", "nope.key"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}
