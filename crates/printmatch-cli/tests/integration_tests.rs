//! End-to-end tests for the `printmatch` binary.

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::{Command, cargo};
use predicates::prelude::*;
use tempfile::TempDir;

const CATALOG: &str = r#"
[[dimensions]]
name = "Size"
codes = { "01" = "S", "02" = "M" }

[[dimensions]]
name = "Finish"
codes = { "01" = "Matte", "02" = "Gloss" }

[[product_types]]
code = "UTS"
name = "Unisex T-Shirt"
bindings = [{ dimension = "Size" }, { dimension = "Finish" }]

[[generate]]
artwork = "11K001"
product_type = "UTS"
"#;

/// A catalog, a print-file tree and a config file pointing at both.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        fs::write(root.join("catalog.toml"), CATALOG).unwrap();
        for rel in ["11K001/11K001-UTS-01_print.png", "11K001/mockups/front.jpg"] {
            let path = root.join("print-files").join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"").unwrap();
        }
        fs::write(
            root.join("printmatch.toml"),
            format!(
                "[catalog]\npath = {:?}\n\n[files]\nroot = {:?}\n\n[store]\nassignments = {:?}\n",
                root.join("catalog.toml"),
                root.join("print-files"),
                root.join("state/assignments.json"),
            ),
        )
        .unwrap();

        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn assignments(&self) -> PathBuf {
        self.path().join("state/assignments.json")
    }

    fn cmd(&self) -> Command {
        let mut cmd = printmatch();
        cmd.current_dir(self.path())
            .arg("--config")
            .arg(self.path().join("printmatch.toml"));
        cmd
    }
}

fn printmatch() -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("printmatch");
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_subcommands() {
    printmatch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("encode"))
        .stdout(predicate::str::contains("suggest"))
        .stdout(predicate::str::contains("apply"));
}

#[test]
fn version_flag() {
    printmatch()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn encode_prints_sku() {
    printmatch()
        .args(["encode", "11K001", "UTS", "01", "02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("11K001-UTS-01-02"));
}

#[test]
fn any_no_color_value_disables_colour() {
    for value in ["1", "true", "yes"] {
        cargo::cargo_bin_cmd!("printmatch")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", value)
            .args(["encode", "11K001", "UTS", "01"])
            .assert()
            .success()
            .stdout(predicate::str::contains("11K001-UTS-01"))
            .stdout(predicate::str::contains("\u{1b}[").not());
    }
}

#[test]
fn decode_json_reports_each_name() {
    printmatch()
        .args([
            "--output-format",
            "json",
            "decode",
            "11K001-UTS-01-02_print.png",
            "front.jpg",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sku\": \"11K001-UTS-01-02\""))
        .stdout(predicate::str::contains("\"file_name\": \"front.jpg\""));
}

#[test]
fn suggest_lists_covered_variants() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["--output-format", "json", "suggest", "11K001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("11K001-UTS-01_print.png"))
        .stdout(predicate::str::contains("\"hierarchical_var1\""))
        .stdout(predicate::str::contains("11K001-UTS-01-02"))
        .stdout(predicate::str::contains("front.jpg"));
}

#[test]
fn dry_run_writes_nothing() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["apply", "11K001", "11K001-UTS-01_print.png", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 planned assignment(s)"));
    assert!(!ws.assignments().exists());
}

#[test]
fn apply_persists_assignments() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["apply", "11K001", "11K001-UTS-01_print.png", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Made 2 assignment(s)"));

    let saved = fs::read_to_string(ws.assignments()).unwrap();
    assert!(saved.contains("11K001-UTS-01-01"));
    assert!(saved.contains("11K001-UTS-01-02"));
    assert!(!saved.contains("11K001-UTS-02-01"));
}

#[test]
fn apply_is_repeatable() {
    let ws = Workspace::new();
    for _ in 0..2 {
        ws.cmd()
            .args(["apply", "11K001", "--min-score", "0", "--yes"])
            .assert()
            .success();
    }
    let saved = fs::read_to_string(ws.assignments()).unwrap();
    assert_eq!(saved.matches("print_file_id").count(), 2);
}

#[test]
fn config_get_reads_file() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["config", "get", "files.root"])
        .assert()
        .success()
        .stdout(predicate::str::contains("print-files"));
}
