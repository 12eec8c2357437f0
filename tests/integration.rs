mod common;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn debidx_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_debidx"))
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    common::write_repository(&root.join("repo"));

    let config_content = format!(
        r#"[db]
path = "{}/data/debidx.sqlite"

[scan]
root = "{}/repo"
include_globs = ["**/*.deb"]
exclude_globs = []
follow_symlinks = false
"#,
        root.display(),
        root.display()
    );

    let config_path = config_dir.join("debidx.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_debidx(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = debidx_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run debidx binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_init_creates_database() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_debidx(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
    assert!(tmp.path().join("data/debidx.sqlite").exists());
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success1) = run_debidx(&config_path, &["init"]);
    assert!(success1, "First init failed");

    let (_, _, success2) = run_debidx(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_index_skips_corrupt_package() {
    let (_tmp, config_path) = setup_test_env();

    run_debidx(&config_path, &["init"]);
    let (stdout, stderr, success) = run_debidx(&config_path, &["index"]);
    assert!(success, "index failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("scanned: 3"));
    assert!(stdout.contains("indexed: 2"));
    assert!(stdout.contains("skipped: 1"));
    assert!(stdout.contains("control fields: 13"));
    assert!(stdout.contains("ok"));
    assert!(stderr.contains("broken_1.0_all.deb"));
}

#[test]
fn test_index_dry_run_writes_nothing() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_debidx(&config_path, &["index", "--dry-run", "--limit", "1"]);
    assert!(success);
    assert!(stdout.contains("dry-run"));
    assert!(stdout.contains("scanned: 1"));
    assert!(!tmp.path().join("data/debidx.sqlite").exists());
}

#[test]
fn test_search_and_get() {
    let (_tmp, config_path) = setup_test_env();

    run_debidx(&config_path, &["init"]);
    run_debidx(&config_path, &["index"]);

    let (stdout, stderr, success) =
        run_debidx(&config_path, &["search", "libssl", "--field", "Depends"]);
    assert!(success, "search failed: {}", stderr);
    assert!(stdout.contains("libfoo1_1.2-3_arm64.deb"));
    assert!(stdout.contains("deb_depends: libssl3 (>= 3.0.0)"));
    assert!(!stdout.contains("hello"));

    let (stdout, _, success) = run_debidx(&config_path, &["search", "no-such-package"]);
    assert!(success);
    assert!(stdout.contains("No results."));

    let (stdout, stderr, success) = run_debidx(
        &config_path,
        &["get", "pool/main/h/hello/hello_2.10-3_amd64.deb"],
    );
    assert!(success, "get failed: {}", stderr);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["file_name"], "hello_2.10-3_amd64.deb");
    assert_eq!(json["attributes"]["Package"], "hello");
    assert_eq!(json["attributes"]["Installed-Size"], "280");
}

#[test]
fn test_get_unknown_artifact_fails() {
    let (_tmp, config_path) = setup_test_env();

    run_debidx(&config_path, &["init"]);
    let (_, stderr, success) = run_debidx(&config_path, &["get", "pool/nope.deb"]);
    assert!(!success);
    assert!(stderr.contains("artifact not found"));
}

#[test]
fn test_inspect_without_config() {
    let tmp = TempDir::new().unwrap();
    let pkg = tmp.path().join("hello.deb");
    fs::write(&pkg, common::deb_gz(common::HELLO_CONTROL)).unwrap();

    let (stdout, stderr, success) = run_debidx(
        &tmp.path().join("missing.toml"),
        &["inspect", pkg.to_str().unwrap()],
    );
    assert!(success, "inspect failed: {}", stderr);
    assert!(stdout.contains("Package: hello"));
    assert!(stdout.contains("Installed-Size: 280"));
    assert!(!stdout.contains("Homepage"));
    assert!(stdout.contains("9 of 9 fields"));
}

#[test]
fn test_fields_lists_schema() {
    let tmp = TempDir::new().unwrap();
    let (stdout, _, success) = run_debidx(&tmp.path().join("missing.toml"), &["fields"]);
    assert!(success);
    for key in [
        "deb_package",
        "deb_architecture",
        "deb_installed_size",
        "deb_maintainer",
        "deb_version",
        "deb_depends",
        "deb_section",
        "deb_priority",
        "deb_description",
    ] {
        assert!(stdout.contains(key), "missing {}", key);
    }
    assert!(stdout.contains("stored+indexed"));
}

#[test]
fn test_missing_config_fails() {
    let tmp = TempDir::new().unwrap();
    let (_, stderr, success) = run_debidx(&tmp.path().join("missing.toml"), &["init"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}

#[test]
fn test_inspect_rejects_invalid_config() {
    let (tmp, config_path) = setup_test_env();
    fs::write(
        &config_path,
        "[db]\npath = \"db.sqlite\"\n[scan]\nroot = \".\"\n[extract]\nmax_control_bytes = 0\n",
    )
    .unwrap();
    let pkg = tmp.path().join("repo/pool/main/h/hello/hello_2.10-3_amd64.deb");

    let (stdout, stderr, success) = run_debidx(&config_path, &["inspect", pkg.to_str().unwrap()]);
    assert!(!success, "inspect should fail: stdout={}", stdout);
    assert!(stderr.contains("max_control_bytes"));
}
