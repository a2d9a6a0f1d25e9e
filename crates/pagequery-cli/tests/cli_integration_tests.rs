//! CLI integration tests
//!
//! These tests run the `pagequery` binary against snapshot files written to
//! a temporary directory.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn run_cli(dir: &TempDir, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_pagequery");
    Command::new(cli_bin)
        .current_dir(dir.path())
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_cli_resolve_prints_payload() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot = write_file(
        &temp_dir,
        "page-data.json",
        r#"{"42": {"data": {"title": "Home"}}}"#,
    );

    let output = run_cli(
        &temp_dir,
        &["resolve", "42", "--snapshot", snapshot.to_str().unwrap()],
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload, serde_json::json!({"title": "Home"}));
}

#[test]
fn test_cli_resolve_rejects_raw_query_text() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_cli(&temp_dir, &["resolve", "abc"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_QUERY_NOT_COMPILED"), "stderr: {}", stderr);
    assert!(stderr.contains("graphql"));
}

#[test]
fn test_cli_resolve_missing_data_reports_request() {
    let temp_dir = TempDir::new().unwrap();
    let server = write_file(&temp_dir, "request.json", r#"{"1": {"data": "x"}}"#);

    let output = run_cli(
        &temp_dir,
        &[
            "resolve",
            "2",
            "--server-snapshot",
            server.to_str().unwrap(),
            "--request-id",
            "req-abc",
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_DATA_UNAVAILABLE"), "stderr: {}", stderr);
    assert!(stderr.contains("render_mode: server"));
}

#[test]
fn test_cli_resolve_honours_capability_config() {
    // Without isolation support the per-request snapshot is never consulted
    let temp_dir = TempDir::new().unwrap();
    let config = write_file(
        &temp_dir,
        "pagequery.toml",
        "logging = \"test\"\n[capabilities]\nisolated_render_context = false\n",
    );
    let default = write_file(&temp_dir, "default.json", r#"{"5": {"data": "default"}}"#);
    let server = write_file(&temp_dir, "server.json", r#"{"5": {"data": "server"}}"#);

    let output = run_cli(
        &temp_dir,
        &[
            "resolve",
            "5",
            "--config",
            config.to_str().unwrap(),
            "--snapshot",
            default.to_str().unwrap(),
            "--server-snapshot",
            server.to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload, serde_json::json!("default"));
}

#[test]
fn test_cli_render_placeholder_for_empty_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot = write_file(&temp_dir, "empty.json", "{}");

    let output = run_cli(
        &temp_dir,
        &["render", "7", "--snapshot", snapshot.to_str().unwrap()],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "<div>Loading (StaticQuery)</div>");
}

#[test]
fn test_cli_render_prefers_direct_data() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot = write_file(&temp_dir, "ambient.json", r#"{"7": {"data": "ambient"}}"#);
    let data = write_file(&temp_dir, "direct.json", r#"{"data": "direct"}"#);

    let output = run_cli(
        &temp_dir,
        &[
            "render",
            "7",
            "--snapshot",
            snapshot.to_str().unwrap(),
            "--data",
            data.to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "\"direct\"");
}

#[test]
fn test_cli_prefetch_lists_queue() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_cli(&temp_dir, &["prefetch", "/blog/", "/about/", "/blog/"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["/blog/", "/about/"]);
}
