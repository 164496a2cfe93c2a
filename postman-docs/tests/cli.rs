use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const COLLECTION: &str = r#"{
  "item": [
    { "name": "Login", "item": [], "request": { "method": "POST", "url": "{{BaseURL}}/login", "body": { "raw": "{}" } } }
  ]
}"#;

/// Creates a generate-only config (no publish section) in `dir`.
fn create_minimal_config(dir: &Path) -> PathBuf {
    fs::write(dir.join("collection.json"), COLLECTION).unwrap();
    let config = dir.join("config.yaml");
    fs::write(
        &config,
        format!(
            "generate:\n  source_file: {d}/collection.json\n  output_dir: {d}/docs\n  prefix: api\n  link_base: reference\n  base_url: https://x.io\n",
            d = dir.display()
        ),
    )
    .expect("Writing temp config failed");
    config
}

#[test]
fn generate_cli_writes_markdown_pages() {
    let dir = tempdir().unwrap();
    let config = create_minimal_config(dir.path());

    let mut cmd = Command::cargo_bin("postman-docs").expect("Binary exists");
    cmd.arg("generate").arg("--config").arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Generated 1 pages"));

    let page = fs::read_to_string(dir.path().join("docs/api-login.md")).unwrap();
    assert!(page.contains("POST https://x.io/login"));
}

#[test]
fn sync_cli_fails_without_publish_section() {
    let dir = tempdir().unwrap();
    let config = create_minimal_config(dir.path());

    let mut cmd = Command::cargo_bin("postman-docs").expect("Binary exists");
    cmd.arg("sync")
        .arg("--config")
        .arg(&config)
        .env("README_API_KEY", "irrelevant");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("publish section"));
}

#[test]
fn generate_cli_fails_on_malformed_collection() {
    let dir = tempdir().unwrap();
    let config = create_minimal_config(dir.path());
    fs::write(dir.path().join("collection.json"), "{ not json").unwrap();

    let mut cmd = Command::cargo_bin("postman-docs").expect("Binary exists");
    cmd.arg("generate").arg("--config").arg(&config);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse Postman collection"));
}
