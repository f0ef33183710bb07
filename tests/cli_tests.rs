//! End-to-end tests for the plugin binary

#![allow(clippy::unwrap_used, clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PLUGIN_VARIABLES: &[&str] = &[
    "PLUGIN_COMMAND",
    "PLUGIN_PACKAGE_TYPE",
    "PLUGIN_TOKEN",
    "PLUGIN_ACCOUNT",
    "PLUGIN_ORG",
    "PLUGIN_PROJECT",
    "PLUGIN_API_URL",
    "PLUGIN_PKG_URL",
    "PLUGIN_REGISTRY",
    "PLUGIN_SOURCE",
    "PLUGIN_NAME",
    "PLUGIN_VERSION",
    "PLUGIN_DESCRIPTION",
    "PLUGIN_FILENAME",
    "PLUGIN_DESTINATION",
    "PLUGIN_ENABLE_PROXY",
    "PLUGIN_LOG_LEVEL",
    "PLUGIN_CLI_BINARY",
];

/// Plugin command with a clean PLUGIN_* environment and HOME inside `home`
fn plugin_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("artifact-plugin").unwrap();
    for variable in PLUGIN_VARIABLES {
        cmd.env_remove(variable);
    }
    cmd.env_remove("RUST_LOG").env("HOME", home.path());
    cmd
}

/// Command configured for a push of `source` through `tool`
fn push_cmd(home: &TempDir, source: &std::path::Path, tool: &str) -> Command {
    let mut cmd = plugin_cmd(home);
    cmd.env("PLUGIN_REGISTRY", "builds")
        .env("PLUGIN_SOURCE", source)
        .env("PLUGIN_NAME", "my-app")
        .env("PLUGIN_TOKEN", "super-secret")
        .env("PLUGIN_ACCOUNT", "acct")
        .env("PLUGIN_PKG_URL", "https://pkg.example.com")
        .env("PLUGIN_CLI_BINARY", tool);
    cmd
}

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    plugin_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PLUGIN_REGISTRY"));
}

#[test]
fn test_missing_registry_is_usage_error() {
    let home = TempDir::new().unwrap();
    plugin_cmd(&home)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("registry name must be set"));
}

#[test]
fn test_unsupported_package_type_is_usage_error() {
    let home = TempDir::new().unwrap();
    plugin_cmd(&home)
        .env("PLUGIN_PACKAGE_TYPE", "docker")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported package type: docker"));
}

#[test]
fn test_unsupported_command_is_usage_error() {
    let home = TempDir::new().unwrap();
    plugin_cmd(&home)
        .arg("--command")
        .arg("publish")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported command: publish"));
}

#[cfg(unix)]
#[test]
fn test_push_succeeds_and_masks_token() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let file = work.path().join("app.tgz");
    fs::write(&file, "payload").unwrap();

    push_cmd(&home, &file, "true")
        .assert()
        .success()
        .stderr(predicate::str::contains("--token ********"))
        .stderr(predicate::str::contains("super-secret").not());

    let auth = fs::read_to_string(home.path().join(".harness/auth.json")).unwrap();
    assert!(auth.contains("CIManager super-secret"));
}

#[cfg(unix)]
#[test]
fn test_single_file_tool_failure_exits_with_one() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let file = work.path().join("app.tgz");
    fs::write(&file, "payload").unwrap();

    push_cmd(&home, &file, "false")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "failed to push artifact 'my-app' to registry 'builds'",
        ));
}

#[cfg(unix)]
#[test]
fn test_directory_push_tolerates_file_failures() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    fs::write(work.path().join("a.txt"), "a").unwrap();
    fs::write(work.path().join("b.txt"), "b").unwrap();

    push_cmd(&home, work.path(), "false")
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed uploads: 2"));
}

#[test]
fn test_missing_tool_reports_not_found() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let file = work.path().join("app.tgz");
    fs::write(&file, "payload").unwrap();

    push_cmd(&home, &file, "definitely-not-a-registry-tool")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "executable 'definitely-not-a-registry-tool' not found",
        ));
}

#[cfg(unix)]
#[test]
fn test_get_does_not_write_auth_file() {
    let home = TempDir::new().unwrap();
    plugin_cmd(&home)
        .env("PLUGIN_COMMAND", "get")
        .env("PLUGIN_REGISTRY", "builds")
        .env("PLUGIN_NAME", "my-app")
        .env("PLUGIN_TOKEN", "tok")
        .env("PLUGIN_ACCOUNT", "acct")
        .env("PLUGIN_CLI_BINARY", "true")
        .assert()
        .success();

    assert!(!home.path().join(".harness").exists());
}

#[cfg(unix)]
#[test]
fn test_push_passes_description() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let file = work.path().join("app.tgz");
    fs::write(&file, "payload").unwrap();

    push_cmd(&home, &file, "true")
        .env("PLUGIN_DESCRIPTION", "nightly")
        .assert()
        .success()
        .stderr(predicate::str::contains("--description nightly"));
}
