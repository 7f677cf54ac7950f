use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("chatview")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--server"))
        .stdout(predicate::str::contains("SESSION_ID"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("chatview")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("chatview")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("chatview"));
}

#[test]
fn test_missing_session_fails() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("chatview")
        .env("CHATVIEW_HOME", dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Missing SESSION_ID"));
}
