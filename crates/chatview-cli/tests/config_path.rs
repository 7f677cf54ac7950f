use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("chatview")
        .env("CHATVIEW_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"))
        .stdout(predicate::str::contains(dir.path().to_string_lossy()));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("chatview")
        .env("CHATVIEW_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("server_url = \"http://localhost:5000\""));
    assert!(contents.contains("token_env = \"CHATVIEW_TOKEN\""));
    assert!(contents.contains("# push_url ="));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "server_url = \"http://example.test\"\n").unwrap();

    cargo_bin_cmd!("chatview")
        .env("CHATVIEW_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert_eq!(contents, "server_url = \"http://example.test\"\n");
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "server_url = [").unwrap();

    cargo_bin_cmd!("chatview")
        .env("CHATVIEW_HOME", dir.path())
        .args(["show", "s1", "--token", "Bearer t"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("load config"));
}
