//! Integration tests for `chatview show`.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MESSAGES: &str = "/api/chat/getMessagesByChatID/s1";

fn show(home: &TempDir, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("chatview");
    cmd.env("CHATVIEW_HOME", home.path())
        .env_remove("CHATVIEW_SERVER")
        .env_remove("CHATVIEW_TOKEN")
        .env_remove("RUST_LOG")
        .args(["show", "s1", "--server", &server.uri()]);
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_prints_segmented_transcript() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MESSAGES))
        .and(header("authorization", "Bearer t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "author": "user", "content": "how do I print?" },
            { "author": "assistant", "content": "Like this:\n```rust\nprintln!(\"hi\");\n```" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    show(&home, &server)
        .args(["--token", "Bearer t"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[user]\nhow do I print?\n"))
        .stdout(predicate::str::contains("[assistant]\nLike this:\n┌──"))
        .stdout(predicate::str::contains("    println!(\"hi\");\n└"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_reads_token_from_env() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MESSAGES))
        .and(header("authorization", "Bearer from-env"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    show(&home, &server)
        .env("CHATVIEW_TOKEN", "Bearer from-env")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_rejected_token_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    show(&home, &server)
        .args(["--token", "Bearer expired"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("fetch transcript for session s1"))
        .stderr(predicate::str::contains("auth error"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_without_token_fails_before_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    show(&home, &server)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No authorization token available"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_server_error_exits_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    show(&home, &server)
        .args(["--token", "Bearer t"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("network error"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    show(&home, &server)
        .args(["--token", "Bearer t"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("parse error"));
}
