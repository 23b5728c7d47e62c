// Binary-level tests: invocation mode, stdin handling and exit codes

use crate::common::*;
use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;

fn relay_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_incident-relay"));
    cmd.env_remove("RUST_LOG")
        .env("LOG_LEVEL", "warn")
        .env("LOG_FORMAT", "text")
        .env_remove("RELAY_VERIFY_TLS");
    cmd
}

#[test]
fn test_binary_help() {
    relay_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("incident-relay"));
}

#[test]
fn test_missing_execute_flag_is_rejected() {
    relay_cmd()
        .write_stdin("{}")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ERROR Unsupported execution mode"));
}

#[test]
fn test_garbage_input_fails_normalization() {
    relay_cmd()
        .arg("--execute")
        .write_stdin("not json at all")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("ERROR Invalid payload"));
}

#[test]
fn test_malformed_base_url_fails_without_network() {
    relay_cmd()
        .arg("--execute")
        .write_stdin(envelope("::not a url::", json!({})))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("ERROR Configuration error"));
}

#[test]
fn test_invalid_runtime_config_fails() {
    relay_cmd()
        .arg("--execute")
        .env("RELAY_REQUEST_TIMEOUT_SECS", "0")
        .write_stdin(envelope("https://h", json!({})))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("RELAY_REQUEST_TIMEOUT_SECS"));
}

#[test]
fn test_dry_run_prints_incident() {
    relay_cmd()
        .args(["--execute", "--dry-run"])
        .write_stdin(envelope("https://h", json!({"severity": "Critical"})))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"severity\": 4"))
        .stdout(predicate::str::contains("\"createInvestigation\": true"));
}

#[test]
fn test_dry_run_reports_occurred_fallback() {
    relay_cmd()
        .args(["--execute", "--dry-run"])
        .write_stdin(envelope("https://h", json!({"occured": "not-a-number"})))
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "WARN Illegal occured epoch time not-a-number",
        ));
}

#[test]
fn test_end_to_end_delivery_exits_zero() {
    let mut server = Server::new();
    let root = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("set-cookie", "XSRF-TOKEN=tok1; Path=/")
        .create();
    let login = server
        .mock("POST", "/login")
        .match_header("x-xsrf-token", "tok1")
        .match_body(Matcher::Json(json!({"user": "u", "password": "p"})))
        .with_status(200)
        .with_header("set-cookie", "SESSION=abc123; Path=/")
        .create();
    let incident = server
        .mock("POST", "/incident")
        .match_header("x-xsrf-token", "tok1")
        .match_header("cookie", Matcher::Regex("SESSION=abc123".to_string()))
        .match_body(Matcher::PartialJson(json!({
            "name": "Alert X",
            "details": "d",
            "severity": 3,
            "createInvestigation": true,
            "labels": [{"type": "src", "value": "ids"}]
        })))
        .with_status(200)
        .create();

    relay_cmd()
        .arg("--execute")
        .write_stdin(envelope(&server.url(), json!({})))
        .assert()
        .code(0)
        .stderr(predicate::str::contains("ERROR").not());

    root.assert();
    login.assert();
    incident.assert();
}

#[test]
fn test_login_rejected_exits_with_failure() {
    let mut server = Server::new();
    let _root = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("set-cookie", "XSRF-TOKEN=tok1; Path=/")
        .create();
    let _login = server.mock("POST", "/login").with_status(401).create();
    let incident = server.mock("POST", "/incident").expect(0).create();

    relay_cmd()
        .arg("--execute")
        .write_stdin(envelope(&server.url(), json!({})))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("ERROR Bad login response: 401"));

    incident.assert();
}

#[test]
fn test_delivery_rejected_exits_with_failure() {
    let mut server = Server::new();
    let _root = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("set-cookie", "XSRF-TOKEN=tok1; Path=/")
        .create();
    let _login = server.mock("POST", "/login").with_status(200).create();
    let _incident = server.mock("POST", "/incident").with_status(500).create();

    relay_cmd()
        .arg("--execute")
        .write_stdin(envelope(&server.url(), json!({})))
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "ERROR Response 500 Internal Server Error",
        ));
}
