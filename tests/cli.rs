use assert_cmd::Command;
use httpmock::{Method::GET, Method::POST, MockServer};
use predicates::prelude::*;
use serde_json::{json, Value};

fn mangopay(server: &MockServer) -> anyhow::Result<Command> {
    let mut cmd = Command::cargo_bin("mangopay")?;
    cmd.env_clear()
        .env("MANGOPAY_CLIENT_ID", "x")
        .env("MANGOPAY_API_KEY", "y")
        .env("MANGOPAY_BASE_URL", server.base_url())
        .arg("--log-level")
        .arg("warn");
    Ok(cmd)
}

fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/v2.01/oauth/token")
            .header("authorization", "Basic eDp5");
        then.status(200).json_body(json!({
            "access_token": "abc",
            "token_type": "Bearer",
            "expires_in": 3600
        }));
    })
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    serde_json::from_str(out.trim()).unwrap()
}

#[test]
fn authorize_prints_token_metadata() -> anyhow::Result<()> {
    let server = MockServer::start();
    let token = mock_token(&server);

    let assert = mangopay(&server)?.arg("authorize").assert().success();
    let out = stdout_json(&assert);
    assert_eq!(out["token_type"], json!("Bearer"));
    assert_eq!(out["expires_in"], json!(3600));
    assert!(out["expires_at"].is_string());
    // The access token itself is never printed.
    assert!(!out.to_string().contains("abc"));
    token.assert_hits(1);
    Ok(())
}

#[test]
fn get_user_prints_resource_json() -> anyhow::Result<()> {
    let server = MockServer::start();
    mock_token(&server);
    let user = server.mock(|when, then| {
        when.method(GET)
            .path("/v2.01/x/users/u1")
            .header("authorization", "Bearer abc");
        then.status(200).json_body(json!({
            "Id": "u1",
            "PersonType": "NATURAL",
            "FirstName": "Ann",
            "Email": "ann@example.com"
        }));
    });

    let assert = mangopay(&server)?.args(["get", "user", "u1"]).assert().success();
    let out = stdout_json(&assert);
    assert_eq!(out["Id"], json!("u1"));
    assert_eq!(out["FirstName"], json!("Ann"));
    user.assert_hits(1);
    Ok(())
}

#[test]
fn rate_limits_reports_snapshot_after_call() -> anyhow::Result<()> {
    let server = MockServer::start();
    mock_token(&server);
    server.mock(|when, then| {
        when.method(GET).path("/v2.01/x/users/u1");
        then.status(200)
            .header("x-ratelimit", "1, 2, 3, 4")
            .header("x-ratelimit-remaining", "99, 98, 97, 96")
            .json_body(json!({"Id": "u1", "PersonType": "LEGAL"}));
    });

    let assert = mangopay(&server)?.args(["rate-limits", "u1"]).assert().success();
    let out = stdout_json(&assert);
    let windows = out["windows"].as_array().unwrap();
    assert_eq!(windows.len(), 4);
    assert_eq!(windows[0]["interval_minutes"], json!(15));
    assert_eq!(windows[0]["calls_made"], json!(1));
    assert_eq!(windows[3]["calls_remaining"], json!(96));
    Ok(())
}

#[test]
fn api_error_exits_nonzero() -> anyhow::Result<()> {
    let server = MockServer::start();
    mock_token(&server);
    server.mock(|when, then| {
        when.method(GET).path("/v2.01/x/wallets/missing");
        then.status(404)
            .json_body(json!({"Message": "The ressource does not exist", "Type": "ressource_not_found"}));
    });

    mangopay(&server)?
        .args(["get", "wallet", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("404"));
    Ok(())
}

#[test]
fn missing_credentials_fail_fast() -> anyhow::Result<()> {
    let server = MockServer::start();
    let token = mock_token(&server);

    let mut cmd = Command::cargo_bin("mangopay")?;
    cmd.env_clear()
        .env("MANGOPAY_BASE_URL", server.base_url())
        .arg("authorize")
        .assert()
        .failure()
        .stderr(predicate::str::contains("MANGOPAY_CLIENT_ID"));
    token.assert_hits(0);
    Ok(())
}

#[test]
fn unknown_resource_is_rejected_by_parser() -> anyhow::Result<()> {
    let server = MockServer::start();
    mangopay(&server)?
        .args(["get", "mandate", "m1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mandate"));
    Ok(())
}
