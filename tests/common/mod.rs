#![allow(dead_code)]

use httpmock::{Method::POST, Mock, MockServer};
use mangopay::{Config, Mangopay};
use serde_json::json;

pub const CLIENT_ID: &str = "x";
pub const API_KEY: &str = "y";
// base64("x:y")
pub const BASIC_AUTH: &str = "Basic eDp5";

pub fn config(server: &MockServer) -> Config {
    Config::new(CLIENT_ID, API_KEY).with_base_url(server.base_url())
}

pub fn api(server: &MockServer) -> Mangopay {
    Mangopay::new(config(server)).expect("valid config")
}

pub fn path(rest: &str) -> String {
    format!("/v2.01/{}{}", CLIENT_ID, rest)
}

pub async fn mock_token<'a>(server: &'a MockServer, access_token: &str, expires_in: i64) -> Mock<'a> {
    let body = json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": expires_in
    });
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v2.01/oauth/token")
                .header("authorization", BASIC_AUTH)
                .body("grant_type=client_credentials");
            then.status(200).json_body(body);
        })
        .await
}
