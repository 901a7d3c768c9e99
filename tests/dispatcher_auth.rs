mod common;

use common::{api, config, mock_token, path};
use futures::future::join_all;
use httpmock::{Method::GET, Method::POST, MockServer};
use mangopay::endpoints::Endpoint;
use mangopay::http::{Dispatcher, RequestOptions};
use mangopay::models::Wallet;
use mangopay::{Error, ErrorHandler};
use reqwest::StatusCode;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn first_call_authorizes_once_and_sends_bearer() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server, "abc", 3600).await;
    let wallet = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(path("/wallets/w1"))
                .header("authorization", "Bearer abc");
            then.status(200).json_body(json!({"Id": "w1", "Currency": "EUR"}));
        })
        .await;

    let api = api(&server);
    assert!(api.dispatcher().is_expired());
    let w = api.wallets.get("w1").await.unwrap();
    assert_eq!(w.id.as_deref(), Some("w1"));
    let w = api.wallets.get("w1").await.unwrap();
    assert_eq!(w.currency.as_deref(), Some("EUR"));

    token.assert_hits_async(1).await;
    wallet.assert_hits_async(2).await;
    assert!(!api.dispatcher().is_expired());
}

#[tokio::test]
async fn stale_token_triggers_one_authorize_per_call() {
    let server = MockServer::start_async().await;
    // 30s lifetime is inside the 60s safety margin: stale as soon as stored.
    let token = mock_token(&server, "short", 30).await;
    let wallet = server
        .mock_async(|when, then| {
            when.method(GET).path(path("/wallets/w1"));
            then.status(200).json_body(json!({"Id": "w1"}));
        })
        .await;

    let api = api(&server);
    api.wallets.get("w1").await.unwrap();
    assert_eq!(token.hits_async().await, 1);
    assert!(api.dispatcher().is_expired());
    api.wallets.get("w1").await.unwrap();

    token.assert_hits_async(2).await;
    wallet.assert_hits_async(2).await;
}

#[tokio::test]
async fn rejected_token_is_refreshed_and_call_retried_once() {
    let server = MockServer::start_async().await;
    let dispatcher = Dispatcher::new(config(&server)).unwrap();

    let mut old_token = mock_token(&server, "stale", 3600).await;
    dispatcher.authorize().await.unwrap();
    old_token.delete_async().await;
    let new_token = mock_token(&server, "fresh", 3600).await;

    let rejected = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(path("/wallets/w1"))
                .header("authorization", "Bearer stale");
            then.status(401).json_body(json!({"Message": "invalid token", "Type": "unauthorized"}));
        })
        .await;
    let accepted = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(path("/wallets/w1"))
                .header("authorization", "Bearer fresh");
            then.status(200).json_body(json!({"Id": "w1"}));
        })
        .await;

    let wallet: Wallet = dispatcher
        .call_model(Endpoint::WalletsGet, RequestOptions::new().id("w1"))
        .await
        .unwrap();
    assert_eq!(wallet.id.as_deref(), Some("w1"));
    rejected.assert_hits_async(1).await;
    new_token.assert_hits_async(1).await;
    accepted.assert_hits_async(1).await;
}

#[tokio::test]
async fn second_unauthorized_is_surfaced_without_further_retry() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server, "abc", 3600).await;
    let wallet = server
        .mock_async(|when, then| {
            when.method(GET).path(path("/wallets/w1"));
            then.status(401).json_body(json!({"Message": "nope"}));
        })
        .await;

    let handled = Arc::new(AtomicUsize::new(0));
    let seen = handled.clone();
    let cfg = config(&server).with_error_handler(ErrorHandler::new(move |status, _| {
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        seen.fetch_add(1, Ordering::SeqCst);
    }));
    let dispatcher = Dispatcher::new(cfg).unwrap();

    let err = dispatcher
        .call(Endpoint::WalletsGet, RequestOptions::new().id("w1"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    token.assert_hits_async(2).await;
    wallet.assert_hits_async(2).await;
    assert_eq!(handled.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_share_one_authorization() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server, "abc", 3600).await;
    let wallet = server
        .mock_async(|when, then| {
            when.method(GET).path(path("/wallets/w1"));
            then.status(200)
                .json_body(json!({"Id": "w1"}))
                .delay(Duration::from_millis(20));
        })
        .await;

    let api = api(&server);
    let calls = (0..8).map(|_| api.wallets.get("w1"));
    let results = join_all(calls).await;
    assert!(results.iter().all(|r| r.is_ok()));

    token.assert_hits_async(1).await;
    wallet.assert_hits_async(8).await;
}

#[tokio::test]
async fn rejected_grant_is_an_auth_error() {
    let server = MockServer::start_async().await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST).path("/v2.01/oauth/token");
            then.status(401).json_body(json!({"error": "invalid_client"}));
        })
        .await;
    let wallet = server
        .mock_async(|when, then| {
            when.method(GET).path(path("/wallets/w1"));
            then.status(200).json_body(json!({"Id": "w1"}));
        })
        .await;

    let err = api(&server).wallets.get("w1").await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)), "got {:?}", err);
    token.assert_hits_async(1).await;
    wallet.assert_hits_async(0).await;
}

#[tokio::test]
async fn incomplete_grant_is_an_auth_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v2.01/oauth/token");
            then.status(200).json_body(json!({"expires_in": 3600}));
        })
        .await;

    let dispatcher = Dispatcher::new(config(&server)).unwrap();
    let err = dispatcher.authorize().await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
    assert!(dispatcher.is_expired());
}

#[tokio::test]
async fn authorize_returns_raw_payload() {
    let server = MockServer::start_async().await;
    mock_token(&server, "abc", 1200).await;

    let dispatcher = Dispatcher::new(config(&server)).unwrap();
    let payload = dispatcher.authorize().await.unwrap();
    assert_eq!(payload.token_type.as_deref(), Some("Bearer"));
    assert_eq!(payload.access_token.as_deref(), Some("abc"));
    assert_eq!(payload.expires_in, Some(1200));
    assert!(!dispatcher.is_expired());
    assert!(dispatcher.token_expires_at().is_some());
}

#[tokio::test]
async fn response_timeout_is_reported() {
    let server = MockServer::start_async().await;
    mock_token(&server, "abc", 3600).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(path("/wallets/w1"));
            then.status(200)
                .json_body(json!({"Id": "w1"}))
                .delay(Duration::from_secs(2));
        })
        .await;

    let cfg = config(&server).with_timeouts(Duration::from_secs(1), Duration::from_millis(300));
    let dispatcher = Dispatcher::new(cfg).unwrap();
    let err = dispatcher
        .call(Endpoint::WalletsGet, RequestOptions::new().id("w1"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout(_)), "got {:?}", err);
}
