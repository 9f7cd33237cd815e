//! Bearer-token gate in front of the contact routes.

use axum::http::{header, StatusCode};
use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};
use serde_json::Value;

#[tokio::test]
async fn test_missing_token_returns_auth_001() {
    let ctx = TestContext::with_auth_tokens(&["secret-token"]);
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/contact-us").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["code"], "AUTH_001");
}

#[tokio::test]
async fn test_unknown_token_returns_auth_002() {
    let ctx = TestContext::with_auth_tokens(&["secret-token"]);
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/contact-us")
        .add_header(header::AUTHORIZATION, fixtures::bearer("guess"))
        .json(&fixtures::contact("website"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["code"], "AUTH_002");
    assert_eq!(ctx.stored_count(), 0);
}

#[tokio::test]
async fn test_valid_token_passes() {
    let ctx = TestContext::with_auth_tokens(&["secret-token", "other"]);
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/contact-us")
        .add_header(header::AUTHORIZATION, fixtures::bearer("other"))
        .json(&fixtures::contact("website"))
        .await;
    response.assert_status(StatusCode::CREATED);
}

/// Root and health routes stay open when tokens are configured.
#[tokio::test]
async fn test_health_routes_are_not_gated() {
    let ctx = TestContext::with_auth_tokens(&["secret-token"]);
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    server.get("/").await.assert_status_ok();
    server.get("/health/live").await.assert_status_ok();
}

#[tokio::test]
async fn test_no_tokens_leaves_routes_open() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    server.get("/contact-us/count").await.assert_status_ok();
}
