//! Validation behavior of create and update.

use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};
use serde_json::{json, Value};

fn error_paths(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["path"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Every failing field is reported, not just the first.
#[tokio::test]
async fn test_create_reports_all_errors() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/contact-us")
        .json(&json!({
            "talkAbout": "website",
            "requester": { "name": "Ada" }
        }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["status"], false);
    assert_eq!(body["code"], "VALID_002");
    assert_eq!(body["message"], "Invalid request data");

    let paths = error_paths(&body);
    for expected in ["timeFrame", "projectType", "budget", "description", "requester.email"] {
        assert!(paths.iter().any(|p| p == expected), "missing error for {}", expected);
    }
    assert!(!paths.iter().any(|p| p == "talkAbout"));
    assert_eq!(ctx.stored_count(), 0);
}

#[tokio::test]
async fn test_missing_requester_is_required() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let mut body = fixtures::contact("website");
    body.as_object_mut().unwrap().remove("requester");

    let response = server.post("/contact-us").json(&body).await;
    response.assert_status_bad_request();
    let err: Value = response.json();
    assert_eq!(error_paths(&err), vec!["requester".to_string()]);
    assert_eq!(err["data"][0]["type"], "required");
}

#[tokio::test]
async fn test_wrong_types_and_unknown_keys() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let mut body = fixtures::contact("website");
    body["budget"] = json!(10000);
    body["requester"]["email"] = json!("not-an-email");
    body["referrer"] = json!("ads");

    let response = server.post("/contact-us").json(&body).await;
    response.assert_status_bad_request();
    let err: Value = response.json();
    let paths = error_paths(&err);
    assert!(paths.contains(&"budget".to_string()));
    assert!(paths.contains(&"requester.email".to_string()));
    assert!(paths.contains(&"referrer".to_string()));
}

#[tokio::test]
async fn test_malformed_json_is_valid_001() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/contact-us")
        .content_type("application/json")
        .text("{ not json")
        .await;
    response.assert_status_bad_request();
    let err: Value = response.json();
    assert_eq!(err["code"], "VALID_001");
}

#[tokio::test]
async fn test_non_object_body_is_rejected() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.post("/contact-us").json(&json!([1, 2, 3])).await;
    response.assert_status_bad_request();
    assert_eq!(ctx.stored_count(), 0);
}

/// An update that would leave the record invalid is rejected and nothing changes.
#[tokio::test]
async fn test_update_validates_merged_document() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let created: Value = server
        .post("/contact-us")
        .json(&fixtures::contact("website"))
        .await
        .json();
    let id = created["data"]["_id"].as_str().unwrap().to_string();

    let response = server
        .put(&format!("/contact-us/{}", id))
        .json(&json!({ "requester": { "name": "No Email" } }))
        .await;
    response.assert_status_bad_request();
    let err: Value = response.json();
    assert_eq!(err["code"], "VALID_002");
    assert!(error_paths(&err).contains(&"requester.email".to_string()));

    let response = server
        .put(&format!("/contact-us/{}", id))
        .json(&json!({ "_id": uuid::Uuid::new_v4().to_string() }))
        .await;
    response.assert_status_bad_request();

    let fetched: Value = server.get(&format!("/contact-us/item/{}", id)).await.json();
    assert_eq!(fetched["data"]["requester"]["email"], "a@b.com");
}
