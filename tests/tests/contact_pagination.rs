//! Pagination through `GET /contact-us/pagination`.

use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};
use serde_json::Value;

async fn seeded(n: usize) -> (TestContext, TestServer) {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    for body in fixtures::contacts(n) {
        server.post("/contact-us").json(&body).await;
    }
    (ctx, server)
}

fn topics(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["talkAbout"].as_str().map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_defaults_to_first_five() {
    let (_ctx, server) = seeded(7).await;

    let body: Value = server.get("/contact-us/pagination").await.json();
    assert_eq!(body["total"], 7);
    assert_eq!(body["message"], "Data obtained.");
    assert_eq!(
        topics(&body),
        vec!["topic 0", "topic 1", "topic 2", "topic 3", "topic 4"]
    );
}

#[tokio::test]
async fn test_second_page_holds_the_rest() {
    let (_ctx, server) = seeded(7).await;

    let body: Value = server
        .get("/contact-us/pagination")
        .add_query_param("page", 2)
        .add_query_param("row", 5)
        .await
        .json();
    assert_eq!(topics(&body), vec!["topic 5", "topic 6"]);
    assert_eq!(body["total"], 7);
}

#[tokio::test]
async fn test_page_past_end_is_empty() {
    let (ctx, server) = seeded(7).await;
    let counts_before = ctx.store.count_calls();

    let response = server
        .get("/contact-us/pagination")
        .add_query_param("page", 3)
        .add_query_param("row", 5)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(topics(&body).is_empty());
    assert_eq!(body["total"], 7);

    // The total comes from the store directly, once per request.
    assert_eq!(ctx.store.count_calls(), counts_before + 1);
}

#[tokio::test]
async fn test_pages_partition_the_records() {
    let (_ctx, server) = seeded(11).await;

    let mut seen = Vec::new();
    for page in 1..=4 {
        let body: Value = server
            .get("/contact-us/pagination")
            .add_query_param("page", page)
            .add_query_param("row", 3)
            .await
            .json();
        seen.extend(topics(&body));
    }

    let expected: Vec<String> = (0..11).map(|i| format!("topic {}", i)).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_junk_parameters_fall_back_to_defaults() {
    let (_ctx, server) = seeded(6).await;

    let body: Value = server
        .get("/contact-us/pagination")
        .add_query_param("page", "abc")
        .add_query_param("row", "0")
        .await
        .json();
    assert_eq!(topics(&body).len(), 5);
    assert_eq!(topics(&body)[0], "topic 0");
}
