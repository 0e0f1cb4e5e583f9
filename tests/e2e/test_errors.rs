use crate::e2e::helpers;

use helpers::fake_upstream::UpstreamReply;
use helpers::{TestContext, TEST_API_KEY};
use hyper::{Method, StatusCode};
use serde_json::json;
use std::time::{Duration, Instant};
use test_context::test_context;

fn assert_credential_not_leaked(body_bytes: &[u8]) {
    let body = String::from_utf8_lossy(body_bytes);
    assert!(
        !body.contains(TEST_API_KEY),
        "Response body leaks the provider credential: {}",
        body
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_methods_other_than_post_and_options(ctx: &TestContext) {
    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        let response = ctx.client.send(method, "/").await.unwrap();

        response
            .assert_status(StatusCode::METHOD_NOT_ALLOWED)
            .assert_header("content-type", "application/json")
            .assert_json_body(&json!({ "error": "Method not allowed" }));
    }
    assert!(ctx.upstream.calls().is_empty());
}

#[tokio::test]
async fn it_should_refuse_every_post_when_api_key_is_missing() {
    let ctx = TestContext::without_api_key().await;

    for body in [r#"{"input":"Amen"}"#, "{}", "not json", ""] {
        let response = ctx.client.post_raw("/", body).await.unwrap();

        response
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
            .assert_json_body(&json!({ "error": "OpenAI API key not configured" }));
    }
    assert!(ctx.upstream.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_missing_input(ctx: &TestContext) {
    let response = ctx.client.post("/", &json!({})).await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_header("content-type", "application/json")
        .assert_json_body(&json!({ "error": "Missing or invalid 'input' field" }));
    assert!(ctx.upstream.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_non_string_input(ctx: &TestContext) {
    for body in [json!({ "input": 5 }), json!({ "input": null }), json!({ "input": ["a"] })] {
        let response = ctx.client.post("/", &body).await.unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_json_body(&json!({ "error": "Missing or invalid 'input' field" }));
    }
    assert!(ctx.upstream.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_input(ctx: &TestContext) {
    let response = ctx.client.post("/", &json!({ "input": "" })).await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_json_body(&json!({ "error": "Missing or invalid 'input' field" }));
}

#[tokio::test]
async fn it_should_let_the_provider_judge_wrongly_typed_options() {
    let upstream_body = r#"{"error":{"message":"Invalid type for 'voice'","type":"invalid_request_error"}}"#;
    let ctx = TestContext::with_upstream(UpstreamReply::Error {
        status: 400,
        body: upstream_body.to_string(),
    })
    .await;

    let response = ctx
        .client
        .post("/", &json!({ "input": "Amen", "voice": 7, "speed": "fast" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_header("content-type", "application/json");
    assert_eq!(String::from_utf8(response.body_bytes.clone()).unwrap(), upstream_body);

    let calls = ctx.upstream.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body["voice"], 7);
    assert_eq!(calls[0].body["speed"], "fast");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_malformed_json_as_internal_error(ctx: &TestContext) {
    let response = ctx.client.post_raw("/", "{\"input\": ").await.unwrap();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.body.as_ref().unwrap();
    assert_eq!(
        body.get("error").and_then(|v| v.as_str()),
        Some("Internal server error")
    );
    let details = body.get("details").and_then(|v| v.as_str()).unwrap_or("");
    assert!(!details.is_empty(), "Expected non-empty details");
    assert!(ctx.upstream.calls().is_empty());
}

#[tokio::test]
async fn it_should_relay_upstream_rate_limit_verbatim() {
    let ctx = TestContext::with_upstream(UpstreamReply::Error {
        status: 429,
        body: r#"{"error":"rate_limited"}"#.to_string(),
    })
    .await;

    let response = ctx
        .client
        .post("/", &json!({ "input": "Blessed are the peacemakers" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::TOO_MANY_REQUESTS)
        .assert_header("content-type", "application/json");
    assert_eq!(response.body_bytes, br#"{"error":"rate_limited"}"#.to_vec());
    assert_eq!(ctx.upstream.calls().len(), 1, "Upstream failures are not retried");
}

#[tokio::test]
async fn it_should_relay_upstream_validation_error_verbatim() {
    let upstream_body = r#"{"error":{"message":"Invalid voice 'bogus'","type":"invalid_request_error"}}"#;
    let ctx = TestContext::with_upstream(UpstreamReply::Error {
        status: 400,
        body: upstream_body.to_string(),
    })
    .await;

    let response = ctx
        .client
        .post("/", &json!({ "input": "Amen", "voice": "bogus" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(response.body_bytes.clone()).unwrap(), upstream_body);
}

#[tokio::test]
async fn it_should_report_unreachable_upstream_as_internal_error() {
    let ctx = TestContext::with_unreachable_upstream().await;

    let response = ctx
        .client
        .post("/", &json!({ "input": "Amen" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_header("access-control-allow-origin", "*");
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"].as_str().is_some_and(|d| !d.is_empty()));
    assert_credential_not_leaked(&response.body_bytes);
}

#[tokio::test]
async fn it_should_report_upstream_timeout_as_internal_error() {
    let ctx = TestContext::with_silent_upstream().await;

    let start = Instant::now();
    let response = ctx
        .client
        .post("/", &json!({ "input": "Wait for the Lord" }))
        .await
        .unwrap();
    let elapsed = start.elapsed();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"].as_str().is_some_and(|d| !d.is_empty()));
    assert_credential_not_leaked(&response.body_bytes);

    assert!(
        elapsed < Duration::from_secs(10),
        "Upstream timeout was not applied, request took {:?}",
        elapsed
    );
}
