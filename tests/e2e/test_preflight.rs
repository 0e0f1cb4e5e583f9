use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_answer_preflight_with_cors_headers(ctx: &TestContext) {
    let response = ctx.client.options("/").await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("access-control-allow-origin", "*")
        .assert_header("access-control-allow-methods", "POST, OPTIONS")
        .assert_header(
            "access-control-allow-headers",
            "Content-Type, Authorization, apikey",
        );
    assert!(response.body_bytes.is_empty(), "Preflight body must be empty");
    assert!(ctx.upstream.calls().is_empty());
}

#[tokio::test]
async fn it_should_answer_preflight_without_api_key() {
    let ctx = TestContext::without_api_key().await;

    let response = ctx.client.options("/").await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("access-control-allow-methods", "POST, OPTIONS");
    assert!(response.body_bytes.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_answer_preflight_on_any_path(ctx: &TestContext) {
    for path in ["/", "/functions/v1/text-to-speech", "/a/b/c?x=1"] {
        let response = ctx.client.options(path).await.unwrap();
        response
            .assert_status(StatusCode::OK)
            .assert_header("access-control-allow-origin", "*");
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_responses(ctx: &TestContext) {
    let response = ctx.client.options("/").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = ctx
        .client
        .post(
            "/",
            &serde_json::json!({ "input": "Grace to you and peace" }),
        )
        .await
        .unwrap();
    response.assert_header_exists("x-request-id");
}
