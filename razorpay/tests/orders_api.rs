//! HTTP-level tests for the orders client against a mock gateway

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use openroot_razorpay::{
    CreateOrderRequest, KeySecret, OrderGateway, RazorpayClient, RazorpayError,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// base64("rzp_test_key:testsecret")
const BASIC_AUTH: &str = "Basic cnpwX3Rlc3Rfa2V5OnRlc3RzZWNyZXQ=";

fn client_for(server: &MockServer, timeout: Duration) -> RazorpayClient {
    RazorpayClient::new(
        "rzp_test_key",
        KeySecret::new("testsecret"),
        format!("{}/v1", server.uri()),
        timeout,
    )
    .unwrap()
}

fn gateway_order() -> serde_json::Value {
    json!({
        "id": "order_abc",
        "entity": "order",
        "amount": 176_900,
        "amount_paid": 0,
        "amount_due": 176_900,
        "currency": "INR",
        "receipt": "openroot_1735689600000",
        "status": "created",
        "attempts": 0,
        "created_at": 1_735_689_600
    })
}

#[tokio::test]
async fn creates_order_with_basic_auth_and_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .and(header("authorization", BASIC_AUTH))
        .and(body_json(json!({
            "amount": 176_900,
            "currency": "INR",
            "receipt": "openroot_1735689600000"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gateway_order()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let order = client
        .create_order(&CreateOrderRequest::new(176_900, "INR", "openroot_1735689600000"))
        .await
        .unwrap();

    assert_eq!(order.id, "order_abc");
    assert_eq!(order.amount, 176_900);
    assert_eq!(serde_json::to_value(&order).unwrap(), gateway_order());
}

#[tokio::test]
async fn gateway_trait_delegates_to_client() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gateway_order()))
        .mount(&server)
        .await;

    let gateway: std::sync::Arc<dyn OrderGateway> =
        std::sync::Arc::new(client_for(&server, Duration::from_secs(5)));
    let order = gateway
        .create_order(CreateOrderRequest::new(176_900, "INR", "openroot_1"))
        .await
        .unwrap();

    assert_eq!(order.id, "order_abc");
}

#[tokio::test]
async fn maps_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"code": "BAD_REQUEST_ERROR", "description": "Authentication failed"}
        })))
        .mount(&server)
        .await;

    let result = client_for(&server, Duration::from_secs(5))
        .create_order(&CreateOrderRequest::new(100, "INR", "openroot_1"))
        .await;

    assert!(matches!(result, Err(RazorpayError::Unauthorized)));
}

#[tokio::test]
async fn maps_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = client_for(&server, Duration::from_secs(5))
        .create_order(&CreateOrderRequest::new(100, "INR", "openroot_1"))
        .await;

    assert!(matches!(result, Err(RazorpayError::RateLimited)));
}

#[tokio::test]
async fn maps_other_status_to_api_error_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("amount must be at least 100"))
        .mount(&server)
        .await;

    let result = client_for(&server, Duration::from_secs(5))
        .create_order(&CreateOrderRequest::new(1, "INR", "openroot_1"))
        .await;

    match result {
        Err(RazorpayError::ApiError { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "amount must be at least 100");
        },
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn success_without_order_shape_is_a_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let result = client_for(&server, Duration::from_secs(5))
        .create_order(&CreateOrderRequest::new(100, "INR", "openroot_1"))
        .await;

    assert!(matches!(result, Err(RazorpayError::ResponseParseFailed(_))));
}

#[tokio::test]
async fn slow_gateway_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gateway_order())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let result = client_for(&server, Duration::from_millis(50))
        .create_order(&CreateOrderRequest::new(100, "INR", "openroot_1"))
        .await;

    assert!(matches!(result, Err(RazorpayError::Timeout)));
}
