//! Router-level tests for the order service endpoints.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use openroot_order_service::{build_router, AppState, OrderService};
use openroot_razorpay::KeySecret;
use openroot_testing::{test_clock, MockOrderGateway};
use openroot_web::CORRELATION_ID_HEADER;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const SECRET: &str = "testsecret";
const VALID_SIGNATURE: &str = "3dd5062c53f808ef094a994bb1e6be30c96d9d105a92a3e9d2bf1e23d040971a";

fn app(gateway: &MockOrderGateway) -> Router {
    let service = OrderService::new(
        Arc::new(gateway.clone()),
        KeySecret::new(SECRET),
        Arc::new(test_clock()),
    );
    build_router(AppState::new(service))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn root_reports_liveness_text() {
    let gateway = MockOrderGateway::new();
    let response = app(&gateway)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], "✅ Openroot Backend is Running".as_bytes());
}

#[tokio::test]
async fn healthz_reports_ok() {
    let gateway = MockOrderGateway::new();
    let response = app(&gateway)
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "OK" }));
}

#[tokio::test]
async fn create_order_relays_gateway_order_in_paise() {
    let gateway = MockOrderGateway::with_order_id("order_abc");
    let response = app(&gateway)
        .oneshot(post_json("/create-order", r#"{"amount":1769}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], "order_abc");
    assert_eq!(body["amount"], 176_900);
    assert_eq!(body["currency"], "INR");
    assert_eq!(body["receipt"], "openroot_1735689600000");
    assert_eq!(body["status"], "created");

    let requests = gateway.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount, 176_900);
}

#[tokio::test]
async fn create_order_accepts_numeric_string() {
    let gateway = MockOrderGateway::new();
    let response = app(&gateway)
        .oneshot(post_json("/create-order", r#"{"amount":"1249"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(gateway.requests()[0].amount, 124_900);
}

#[tokio::test]
async fn create_order_rejects_bad_amounts_without_calling_gateway() {
    for body in [
        r#"{"amount":0}"#,
        r#"{"amount":-5}"#,
        r#"{"amount":"abc"}"#,
        r#"{"amount":null}"#,
        r"{}",
        "not json",
    ] {
        let gateway = MockOrderGateway::new();
        let response = app(&gateway)
            .oneshot(post_json("/create-order", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(json_body(response).await, json!({ "error": "Invalid amount" }));
        assert_eq!(gateway.call_count(), 0, "body: {body}");
    }
}

#[tokio::test]
async fn create_order_gateway_failure_is_generic_500() {
    let gateway = MockOrderGateway::failing(401, "Authentication failed");
    let response = app(&gateway)
        .oneshot(post_json("/create-order", r#"{"amount":1769}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({ "error": "Order creation failed" }));
}

#[tokio::test]
async fn create_order_panic_is_rendered_as_generic_500() {
    let gateway = MockOrderGateway::panicking();
    let response = app(&gateway)
        .oneshot(post_json("/create-order", r#"{"amount":1769}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({ "error": "Order creation failed" }));
}

#[tokio::test]
async fn verify_payment_accepts_correct_signature() {
    let gateway = MockOrderGateway::new();
    let body = json!({
        "razorpay_order_id": "order_abc",
        "razorpay_payment_id": "pay_xyz",
        "razorpay_signature": VALID_SIGNATURE,
    });
    let response = app(&gateway)
        .oneshot(post_json("/verify-payment", &body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "success" }));
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn verify_payment_rejects_altered_signature() {
    let gateway = MockOrderGateway::new();
    let mut altered = VALID_SIGNATURE.to_string();
    altered.replace_range(0..1, "4");

    let body = json!({
        "razorpay_order_id": "order_abc",
        "razorpay_payment_id": "pay_xyz",
        "razorpay_signature": altered,
    });
    let response = app(&gateway)
        .oneshot(post_json("/verify-payment", &body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "status": "failed" }));
}

#[tokio::test]
async fn verify_payment_reports_missing_fields() {
    let cases = [
        json!({ "razorpay_payment_id": "pay_xyz", "razorpay_signature": VALID_SIGNATURE }),
        json!({ "razorpay_order_id": "order_abc", "razorpay_signature": VALID_SIGNATURE }),
        json!({ "razorpay_order_id": "order_abc", "razorpay_payment_id": "pay_xyz" }),
        json!({
            "razorpay_order_id": "",
            "razorpay_payment_id": "pay_xyz",
            "razorpay_signature": VALID_SIGNATURE,
        }),
    ];

    for body in cases {
        let gateway = MockOrderGateway::new();
        let response = app(&gateway)
            .oneshot(post_json("/verify-payment", &body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(
            json_body(response).await,
            json!({ "status": "failed", "reason": "Missing fields" })
        );
    }
}

#[tokio::test]
async fn verify_payment_numeric_id_is_checked_as_text() {
    let forged = json!({
        "razorpay_order_id": 123,
        "razorpay_payment_id": "pay_xyz",
        "razorpay_signature": VALID_SIGNATURE,
    });
    let response = app(&MockOrderGateway::new())
        .oneshot(post_json("/verify-payment", &forged.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "status": "failed" }));

    // HMAC of "123|pay_xyz"
    let signed = json!({
        "razorpay_order_id": 123,
        "razorpay_payment_id": "pay_xyz",
        "razorpay_signature": "0259ae143fd87a2be2eb2af9d3577c0ac4efe747da9b200c7fe0b49c9d6cf8fd",
    });
    let response = app(&MockOrderGateway::new())
        .oneshot(post_json("/verify-payment", &signed.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "success" }));
}

#[tokio::test]
async fn verify_payment_null_id_is_missing() {
    let body = json!({
        "razorpay_order_id": null,
        "razorpay_payment_id": "pay_xyz",
        "razorpay_signature": VALID_SIGNATURE,
    });
    let response = app(&MockOrderGateway::new())
        .oneshot(post_json("/verify-payment", &body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "status": "failed", "reason": "Missing fields" })
    );
}

#[tokio::test]
async fn verify_payment_unreadable_body_is_missing_fields() {
    let gateway = MockOrderGateway::new();
    let response = app(&gateway)
        .oneshot(post_json("/verify-payment", "{oops"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "status": "failed", "reason": "Missing fields" })
    );
}

#[tokio::test]
async fn correlation_id_is_echoed() {
    let gateway = MockOrderGateway::new();
    let id = "4f6c1d5e-0b8a-4c57-9d2e-3a1f0c9b7e42";
    let response = app(&gateway)
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .header(CORRELATION_ID_HEADER, id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(CORRELATION_ID_HEADER).unwrap().to_str().unwrap(),
        id
    );
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let gateway = MockOrderGateway::new();
    let response = app(&gateway)
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .header(header::ORIGIN, "https://openroot.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn error_bodies_never_echo_the_secret() {
    let gateway = MockOrderGateway::failing(500, format!("upstream saw {SECRET}"));
    let response = app(&gateway)
        .oneshot(post_json("/create-order", r#"{"amount":1769}"#))
        .await
        .unwrap();

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(!String::from_utf8_lossy(&bytes).contains(SECRET));
}
