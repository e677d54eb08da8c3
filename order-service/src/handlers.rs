//! HTTP handlers for the order service.
//!
//! Bodies are taken as `Result<Json<_>, JsonRejection>` so a malformed
//! request maps to the endpoint's own validation error instead of axum's
//! default rejection.

use crate::error::OrderServiceError;
use crate::router::AppState;
use crate::service::VerificationStatus;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use openroot_razorpay::Order;
use openroot_web::{CorrelationId, WebResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Liveness text served at `/`
pub const ROOT_TEXT: &str = "✅ Openroot Backend is Running";

/// Request body for `POST /create-order`
#[derive(Debug, Deserialize)]
pub struct CreateOrderBody {
    /// Amount in rupees (number or numeric string)
    #[serde(default)]
    pub amount: Option<Value>,
}

/// Request body for `POST /verify-payment`
///
/// Fields are taken as raw JSON so a non-string id still reaches signature
/// verification, see [`field_text`].
#[derive(Debug, Deserialize)]
pub struct VerifyPaymentBody {
    /// Order id returned by `create-order`
    #[serde(default)]
    pub razorpay_order_id: Option<Value>,
    /// Payment id from the hosted checkout
    #[serde(default)]
    pub razorpay_payment_id: Option<Value>,
    /// Signature from the hosted checkout
    #[serde(default)]
    pub razorpay_signature: Option<Value>,
}

/// Text a verification field signs as
///
/// Absent, `null`, `false` and `0` count as missing. Strings are used as
/// they are; any other value is signed as its JSON text, so `123` is
/// checked as `"123"` and normally ends as a signature mismatch.
#[must_use]
pub fn field_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON) => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Response body for a successful verification
#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    /// Always `success`; failures are rendered by the error path
    pub status: VerificationStatus,
}

/// `GET /`
#[allow(clippy::unused_async)]
pub async fn root() -> &'static str {
    ROOT_TEXT
}

/// `POST /create-order`
///
/// Relays the gateway's order object verbatim.
///
/// # Errors
///
/// `400 {"error":"Invalid amount"}` or `500 {"error":"Order creation failed"}`.
pub async fn create_order(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    body: Result<Json<CreateOrderBody>, JsonRejection>,
) -> WebResult<Json<Order>> {
    let Json(body) = body.map_err(|rejection| {
        tracing::warn!(
            correlation_id = %correlation_id.0,
            error = %rejection,
            "Unreadable create-order body"
        );
        OrderServiceError::InvalidAmount
    })?;

    let order = state.orders.create_order(body.amount.as_ref()).await?;
    tracing::debug!(correlation_id = %correlation_id.0, order_id = %order.id, "Relaying order");
    Ok(Json(order))
}

/// `POST /verify-payment`
///
/// # Errors
///
/// `400 {"status":"failed","reason":"Missing fields"}`,
/// `400 {"status":"failed"}` or `500 {"status":"error"}`.
pub async fn verify_payment(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    body: Result<Json<VerifyPaymentBody>, JsonRejection>,
) -> WebResult<Json<VerifyPaymentResponse>> {
    let Json(body) = body.map_err(|rejection| {
        tracing::warn!(
            correlation_id = %correlation_id.0,
            error = %rejection,
            "Unreadable verify-payment body"
        );
        OrderServiceError::MissingFields
    })?;

    let order_id = field_text(body.razorpay_order_id.as_ref());
    let payment_id = field_text(body.razorpay_payment_id.as_ref());
    let signature = field_text(body.razorpay_signature.as_ref());
    state.orders.verify_payment(
        order_id.as_deref(),
        payment_id.as_deref(),
        signature.as_deref(),
    )?;

    Ok(Json(VerifyPaymentResponse {
        status: VerificationStatus::Success,
    }))
}
