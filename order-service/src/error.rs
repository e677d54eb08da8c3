//! Order service errors and their HTTP rendering.

use crate::service::VerificationStatus;
use axum::http::StatusCode;
use openroot_razorpay::{RazorpayError, SignatureError};
use openroot_web::AppError;
use serde_json::json;
use thiserror::Error;

/// Errors produced by [`OrderService`](crate::OrderService)
#[derive(Debug, Error)]
pub enum OrderServiceError {
    /// Amount absent, non-numeric, non-positive or out of range
    #[error("Invalid amount")]
    InvalidAmount,

    /// Gateway refused or failed to create the order
    #[error("Order creation failed: {0}")]
    OrderCreationFailed(#[source] RazorpayError),

    /// One of order id, payment id or signature is absent or empty
    #[error("Missing fields")]
    MissingFields,

    /// Forwarded signature differs from the expected one
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// Anything else; details stay in server logs
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] SignatureError),
}

impl From<OrderServiceError> for AppError {
    fn from(error: OrderServiceError) -> Self {
        match error {
            OrderServiceError::InvalidAmount => Self::bad_request("Invalid amount"),
            OrderServiceError::OrderCreationFailed(source) => {
                Self::internal("Order creation failed").with_source(source)
            },
            OrderServiceError::MissingFields => Self::new(
                StatusCode::BAD_REQUEST,
                "MISSING_FIELDS",
                json!({ "status": VerificationStatus::Failed, "reason": "Missing fields" }),
            ),
            OrderServiceError::SignatureMismatch => Self::new(
                StatusCode::BAD_REQUEST,
                "SIGNATURE_MISMATCH",
                json!({ "status": VerificationStatus::Failed }),
            ),
            OrderServiceError::Unexpected(source) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                json!({ "status": VerificationStatus::Error }),
            )
            .with_source(source),
        }
    }
}
