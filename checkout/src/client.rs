//! HTTP client for the order service

use crate::environment::{ApiFuture, OrderApi};
use crate::types::VerificationStatus;
use openroot_razorpay::{Order, PaymentCallback};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Default order service address for local development
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Errors talking to the order service
#[derive(Debug, Error)]
pub enum OrderApiError {
    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// No response arrived (connection refused, timeout, ...)
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Order service error (status {status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// `error` field of the body, or the raw body
        message: String,
    },

    /// Response had no usable order id
    #[error("Response did not contain an order id")]
    MissingOrderId,

    /// Response body was not the expected JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// [`OrderApi`] over HTTP
#[derive(Clone, Debug)]
pub struct HttpOrderApi {
    client: Client,
    base_url: String,
}

impl HttpOrderApi {
    /// Create a client for the service at `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`OrderApiError::ClientBuild`] if the HTTP client cannot be
    /// initialised.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, OrderApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OrderApiError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Service base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /create-order`
    ///
    /// # Errors
    ///
    /// Transport failures, non-2xx responses, bodies without an `id` and
    /// bodies that do not parse as an order.
    pub async fn create_order(&self, amount: u64) -> Result<Order, OrderApiError> {
        tracing::debug!(amount, "Requesting order");

        let response = self
            .client
            .post(format!("{}/create-order", self.base_url))
            .json(&json!({ "amount": amount }))
            .send()
            .await?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| OrderApiError::InvalidResponse(e.to_string()))?;

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map_or_else(|| body.to_string(), ToString::to_string);
            return Err(OrderApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let has_id = body
            .get("id")
            .and_then(Value::as_str)
            .is_some_and(|id| !id.is_empty());
        if !has_id {
            return Err(OrderApiError::MissingOrderId);
        }

        serde_json::from_value(body).map_err(|e| OrderApiError::InvalidResponse(e.to_string()))
    }

    /// `POST /verify-payment`
    ///
    /// Failed verifications come back as 4xx/5xx with a `status` body; any
    /// status other than `success` is reported as
    /// [`VerificationStatus::Failed`].
    ///
    /// # Errors
    ///
    /// Transport failures and bodies without a `status` field.
    pub async fn verify_payment(
        &self,
        callback: &PaymentCallback,
    ) -> Result<VerificationStatus, OrderApiError> {
        tracing::debug!(order_id = %callback.razorpay_order_id, "Requesting verification");

        let response = self
            .client
            .post(format!("{}/verify-payment", self.base_url))
            .json(callback)
            .send()
            .await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| OrderApiError::InvalidResponse(e.to_string()))?;

        match body.get("status").and_then(Value::as_str) {
            Some("success") => Ok(VerificationStatus::Success),
            Some(_) => Ok(VerificationStatus::Failed),
            None => Err(OrderApiError::InvalidResponse(format!(
                "missing status in {body}"
            ))),
        }
    }
}

impl OrderApi for HttpOrderApi {
    fn create_order(&self, amount: u64) -> ApiFuture<Order> {
        let api = self.clone();
        Box::pin(async move { HttpOrderApi::create_order(&api, amount).await })
    }

    fn verify_payment(&self, callback: PaymentCallback) -> ApiFuture<VerificationStatus> {
        let api = self.clone();
        Box::pin(async move { HttpOrderApi::verify_payment(&api, &callback).await })
    }
}
