//! Order creation and payment verification.

use crate::config::{Config, DEFAULT_RECEIPT_PREFIX};
use crate::error::OrderServiceError;
use openroot_core::environment::{Clock, SystemClock};
use openroot_razorpay::{
    CreateOrderRequest, KeySecret, Order, OrderGateway, RazorpayClient, RazorpayError,
    DEFAULT_CURRENCY,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Largest amount in minor units that survives a round trip through a JSON
/// number without losing precision.
pub const MAX_MINOR_UNITS: u64 = 1 << 53;

/// Outcome of a verification round-trip, as sent to the client
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Signature matched
    Success,
    /// Signature did not match or fields were missing
    Failed,
    /// The server could not complete verification
    Error,
}

/// Parse a client-supplied rupee amount into paise.
///
/// Accepts a JSON number or a numeric string. The result is rounded to the
/// nearest paisa and must be between 1 and 2^53.
///
/// # Errors
///
/// Returns [`OrderServiceError::InvalidAmount`] for anything else.
pub fn parse_amount(amount: Option<&Value>) -> Result<u64, OrderServiceError> {
    let major = match amount {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or(OrderServiceError::InvalidAmount)?;

    if !major.is_finite() || major <= 0.0 {
        return Err(OrderServiceError::InvalidAmount);
    }

    let minor = (major * 100.0).round();
    // Precision loss acceptable: 2^53 is exactly representable
    #[allow(clippy::cast_precision_loss)]
    let max = MAX_MINOR_UNITS as f64;
    if minor < 1.0 || minor > max {
        return Err(OrderServiceError::InvalidAmount);
    }

    // Range checked above
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(minor as u64)
}

/// The order service
///
/// Stateless apart from the immutable key secret. Shared across requests
/// behind an `Arc`.
pub struct OrderService {
    gateway: Arc<dyn OrderGateway>,
    key_secret: KeySecret,
    clock: Arc<dyn Clock>,
    receipt_prefix: String,
}

impl OrderService {
    /// Create a service over an arbitrary gateway and clock
    #[must_use]
    pub fn new(gateway: Arc<dyn OrderGateway>, key_secret: KeySecret, clock: Arc<dyn Clock>) -> Self {
        Self {
            gateway,
            key_secret,
            clock,
            receipt_prefix: DEFAULT_RECEIPT_PREFIX.to_string(),
        }
    }

    /// Create the production service: Razorpay client plus system clock
    ///
    /// # Errors
    ///
    /// Returns [`RazorpayError::ClientBuild`] if the HTTP client cannot be
    /// initialised.
    pub fn from_config(config: &Config) -> Result<Self, RazorpayError> {
        let client = RazorpayClient::new(
            config.razorpay.key_id.clone(),
            config.razorpay.key_secret.clone(),
            config.razorpay.api_url.clone(),
            config.razorpay.timeout,
        )?;

        Ok(Self::new(
            Arc::new(client),
            config.razorpay.key_secret.clone(),
            Arc::new(SystemClock),
        )
        .with_receipt_prefix(config.order.receipt_prefix.clone()))
    }

    /// Override the receipt prefix
    #[must_use]
    pub fn with_receipt_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.receipt_prefix = prefix.into();
        self
    }

    /// Receipt reference for an order minted now
    #[must_use]
    pub fn receipt(&self) -> String {
        format!("{}_{}", self.receipt_prefix, self.clock.now().timestamp_millis())
    }

    /// Mint a gateway order for `amount` rupees.
    ///
    /// # Errors
    ///
    /// - [`OrderServiceError::InvalidAmount`] before any gateway call
    /// - [`OrderServiceError::OrderCreationFailed`] if the gateway fails
    pub async fn create_order(&self, amount: Option<&Value>) -> Result<Order, OrderServiceError> {
        let minor = parse_amount(amount).inspect_err(|_| {
            tracing::warn!(amount = ?amount, "Rejected order: invalid amount");
            metrics::counter!("orders.rejected").increment(1);
        })?;

        let request = CreateOrderRequest::new(minor, DEFAULT_CURRENCY, self.receipt());
        tracing::info!(amount = minor, receipt = %request.receipt, "Creating order");

        match self.gateway.create_order(request).await {
            Ok(order) => {
                metrics::counter!("orders.created").increment(1);
                tracing::info!(order_id = %order.id, amount = order.amount, "Order created");
                Ok(order)
            },
            Err(error) => {
                metrics::counter!("orders.failed").increment(1);
                tracing::error!(%error, "Gateway order creation failed");
                Err(OrderServiceError::OrderCreationFailed(error))
            },
        }
    }

    /// Check the signature forwarded by the client.
    ///
    /// Pure: no I/O and no state, so identical inputs always give identical
    /// results.
    ///
    /// # Errors
    ///
    /// - [`OrderServiceError::MissingFields`] if any field is absent or empty
    /// - [`OrderServiceError::SignatureMismatch`] if the signature differs
    /// - [`OrderServiceError::Unexpected`] if the signature cannot be computed
    pub fn verify_payment(
        &self,
        order_id: Option<&str>,
        payment_id: Option<&str>,
        signature: Option<&str>,
    ) -> Result<(), OrderServiceError> {
        fn present(field: Option<&str>) -> Option<&str> {
            field.filter(|value| !value.is_empty())
        }

        let (Some(order_id), Some(payment_id), Some(signature)) =
            (present(order_id), present(payment_id), present(signature))
        else {
            tracing::warn!("Rejected verification: missing fields");
            metrics::counter!("payments.verified", "outcome" => "missing_fields").increment(1);
            return Err(OrderServiceError::MissingFields);
        };

        if self.key_secret.verify(order_id, payment_id, signature)? {
            metrics::counter!("payments.verified", "outcome" => "success").increment(1);
            tracing::info!(order_id, payment_id, "Payment verified");
            Ok(())
        } else {
            metrics::counter!("payments.verified", "outcome" => "mismatch").increment(1);
            tracing::warn!(order_id, payment_id, "Payment signature mismatch");
            Err(OrderServiceError::SignatureMismatch)
        }
    }
}

impl std::fmt::Debug for OrderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderService")
            .field("key_secret", &self.key_secret)
            .field("receipt_prefix", &self.receipt_prefix)
            .finish_non_exhaustive()
    }
}
