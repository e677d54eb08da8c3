//! Wire types for the Razorpay orders API and checkout callback

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The only currency orders are minted in
pub const DEFAULT_CURRENCY: &str = "INR";

/// Body of `POST /orders`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateOrderRequest {
    /// Amount in minor units (paise)
    pub amount: u64,
    /// ISO currency code
    pub currency: String,
    /// Merchant receipt reference
    pub receipt: String,
}

impl CreateOrderRequest {
    /// Create an order request
    #[must_use]
    pub fn new(amount: u64, currency: impl Into<String>, receipt: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            receipt: receipt.into(),
        }
    }
}

/// An order as returned by the gateway
///
/// Fields other than the ones named here (`entity`, `receipt`, `status`,
/// `created_at`, ...) are kept in `extra` so the order can be relayed as-is,
/// explicit nulls included.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Gateway order id (`order_...`)
    pub id: String,
    /// Amount in minor units
    pub amount: u64,
    /// ISO currency code
    pub currency: String,
    /// Remaining gateway fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    /// Merchant receipt reference, when the gateway sent one
    #[must_use]
    pub fn receipt(&self) -> Option<&str> {
        self.extra.get("receipt").and_then(Value::as_str)
    }
}

/// Fields the hosted checkout hands back after a successful payment
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentCallback {
    /// Order the payment was made against
    pub razorpay_order_id: String,
    /// Gateway payment id (`pay_...`)
    pub razorpay_payment_id: String,
    /// Hex HMAC-SHA256 of `order_id|payment_id`
    pub razorpay_signature: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_keeps_unknown_gateway_fields() {
        let raw = json!({
            "id": "order_abc",
            "entity": "order",
            "amount": 176_900,
            "amount_paid": 0,
            "currency": "INR",
            "receipt": "openroot_1735689600000",
            "status": "created",
            "attempts": 0,
            "notes": [],
            "created_at": 1_735_689_600
        });

        let order: Order = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(order.id, "order_abc");
        assert_eq!(order.amount, 176_900);
        assert_eq!(order.extra.get("status"), Some(&json!("created")));
        assert_eq!(order.receipt(), Some("openroot_1735689600000"));

        assert_eq!(serde_json::to_value(&order).unwrap(), raw);
    }

    #[test]
    fn order_relays_null_receipt() {
        let raw = json!({"id": "order_1", "amount": 100, "currency": "INR", "receipt": null});
        let order: Order = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(order.receipt(), None);
        assert_eq!(serde_json::to_value(&order).unwrap(), raw);
    }

    #[test]
    fn order_without_receipt_stays_without() {
        let order: Order =
            serde_json::from_value(json!({"id": "order_1", "amount": 100, "currency": "INR"}))
                .unwrap();

        assert_eq!(order.receipt(), None);
        assert!(serde_json::to_value(&order).unwrap().get("receipt").is_none());
    }

    #[test]
    fn create_order_request_wire_shape() {
        let request = CreateOrderRequest::new(124_900, DEFAULT_CURRENCY, "openroot_42");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"amount": 124_900, "currency": "INR", "receipt": "openroot_42"})
        );
    }
}
