//! Order gateway abstraction
//!
//! The order service depends on this trait rather than on
//! [`RazorpayClient`](crate::RazorpayClient) so tests can substitute a fake.

use crate::error::RazorpayError;
use crate::types::{CreateOrderRequest, Order};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by gateway operations
pub type GatewayFuture<T> = Pin<Box<dyn Future<Output = Result<T, RazorpayError>> + Send>>;

/// Payment gateway that can mint orders
pub trait OrderGateway: Send + Sync {
    /// Create an order for `request.amount` minor units
    ///
    /// # Errors
    ///
    /// Returns [`RazorpayError`] if the gateway rejects the request or cannot
    /// be reached.
    fn create_order(&self, request: CreateOrderRequest) -> GatewayFuture<Order>;
}
