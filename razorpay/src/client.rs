//! Razorpay REST client

use crate::{
    error::RazorpayError,
    gateway::{GatewayFuture, OrderGateway},
    signature::KeySecret,
    types::{CreateOrderRequest, Order},
};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

/// Production API base URL
pub const DEFAULT_API_URL: &str = "https://api.razorpay.com/v1";

/// Razorpay API client
///
/// Authenticates with HTTP basic auth (`key_id:key_secret`). Every request is
/// bounded by the timeout given at construction.
#[derive(Clone)]
pub struct RazorpayClient {
    client: Client,
    key_id: String,
    key_secret: KeySecret,
    api_url: String,
}

impl RazorpayClient {
    /// Create a client against `api_url`
    ///
    /// # Errors
    ///
    /// Returns [`RazorpayError::ClientBuild`] if the underlying HTTP client
    /// cannot be initialised (e.g. TLS backend failure).
    pub fn new(
        key_id: impl Into<String>,
        key_secret: KeySecret,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RazorpayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RazorpayError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            key_id: key_id.into(),
            key_secret,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Public key id, safe to hand to browsers
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Create an order
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, timeouts, non-2xx responses or
    /// unparsable bodies.
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, RazorpayError> {
        tracing::debug!(
            amount = request.amount,
            currency = %request.currency,
            receipt = %request.receipt,
            "Creating Razorpay order"
        );

        let response = self
            .client
            .post(format!("{}/orders", self.api_url))
            .basic_auth(&self.key_id, Some(self.key_secret.expose()))
            .json(request)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let order = response
                    .json::<Order>()
                    .await
                    .map_err(|e| RazorpayError::ResponseParseFailed(e.to_string()))?;
                tracing::info!(order_id = %order.id, amount = order.amount, "Razorpay order created");
                Ok(order)
            },
            StatusCode::TOO_MANY_REQUESTS => Err(RazorpayError::RateLimited),
            StatusCode::UNAUTHORIZED => Err(RazorpayError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(RazorpayError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            },
        }
    }
}

impl fmt::Debug for RazorpayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RazorpayClient")
            .field("key_id", &self.key_id)
            .field("key_secret", &self.key_secret)
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl OrderGateway for RazorpayClient {
    fn create_order(&self, request: CreateOrderRequest) -> GatewayFuture<Order> {
        let client = self.clone();
        Box::pin(async move { RazorpayClient::create_order(&client, &request).await })
    }
}
