//! # Razorpay Orders Client
//!
//! The slice of the Razorpay API the Openroot backend needs: minting orders
//! and checking the signature the hosted checkout attaches to a completed
//! payment.
//!
//! ## Example
//!
//! ```no_run
//! use openroot_razorpay::{CreateOrderRequest, KeySecret, RazorpayClient};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RazorpayClient::new(
//!         "rzp_test_key",
//!         KeySecret::new("secret"),
//!         openroot_razorpay::DEFAULT_API_URL,
//!         Duration::from_secs(10),
//!     )?;
//!
//!     let order = client
//!         .create_order(&CreateOrderRequest::new(176_900, "INR", "openroot_1735689600000"))
//!         .await?;
//!     println!("created {}", order.id);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod gateway;
pub mod signature;
pub mod types;

// Re-export main types for convenience
pub use client::{RazorpayClient, DEFAULT_API_URL};
pub use error::RazorpayError;
pub use gateway::{GatewayFuture, OrderGateway};
pub use signature::{KeySecret, SignatureError};
pub use types::{CreateOrderRequest, Order, PaymentCallback, DEFAULT_CURRENCY};
