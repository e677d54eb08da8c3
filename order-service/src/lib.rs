//! # Openroot Order Service
//!
//! Stateless HTTP backend for course checkout. It is the only component that
//! holds the Razorpay key secret, and it does two things:
//!
//! 1. **Create order**: validate a rupee amount and mint a gateway order for
//!    it in paise.
//! 2. **Verify payment**: recompute the callback signature the hosted
//!    checkout produced and compare it in constant time.
//!
//! ## Example
//!
//! ```ignore
//! use openroot_order_service::{build_router, AppState, Config, OrderService};
//!
//! let config = Config::from_env()?;
//! let service = OrderService::from_config(&config)?;
//! let app = build_router(AppState::new(service));
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod service;

pub use config::{Config, ConfigError, OrderConfig, RazorpayConfig, ServerConfig};
pub use error::OrderServiceError;
pub use router::{build_router, AppState};
pub use service::{parse_amount, OrderService, VerificationStatus};
