//! Axum integration shared by Openroot HTTP services.
//!
//! Handlers stay thin: they extract a request, call into a service, and map
//! the outcome to a response. This crate holds the pieces every service
//! needs around that:
//!
//! - [`AppError`]: error type rendering a status plus JSON body
//! - [`CorrelationId`] extractor and [`correlation_id_layer`] middleware
//! - [`catch_panic_layer`]: renders handler panics as a fixed JSON body
//! - [`handlers::health::healthz`]: liveness probe
//!
//! # Example
//!
//! ```ignore
//! use axum::{routing::{get, post}, Router};
//! use openroot_web::{catch_panic_layer, correlation_id_layer, handlers::health::healthz};
//!
//! let app = Router::new()
//!     .route("/healthz", get(healthz))
//!     .route(
//!         "/create-order",
//!         post(create_order).layer(catch_panic_layer(json!({"error": "Order creation failed"}))),
//!     )
//!     .layer(correlation_id_layer());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::CorrelationId;
pub use middleware::{
    catch_panic_layer, correlation_id_layer, JsonPanicResponse, CORRELATION_ID_HEADER,
};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
