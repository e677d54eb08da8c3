//! Router construction.

use crate::handlers::{create_order, root, verify_payment};
use crate::service::OrderService;
use axum::{
    routing::{get, post},
    Router,
};
use openroot_web::{catch_panic_layer, correlation_id_layer, handlers::healthz};
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared handler state
#[derive(Clone, Debug)]
pub struct AppState {
    /// Order service shared by all requests
    pub orders: Arc<OrderService>,
}

impl AppState {
    /// Wrap a service for sharing across handlers
    #[must_use]
    pub fn new(orders: OrderService) -> Self {
        Self {
            orders: Arc::new(orders),
        }
    }
}

/// Build the application router.
///
/// Routes:
///
/// - `GET /` liveness text
/// - `GET /healthz` liveness JSON
/// - `POST /create-order`
/// - `POST /verify-payment`
///
/// A panic inside either POST handler is answered with that endpoint's
/// generic 500 body.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route(
            "/create-order",
            post(create_order).layer(catch_panic_layer(json!({ "error": "Order creation failed" }))),
        )
        .route(
            "/verify-payment",
            post(verify_payment).layer(catch_panic_layer(json!({ "status": "error" }))),
        )
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
