//! Health check endpoints.
//!
//! Used by load balancers and uptime monitors to verify the process answers
//! HTTP. No dependency is checked.

use axum::Json;
use serde_json::{json, Value};

/// Liveness probe.
///
/// # Endpoint
///
/// ```text
/// GET /healthz
/// ```
///
/// # Response
///
/// ```json
/// { "status": "OK" }
/// ```
#[allow(clippy::unused_async)]
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}
