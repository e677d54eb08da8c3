//! Error types for web handlers.
//!
//! Openroot clients read fixed JSON bodies (`{"error": ...}` for order
//! creation, `{"status": ...}` for verification), so an [`AppError`] carries
//! its whole response body rather than a message/code pair.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::fmt;

/// Application error type for web handlers.
///
/// # Examples
///
/// ```ignore
/// async fn handler() -> Result<Json<Order>, AppError> {
///     let order = service.create_order(amount).await.map_err(AppError::from)?;
///     Ok(Json(order))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error code (for logs)
    code: &'static str,
    /// Response body sent to the client
    body: Value,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create an error with an explicit response body.
    #[must_use]
    pub const fn new(status: StatusCode, code: &'static str, body: Value) -> Self {
        Self {
            status,
            code,
            body,
            source: None,
        }
    }

    /// Attach the underlying error (logged for 5xx responses, never sent).
    #[must_use]
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Create a 400 Bad Request error with body `{"error": message}`.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            json!({ "error": message.into() }),
        )
    }

    /// Create a 500 Internal Server Error with body `{"error": message}`.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR",
            json!({ "error": message.into() }),
        )
    }

    /// HTTP status of the response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Error code used in logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// JSON body sent to the client.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.body)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = self.code,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(status = %self.status, code = self.code, "Internal server error");
            }
        } else {
            tracing::debug!(status = %self.status, code = self.code, "Request rejected");
        }

        (self.status, Json(self.body)).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal("An internal error occurred").with_source(err)
    }
}
