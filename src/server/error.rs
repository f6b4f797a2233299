//! REST API error responses.
//!
//! Every error renders as `{"error": {"code": ..., "message": ...}}` with a
//! status code chosen by error category.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::GatewayError;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code and message
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "BAD_REQUEST", "UPSTREAM_ERROR")
    pub code: &'static str,
    /// Human-readable error message
    pub message: String,
}

impl GatewayError {
    /// Status code and machine-readable code for this error.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::Request(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            GatewayError::Template(_) => (StatusCode::BAD_REQUEST, "TEMPLATE_ERROR"),
            GatewayError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            GatewayError::Remote(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();

        if status.is_server_error() {
            tracing::error!(code, "{}", self);
        } else {
            tracing::warn!(code, "{}", self);
        }

        let body = ApiErrorBody {
            code,
            message: self.to_string(),
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}
