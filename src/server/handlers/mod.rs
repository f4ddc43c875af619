//! HTTP handlers for the server.
//!
//! Every JSON endpoint answers with the same envelope:
//!
//! ```json
//! { "success": true, "message": "...", "data": { ... }, "timestamp": "2024-03-21T14:30:22" }
//! ```
//!
//! `data` is omitted on failure and `error` is omitted on success.

pub mod files;
pub mod health;
pub mod qr;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
            timestamp: now_iso(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error,
            timestamp: now_iso(),
        }
    }
}

fn now_iso() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.3f")
        .to_string()
}

/// `200 OK` with a success envelope.
pub fn ok<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data, message))).into_response()
}

/// Error envelope with the given status.
pub fn fail(status: StatusCode, message: impl Into<String>, error: Option<String>) -> Response {
    (status, Json(ApiResponse::error(message, error))).into_response()
}
