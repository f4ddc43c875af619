//! Health checks.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

use super::super::state::AppState;
use super::ok;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

/// Handle GET /health.
pub async fn health() -> Response {
    ok(
        Health {
            status: "UP",
            service: "QR Code Generator API",
            version: env!("CARGO_PKG_VERSION"),
            description: "Boaz Housing QR Code Generator with custom styling",
        },
        "Service is healthy",
    )
}

/// Handle GET /images/health - plain-text status of the images directory.
pub async fn images(State(state): State<Arc<AppState>>) -> Response {
    let status = state.images.status();
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    let body = format!(
        "Image service: OK\nDirectory: {}\nExists: {}\nWritable: {}",
        status.path.display(),
        yes_no(status.exists),
        yes_no(status.writable)
    );
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}
