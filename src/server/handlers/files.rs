//! Serving and listing generated artifacts.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::archive::{ArtifactKind, ArtifactStore};

use super::super::state::AppState;
use super::{fail, ok};

/// Handle GET /download/:filename - serve a generated PDF inline.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Response {
    if !ArtifactKind::Pdf.is_valid_filename(&filename) {
        tracing::warn!("Rejected PDF filename {:?}", filename);
        return StatusCode::BAD_REQUEST.into_response();
    }

    let bytes = match read_artifact(&state.pdfs, &filename).await {
        Ok(bytes) => bytes,
        Err(status) => return status.into_response(),
    };

    tracing::info!("Serving {} ({} bytes)", filename, bytes.len());
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Handle GET /images/:filename - serve a generated PNG.
pub async fn image(State(state): State<Arc<AppState>>, Path(filename): Path<String>) -> Response {
    if !ArtifactKind::Image.is_valid_filename(&filename) {
        tracing::warn!("Rejected image filename {:?}", filename);
        return StatusCode::BAD_REQUEST.into_response();
    }

    let mime = mime_guess::from_path(&filename).first_or_octet_stream();
    if mime.essence_str() != "image/png" {
        tracing::warn!("Unsupported content type for {}: {}", filename, mime);
        return StatusCode::BAD_REQUEST.into_response();
    }

    let bytes = match read_artifact(&state.images, &filename).await {
        Ok(bytes) => bytes,
        Err(status) => return status.into_response(),
    };

    tracing::info!("Serving {} ({} bytes)", filename, bytes.len());
    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
        ],
        bytes,
    )
        .into_response()
}

/// Handle GET /list-generated - names of the stored PDFs.
pub async fn list_generated(State(state): State<Arc<AppState>>) -> Response {
    let store = state.pdfs.clone();
    let listed = tokio::task::spawn_blocking(move || store.list(ArtifactKind::Pdf.extension())).await;

    match listed {
        Ok(Ok(names)) => {
            let message = if names.is_empty() {
                "No generated files".to_string()
            } else {
                format!("{} file(s) found", names.len())
            };
            ok(names, message)
        }
        Ok(Err(e)) => {
            tracing::error!("Cannot list {}: {}", state.pdfs.dir().display(), e);
            fail(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to list generated files",
                Some(e.to_string()),
            )
        }
        Err(e) => fail(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to list generated files",
            Some(format!("Task error: {}", e)),
        ),
    }
}

async fn read_artifact(store: &ArtifactStore, filename: &str) -> Result<Vec<u8>, StatusCode> {
    let path = store.path_for(filename);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("File not found: {}", path.display());
            Err(StatusCode::NOT_FOUND)
        }
        Err(e) => {
            tracing::error!("Cannot read {}: {}", path.display(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
