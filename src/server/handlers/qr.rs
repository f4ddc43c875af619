//! QR generation handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    archive::ArtifactKind,
    error::VerifQrError,
    pdf,
    reference::{Reference, ReferenceError},
};

use super::super::state::AppState;
use super::{fail, ok};

/// Query string of the generation endpoints.
#[derive(Debug, Deserialize)]
pub struct ReferenceQuery {
    pub reference: Option<String>,
}

/// Result of `GET /generate-qr`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrGenerationResult {
    pub reference: String,
    pub pdf_url: String,
    pub file_name: String,
    pub file_path: String,
    pub file_size: u64,
}

/// Result of `GET /generate-qr-image`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrImageResponse {
    pub access_url: String,
    pub image_name: String,
    pub base64_image: String,
    pub reference: String,
    pub base64_size: usize,
}

/// Handle GET /generate-qr - render, wrap in a PDF and store it.
pub async fn generate_pdf(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReferenceQuery>,
) -> Response {
    let reference = match validate(query.reference.as_deref()) {
        Ok(reference) => reference,
        Err(response) => return response,
    };
    tracing::info!("PDF requested for reference {}", reference);

    let result = {
        let state = state.clone();
        let reference = reference.clone();
        tokio::task::spawn_blocking(move || create_pdf(&state, &reference)).await
    };

    match result {
        Ok(Ok(generated)) => ok(generated, "QR code PDF generated successfully"),
        Ok(Err(e)) => generation_failed(&reference, "Failed to generate the QR code", e),
        Err(e) => fail(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to generate the QR code",
            Some(format!("Task error: {}", e)),
        ),
    }
}

/// Handle GET /generate-qr-image - render, store the PNG and return it inline.
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReferenceQuery>,
) -> Response {
    let reference = match validate(query.reference.as_deref()) {
        Ok(reference) => reference,
        Err(response) => return response,
    };
    tracing::info!("Image requested for reference {}", reference);

    let result = {
        let state = state.clone();
        let reference = reference.clone();
        tokio::task::spawn_blocking(move || create_image(&state, &reference)).await
    };

    match result {
        Ok(Ok(generated)) => ok(generated, "QR code image generated successfully"),
        Ok(Err(e)) => generation_failed(&reference, "Failed to generate the QR code image", e),
        Err(e) => fail(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to generate the QR code image",
            Some(format!("Task error: {}", e)),
        ),
    }
}

/// Parse the `reference` parameter, or build the 400 response.
fn validate(raw: Option<&str>) -> Result<Reference, Response> {
    let Some(raw) = raw else {
        return Err(fail(
            StatusCode::BAD_REQUEST,
            "Missing required parameter 'reference'",
            None,
        ));
    };

    Reference::parse(raw).map_err(|e| {
        tracing::warn!("Rejected reference {:?}: {}", raw, e);
        let message = match e {
            ReferenceError::Blank => "Reference is required",
            ReferenceError::TooLong { .. } => "Reference must not exceed 50 characters",
            ReferenceError::InvalidCharacters => {
                "Reference may only contain letters, digits, hyphens and underscores"
            }
        };
        fail(StatusCode::BAD_REQUEST, message, Some(e.to_string()))
    })
}

fn generation_failed(reference: &Reference, message: &str, e: VerifQrError) -> Response {
    tracing::error!("Generation failed for reference {}: {}", reference, e);
    let status = match &e {
        VerifQrError::Reference(_) => StatusCode::BAD_REQUEST,
        VerifQrError::Render(render) if render.is_client_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    fail(status, message, Some(e.to_string()))
}

fn create_pdf(state: &AppState, reference: &Reference) -> Result<QrGenerationResult, VerifQrError> {
    let now = Local::now();
    let image = state.renderer.render_image(reference.as_str())?;
    let bytes = pdf::build_pdf(reference.as_str(), &image, &now.naive_local())?;

    let file_name = ArtifactKind::Pdf.filename(reference.as_str(), &now);
    let path = state.pdfs.save(&file_name, &bytes)?;

    tracing::info!("Generated {} ({} bytes)", file_name, bytes.len());
    Ok(QrGenerationResult {
        reference: reference.to_string(),
        pdf_url: state.download_url(&file_name),
        file_path: path.display().to_string(),
        file_size: bytes.len() as u64,
        file_name,
    })
}

fn create_image(state: &AppState, reference: &Reference) -> Result<QrImageResponse, VerifQrError> {
    let now = Local::now();
    let png = state.renderer.render_qr(reference.as_str())?;

    let image_name = ArtifactKind::Image.filename(reference.as_str(), &now);
    state.images.save(&image_name, &png)?;

    let base64_image = STANDARD.encode(&png);
    tracing::info!(
        "Generated {} (base64: {} chars)",
        image_name,
        base64_image.len()
    );
    Ok(QrImageResponse {
        access_url: state.image_url(&image_name),
        reference: reference.to_string(),
        base64_size: base64_image.len(),
        base64_image,
        image_name,
    })
}
