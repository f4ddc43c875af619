//! # HTTP Server for QR Generation
//!
//! Exposes the renderer over HTTP and stores what it produces.
//!
//! ## Usage
//!
//! ```bash
//! verif-qr serve --listen 0.0.0.0:8080 --pdf-dir document-qr-code-generer
//! ```
//!
//! ## Routes
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /generate-qr?reference=` | PDF stored, JSON with its URL |
//! | `GET /generate-qr-image?reference=` | PNG stored, JSON with its URL and base64 |
//! | `GET /download/:filename` | Stored PDF |
//! | `GET /images/:filename` | Stored PNG |
//! | `GET /list-generated` | JSON list of stored PDFs |
//! | `GET /health` | JSON service status |
//! | `GET /images/health` | Plain-text images directory status |
//! | `GET /static/*` | Files from the static directory |

mod handlers;
mod state;

pub use handlers::ApiResponse;
pub use handlers::qr::{QrGenerationResult, QrImageResponse};
pub use state::{AppState, ServerConfig};

use axum::{Router, http::Method, routing::get};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::error::VerifQrError;
use crate::render::Renderer;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        // Generation
        .route("/generate-qr", get(handlers::qr::generate_pdf))
        .route("/generate-qr-image", get(handlers::qr::generate_image))
        // Artifacts
        .route("/download/:filename", get(handlers::files::download))
        .route("/images/health", get(handlers::health::images))
        .route("/images/:filename", get(handlers::files::image))
        .route("/list-generated", get(handlers::files::list_generated))
        // Health
        .route("/health", get(handlers::health::health))
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use verif_qr::{RenderConfig, Renderer};
/// use verif_qr::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), verif_qr::VerifQrError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     images_dir: "qr-images".into(),
///     images_base_url: "http://localhost:8080/images".to_string(),
///     pdf_dir: "document-qr-code-generer".into(),
///     download_base_url: "http://localhost:8080/download".to_string(),
///     static_dir: "static".into(),
/// };
///
/// serve(config, Renderer::new(RenderConfig::default())).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig, renderer: Renderer) -> Result<(), VerifQrError> {
    let state = Arc::new(AppState::new(config.clone(), renderer));
    let app = router(state);

    tracing::info!("QR generator listening on {}", config.listen_addr);
    tracing::info!(
        "Images in {}, PDFs in {}",
        config.images_dir.display(),
        config.pdf_dir.display()
    );

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            VerifQrError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| VerifQrError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
