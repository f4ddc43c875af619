//! Server state and configuration.

use std::path::PathBuf;

use crate::archive::ArtifactStore;
use crate::render::Renderer;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Directory receiving generated PNGs
    pub images_dir: PathBuf,
    /// Public prefix for image URLs (e.g., "http://localhost:8080/images")
    pub images_base_url: String,
    /// Directory receiving generated PDFs
    pub pdf_dir: PathBuf,
    /// Public prefix for PDF URLs (e.g., "http://localhost:8080/download")
    pub download_base_url: String,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub renderer: Renderer,
    pub images: ArtifactStore,
    pub pdfs: ArtifactStore,
}

impl AppState {
    pub fn new(config: ServerConfig, renderer: Renderer) -> Self {
        let images = ArtifactStore::new(config.images_dir.clone());
        let pdfs = ArtifactStore::new(config.pdf_dir.clone());
        Self {
            config,
            renderer,
            images,
            pdfs,
        }
    }

    /// Public URL of a generated image.
    pub fn image_url(&self, filename: &str) -> String {
        join_url(&self.config.images_base_url, filename)
    }

    /// Public URL of a generated PDF.
    pub fn download_url(&self, filename: &str) -> String {
        join_url(&self.config.download_base_url, filename)
    }
}

fn join_url(base: &str, filename: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), filename)
}
