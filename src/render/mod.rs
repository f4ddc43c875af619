//! # Styled QR Renderer
//!
//! Turns a reference into a PNG of the verification QR code:
//!
//! ```text
//! reference ──► payload URL ──► encode ──► classify + rasterize ──► logo ──► PNG
//! ```
//!
//! ## Modules
//!
//! - [`encode`]: QR matrix at error-correction level H, no quiet zone
//! - [`classify`]: finder / logo / data roles per module position
//! - [`raster`]: orange finder squares and blue data dots
//! - [`logo`]: centred logo bitmap or "BH" fallback
//! - [`canvas`]: antialiased drawing surface and PNG export
//!
//! ## Usage Example
//!
//! ```no_run
//! use verif_qr::config::RenderConfig;
//! use verif_qr::render::Renderer;
//!
//! let renderer = Renderer::new(RenderConfig::default());
//! let png = renderer.render_qr("ATT-DOCUMENT-001")?;
//! std::fs::write("qr.png", png)?;
//! # Ok::<(), verif_qr::VerifQrError>(())
//! ```
//!
//! A [`Renderer`] holds no mutable state; share it behind an `Arc` and call it
//! from as many threads as needed.

pub mod canvas;
pub mod classify;
pub mod encode;
pub mod glyph;
pub mod logo;
pub mod raster;

use image::RgbImage;

use crate::config::{LOGO_RADIUS, RenderConfig};
use crate::error::RenderError;
use canvas::encode_png;
use classify::logo_zone_overlaps_finders;
use logo::LogoBitmap;

/// The configured renderer: immutable settings plus the decoded logo.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
    logo: Option<LogoBitmap>,
}

impl Renderer {
    /// Build a renderer, loading the logo bitmap once.
    ///
    /// A missing or unreadable logo is not an error: every render then uses
    /// the "BH" glyph.
    pub fn new(config: RenderConfig) -> Self {
        let logo = config.logo_path.as_deref().and_then(|path| {
            match LogoBitmap::load(path, config.logo_display_size) {
                Ok(logo) => {
                    let (w, h) = logo.original_size();
                    tracing::info!("Loaded logo {} ({}x{})", path.display(), w, h);
                    Some(logo)
                }
                Err(e) => {
                    tracing::warn!("Logo unavailable, using fallback glyph: {}", e);
                    None
                }
            }
        });
        Self { config, logo }
    }

    /// Build a renderer around an already decoded logo.
    pub fn with_logo(config: RenderConfig, logo: Option<LogoBitmap>) -> Self {
        Self { config, logo }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Whether a logo bitmap (rather than the glyph) will be drawn.
    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }

    /// Render the verification QR code for `reference` as PNG bytes.
    ///
    /// The reference is used as given; validate and normalise it with
    /// [`Reference::parse`](crate::reference::Reference::parse) first.
    pub fn render_qr(&self, reference: &str) -> Result<Vec<u8>, RenderError> {
        let image = self.render_image(reference)?;
        encode_png(&image)
    }

    /// Render the verification QR code for `reference` as an RGB image.
    pub fn render_image(&self, reference: &str) -> Result<RgbImage, RenderError> {
        if reference.is_empty() {
            return Err(RenderError::InvalidPayload);
        }
        let payload = self.config.payload(reference);
        tracing::debug!("Verification URL: {}", payload);
        self.render_payload(&payload)
    }

    /// Render an arbitrary payload string.
    pub fn render_payload(&self, payload: &str) -> Result<RgbImage, RenderError> {
        let matrix = encode::encode(payload)?;
        let n = matrix.size();

        debug_assert!(
            n < classify::MIN_CLEAR_SIDE
                || self.config.logo_radius > LOGO_RADIUS
                || !logo_zone_overlaps_finders(n, self.config.logo_radius),
            "logo zone overlaps finders at side {}",
            n
        );
        if logo_zone_overlaps_finders(n, self.config.logo_radius) {
            tracing::warn!(
                "Logo zone (radius {}) reaches the finder blocks of a {}x{} matrix",
                self.config.logo_radius,
                n,
                n
            );
        }

        let mut canvas = raster::rasterize(&matrix, &self.config)?;
        let center = (canvas.width() / 2) as i32;
        logo::overlay_logo(
            &mut canvas,
            center,
            center,
            &self.config.palette,
            self.logo.as_ref(),
        );

        tracing::debug!(
            "QR matrix {}x{} (version {}), image {}x{}",
            n,
            n,
            matrix.version(),
            canvas.width(),
            canvas.height()
        );

        canvas.into_rgb_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> Renderer {
        Renderer::with_logo(
            RenderConfig {
                logo_path: None,
                ..Default::default()
            },
            None,
        )
    }

    #[test]
    fn test_empty_reference_rejected() {
        assert_eq!(renderer().render_qr(""), Err(RenderError::InvalidPayload));
    }

    #[test]
    fn test_png_signature() {
        let png = renderer().render_qr("ATT-DOCUMENT-001").unwrap();
        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn test_missing_logo_path_falls_back() {
        let renderer = Renderer::new(RenderConfig {
            logo_path: Some("/definitely/not/here.png".into()),
            ..Default::default()
        });
        assert!(!renderer.has_logo());
        assert!(renderer.render_qr("A").is_ok());
    }

    #[test]
    fn test_oversized_payload() {
        let payload = "Z".repeat(3000);
        assert_eq!(
            renderer().render_payload(&payload),
            Err(RenderError::PayloadTooLarge)
        );
    }

    #[test]
    fn test_small_matrix_with_overlap_still_renders() {
        // Version 1: the logo zone reaches the finders, finder wins.
        let image = renderer().render_payload("A").unwrap();
        assert_eq!(image.width(), 21 * 10 + 80);
    }

    #[test]
    fn test_shortest_verification_url_is_clear_of_finders() {
        let renderer = renderer();
        let n = encode::encode(&renderer.config().payload("A")).unwrap().size();
        assert!(n >= classify::MIN_CLEAR_SIDE, "side {}", n);
        assert!(!logo_zone_overlaps_finders(n, LOGO_RADIUS));
    }
}
