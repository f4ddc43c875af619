//! Logo compositor.
//!
//! Draws the centred brand mark over the rasterized code: a white backing
//! disc, a thin stroked border in the data colour, then either the scaled
//! logo bitmap or the bold "BH" glyph when no bitmap is available.
//!
//! The bitmap is decoded once, when the [`Renderer`](super::Renderer) is
//! built, and shared read-only between renders.

use std::path::Path;
use std::sync::Arc;

use image::{RgbaImage, imageops::FilterType};

use super::canvas::Canvas;
use super::glyph;
use crate::config::{Color, Palette};
use crate::error::RenderError;

/// Backing disc radius used by the glyph fallback, in pixels.
pub const FALLBACK_RADIUS: u32 = 25;

/// How far the bitmap backing disc is pulled in from the scaled logo's
/// shorter half-side, in pixels.
pub const DISC_INSET: u32 = 25;

/// Text drawn when no logo bitmap is available.
pub const FALLBACK_TEXT: &str = "BH";

/// A decoded logo, pre-scaled to its display size.
#[derive(Debug, Clone)]
pub struct LogoBitmap {
    original_size: (u32, u32),
    scaled: Arc<RgbaImage>,
}

impl LogoBitmap {
    /// Decode a logo file and scale it to `display_size`.
    pub fn load(path: &Path, display_size: u32) -> Result<Self, RenderError> {
        let decoded = image::open(path).map_err(|e| {
            RenderError::RasterFailure(format!("cannot read logo {}: {}", path.display(), e))
        })?;
        Ok(Self::from_image(decoded.to_rgba8(), display_size))
    }

    /// Scale an already decoded logo to `display_size` with a smooth filter.
    pub fn from_image(image: RgbaImage, display_size: u32) -> Self {
        let original_size = image.dimensions();
        let (w, h) = scaled_size(original_size.0, original_size.1, display_size);
        let scaled = image::imageops::resize(&image, w, h, FilterType::Lanczos3);
        Self {
            original_size,
            scaled: Arc::new(scaled),
        }
    }

    pub fn original_size(&self) -> (u32, u32) {
        self.original_size
    }

    pub fn scaled_size(&self) -> (u32, u32) {
        self.scaled.dimensions()
    }

    /// Radius of the white backing disc for this logo.
    pub fn disc_radius(&self) -> u32 {
        let (w, h) = self.scaled_size();
        (w.min(h) / 2).saturating_sub(DISC_INSET)
    }
}

/// Scale `(width, height)` so the longer side equals `display_size`.
///
/// Integer arithmetic; the shorter side never drops below one pixel.
pub fn scaled_size(width: u32, height: u32, display_size: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (display_size, display_size);
    }
    if width > height {
        let h = (height as u64 * display_size as u64 / width as u64) as u32;
        (display_size, h.max(1))
    } else {
        let w = (width as u64 * display_size as u64 / height as u64) as u32;
        (w.max(1), display_size)
    }
}

/// Overlay the logo (or its fallback) centred on `(cx, cy)`.
///
/// Never fails: a bitmap that cannot be composited degrades to the glyph.
pub fn overlay_logo(
    canvas: &mut Canvas,
    cx: i32,
    cy: i32,
    palette: &Palette,
    logo: Option<&LogoBitmap>,
) {
    if let Some(logo) = logo {
        match draw_bitmap_logo(canvas, cx, cy, palette, logo) {
            Ok(()) => return,
            Err(e) => tracing::warn!("Logo overlay failed, using fallback glyph: {}", e),
        }
    }
    draw_fallback(canvas, cx, cy, palette.primary_blue, palette.background);
}

fn draw_bitmap_logo(
    canvas: &mut Canvas,
    cx: i32,
    cy: i32,
    palette: &Palette,
    logo: &LogoBitmap,
) -> Result<(), RenderError> {
    let radius = logo.disc_radius() as f32;
    let (w, h) = logo.scaled_size();

    canvas.fill_circle(cx as f32, cy as f32, radius, palette.background);
    canvas.stroke_circle(cx as f32, cy as f32, radius, 1.0, palette.primary_blue);
    canvas.draw_bitmap(&logo.scaled, cx - w as i32 / 2, cy - h as i32 / 2)?;

    tracing::debug!(
        "Logo composited ({}x{} -> {}x{}, disc radius {})",
        logo.original_size.0,
        logo.original_size.1,
        w,
        h,
        radius
    );
    Ok(())
}

/// White disc, 2 px ring and bold "BH".
pub fn draw_fallback(canvas: &mut Canvas, cx: i32, cy: i32, ink: Color, background: Color) {
    let radius = FALLBACK_RADIUS as f32;
    canvas.fill_circle(cx as f32, cy as f32, radius, background);
    canvas.stroke_circle(cx as f32, cy as f32, radius, 2.0, ink);
    glyph::draw_centered(canvas, FALLBACK_TEXT, cx, cy, ink);
}
