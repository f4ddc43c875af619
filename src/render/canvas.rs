//! Antialiased drawing surface.
//!
//! A thin wrapper over a [`tiny_skia::Pixmap`] exposing the handful of
//! primitives the renderer needs: filled squares, filled and stroked circles,
//! bitmap blits and single pixels. Every pixel stays fully opaque, so the
//! export to an RGB image drops the alpha channel without loss.

use std::io::Cursor;

use image::{RgbImage, RgbaImage};
use tiny_skia::{
    FillRule, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform,
};

use crate::config::Color;
use crate::error::RenderError;

/// An opaque square-or-rectangular RGB canvas.
pub struct Canvas {
    pixmap: Pixmap,
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = true;
    paint
}

impl Canvas {
    /// Allocate a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, RenderError> {
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RenderError::RasterFailure(format!("cannot allocate {}x{} canvas", width, height))
        })?;
        pixmap.fill(tiny_skia::Color::from_rgba8(
            background.r,
            background.g,
            background.b,
            255,
        ));
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill an axis-aligned square with its top-left corner at `(x, y)`.
    pub fn fill_square(&mut self, x: u32, y: u32, side: u32, color: Color) {
        if let Some(rect) = Rect::from_xywh(x as f32, y as f32, side as f32, side as f32) {
            self.pixmap
                .fill_rect(rect, &paint(color), Transform::identity(), None);
        }
    }

    /// Fill a circle of radius `r` centred on `(cx, cy)`.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Color) {
        if let Some(path) = PathBuilder::from_circle(cx, cy, r) {
            self.pixmap.fill_path(
                &path,
                &paint(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    /// Stroke the outline of a circle with a pen `width` pixels wide.
    pub fn stroke_circle(&mut self, cx: f32, cy: f32, r: f32, width: f32, color: Color) {
        if let Some(path) = PathBuilder::from_circle(cx, cy, r) {
            let stroke = Stroke {
                width,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
        }
    }

    /// Composite an RGBA bitmap with its top-left corner at `(x, y)`.
    ///
    /// Transparent regions of the bitmap leave the canvas untouched.
    pub fn draw_bitmap(&mut self, bitmap: &RgbaImage, x: i32, y: i32) -> Result<(), RenderError> {
        let source = rgba_to_pixmap(bitmap)?;
        self.pixmap.draw_pixmap(
            x,
            y,
            source.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(())
    }

    /// Overwrite one pixel. Out-of-bounds coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return;
        }
        let idx = y as usize * self.width() as usize + x as usize;
        self.pixmap.pixels_mut()[idx] =
            tiny_skia::ColorU8::from_rgba(color.r, color.g, color.b, 255).premultiply();
    }

    /// Read one pixel back. `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        // tiny-skia only checks the flat index, so x past the row end wraps.
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Color::rgb(c.red(), c.green(), c.blue())
        })
    }

    /// Convert to an RGB image, dropping the (always opaque) alpha channel.
    pub fn into_rgb_image(self) -> Result<RgbImage, RenderError> {
        let (width, height) = (self.width(), self.height());
        let raw = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue()]
            })
            .collect();
        RgbImage::from_raw(width, height, raw).ok_or_else(|| {
            RenderError::RasterFailure(format!(
                "pixel buffer does not match a {}x{} image",
                width, height
            ))
        })
    }
}

/// Convert straight-alpha RGBA into a premultiplied pixmap.
fn rgba_to_pixmap(bitmap: &RgbaImage) -> Result<Pixmap, RenderError> {
    let size = IntSize::from_wh(bitmap.width(), bitmap.height())
        .ok_or_else(|| RenderError::RasterFailure("empty logo bitmap".to_string()))?;

    let data = bitmap
        .pixels()
        .flat_map(|p| {
            let c = tiny_skia::ColorU8::from_rgba(p[0], p[1], p[2], p[3]).premultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    Pixmap::from_vec(data, size)
        .ok_or_else(|| RenderError::RasterFailure("invalid logo bitmap".to_string()))
}

/// Losslessly encode an RGB image as PNG.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let mut png_bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)
        .map_err(|e| RenderError::RasterFailure(format!("PNG encoding failed: {}", e)))?;
    Ok(png_bytes)
}
