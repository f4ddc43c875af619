//! Rasterizer stage.
//!
//! Only dark modules are painted. Finder modules become solid squares in one
//! of three oranges by ring; data modules become blue dots of radius `B/3`
//! centred in their cell; logo-zone modules are left blank.

use super::canvas::Canvas;
use super::classify::{Role, classify};
use super::encode::ModuleMatrix;
use crate::config::{Color, Palette, RenderConfig};
use crate::error::RenderError;

/// Finder colour for a ring index.
pub fn finder_color(ring: u8, palette: &Palette) -> Color {
    match ring {
        0 | 1 => palette.orange_dark,
        2 => palette.orange_medium,
        _ => palette.orange_light,
    }
}

/// Paint `matrix` onto a fresh canvas of side `N·B + 2·M`.
pub fn rasterize(matrix: &ModuleMatrix, config: &RenderConfig) -> Result<Canvas, RenderError> {
    let n = matrix.size();
    let side = config.canvas_side(n);
    let box_size = config.box_size;
    let margin = config.border_size;
    let palette = &config.palette;

    let mut canvas = Canvas::new(side, side, palette.background)?;

    // Integer division matches the cell-centred dot geometry.
    let dot_radius = (box_size / 3) as f32;
    let half = box_size / 2;

    for row in 0..n {
        for col in 0..n {
            if !matrix.get(row, col) {
                continue;
            }

            let x = margin + col as u32 * box_size;
            let y = margin + row as u32 * box_size;

            match classify(row, col, n, config.logo_radius) {
                Role::Finder { ring } => {
                    canvas.fill_square(x, y, box_size, finder_color(ring, palette));
                }
                Role::Data => {
                    let cx = (x + half) as f32;
                    let cy = (y + half) as f32;
                    canvas.fill_circle(cx, cy, dot_radius, palette.primary_blue);
                }
                Role::Logo | Role::Quiet => {}
            }
        }
    }

    Ok(canvas)
}
