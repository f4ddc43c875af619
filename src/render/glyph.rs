//! Fallback logo text.
//!
//! Uses the Spleen 8×16 bitmap font, emboldened by smearing each glyph one
//! pixel to the right, which gives a 16 px bold sans rendering of short
//! strings such as "BH".

use spleen_font::{FONT_8X16, PSF2Font};

use super::canvas::Canvas;
use crate::config::Color;

/// Glyph cell width in pixels.
pub const CHAR_WIDTH: usize = 8;

/// Glyph cell height in pixels.
pub const CHAR_HEIGHT: usize = 16;

/// A rendered run of text as a 1-bit mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMask {
    pub width: usize,
    pub height: usize,
    /// Row-major, `true` = ink.
    pub data: Vec<bool>,
}

impl TextMask {
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.data[y * self.width + x]
    }

    pub fn ink_count(&self) -> usize {
        self.data.iter().filter(|&&on| on).count()
    }
}

/// Render `text` in bold 8×16 cells.
///
/// The mask is one pixel wider than the plain run to hold the bold smear.
/// Characters missing from the font are left blank.
pub fn render_bold(text: &str) -> TextMask {
    let chars: Vec<char> = text.chars().collect();
    let width = chars.len() * CHAR_WIDTH + 1;
    let height = CHAR_HEIGHT;
    let mut data = vec![false; width * height];

    let Ok(mut font) = PSF2Font::new(FONT_8X16) else {
        return TextMask { width, height, data };
    };

    for (i, ch) in chars.iter().enumerate() {
        let utf8 = ch.to_string();
        let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) else {
            continue;
        };
        let x0 = i * CHAR_WIDTH;
        for (row_y, row) in glyph.enumerate() {
            for (col_x, on) in row.enumerate() {
                if !on || row_y >= CHAR_HEIGHT || col_x >= CHAR_WIDTH {
                    continue;
                }
                let idx = row_y * width + x0 + col_x;
                data[idx] = true;
                data[idx + 1] = true;
            }
        }
    }

    TextMask {
        width,
        height,
        data,
    }
}

/// Draw bold `text` centred on `(cx, cy)`.
pub fn draw_centered(canvas: &mut Canvas, text: &str, cx: i32, cy: i32, color: Color) {
    let mask = render_bold(text);
    let left = cx - mask.width as i32 / 2;
    let top = cy - mask.height as i32 / 2;

    for y in 0..mask.height {
        for x in 0..mask.width {
            if mask.get(x, y) {
                canvas.set_pixel(left + x as i32, top + y as i32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bh_mask() {
        let mask = render_bold("BH");
        assert_eq!(mask.width, 17);
        assert_eq!(mask.height, 16);
        assert!(mask.ink_count() > 20, "BH should have visible ink");

        // Ink appears under both characters.
        let left = (0..8).any(|x| (0..16).any(|y| mask.get(x, y)));
        let right = (8..17).any(|x| (0..16).any(|y| mask.get(x, y)));
        assert!(left && right);
    }

    #[test]
    fn test_bold_is_heavier() {
        let mask = render_bold("H");
        // Every ink pixel's right neighbour is also ink somewhere in each row run,
        // so no row contains an isolated single-pixel stroke.
        for y in 0..mask.height {
            for x in 0..mask.width {
                if mask.get(x, y) {
                    let left = x > 0 && mask.get(x - 1, y);
                    let right = mask.get(x + 1, y);
                    assert!(left || right, "isolated pixel at ({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_space_is_blank() {
        assert_eq!(render_bold(" ").ink_count(), 0);
    }

    #[test]
    fn test_draw_centered() {
        let blue = Color::rgb(0x01, 0x40, 0xff);
        let mut canvas = Canvas::new(60, 60, Color::WHITE).unwrap();
        draw_centered(&mut canvas, "BH", 30, 30, blue);

        let mut ink = Vec::new();
        for y in 0..60 {
            for x in 0..60 {
                if canvas.pixel(x, y) == Some(blue) {
                    ink.push((x, y));
                }
            }
        }
        assert!(!ink.is_empty());
        // All ink stays inside the 17×16 box around the centre.
        assert!(ink.iter().all(|&(x, y)| (22..39).contains(&x) && (22..38).contains(&y)));
    }
}
