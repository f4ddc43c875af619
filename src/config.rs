//! # Render Configuration
//!
//! Immutable settings shared by every render call: the five-colour palette,
//! the verification URL pieces, the logo resource and the module geometry.
//!
//! ## Geometry
//!
//! | Constant | Value | Meaning |
//! |----------|-------|---------|
//! | `BOX_SIZE` | 10 px | side of one QR module |
//! | `BORDER_SIZE` | 40 px | white margin around the module grid |
//! | `LOGO_RADIUS` | 6 modules | half-side of the blanked logo zone |
//! | `LOGO_DISPLAY_SIZE` | 180 px | longer side of the scaled logo bitmap |
//!
//! ```text
//! side = modules * BOX_SIZE + 2 * BORDER_SIZE
//! ```
//!
//! ## Usage
//!
//! ```
//! use verif_qr::config::RenderConfig;
//!
//! let config = RenderConfig::default();
//! assert_eq!(
//!     config.payload("ATT-001"),
//!     "https://housing.boaz-study.tech/verif_doc?ref=ATT-001"
//! );
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::VerifQrError;

/// Module side in pixels.
pub const BOX_SIZE: u32 = 10;

/// Outer white margin in pixels (four modules).
pub const BORDER_SIZE: u32 = 40;

/// Half-side of the centred logo zone, in modules.
pub const LOGO_RADIUS: u32 = 6;

/// Longer side of the scaled logo bitmap, in pixels.
pub const LOGO_DISPLAY_SIZE: u32 = 180;

/// Default verification host.
pub const DEFAULT_BASE_URL: &str = "https://housing.boaz-study.tech";

/// Default verification path.
pub const DEFAULT_VERIFICATION_PATH: &str = "/verif_doc";

/// Default logo resource location.
pub const DEFAULT_LOGO_PATH: &str = "static/assets/logo-simplifier-bh.png";

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` string. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, VerifQrError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(VerifQrError::Config(format!(
                "Invalid hex colour '{}': expected #RRGGBB",
                hex
            )));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|e| {
                VerifQrError::Config(format!("Invalid hex colour '{}': {}", hex, e))
            })
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for Color {
    type Err = VerifQrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The fixed five-colour palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Data dots, logo border and fallback glyph
    pub primary_blue: Color,
    /// Finder rings 0 and 1 (centre)
    pub orange_dark: Color,
    /// Finder ring 2
    pub orange_medium: Color,
    /// Finder ring 3 (outer border)
    pub orange_light: Color,
    /// Canvas and logo backing disc
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary_blue: Color::rgb(0x01, 0x40, 0xff),
            orange_dark: Color::rgb(0xf8, 0x82, 0x06),
            orange_medium: Color::rgb(0xfa, 0x90, 0x00),
            orange_light: Color::rgb(0xff, 0xa9, 0x4d),
            background: Color::WHITE,
        }
    }
}

impl Palette {
    /// The four non-background colours, in drawing-role order.
    pub fn ink_colors(&self) -> [Color; 4] {
        [
            self.primary_blue,
            self.orange_dark,
            self.orange_medium,
            self.orange_light,
        ]
    }
}

/// Everything a render needs, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub palette: Palette,
    /// Verification host, e.g. `https://housing.boaz-study.tech`
    pub base_url: String,
    /// Verification path, e.g. `/verif_doc`
    pub verification_path: String,
    /// Logo bitmap location; `None` always uses the "BH" glyph
    pub logo_path: Option<PathBuf>,
    /// Module side in pixels
    pub box_size: u32,
    /// Outer margin in pixels
    pub border_size: u32,
    /// Half-side of the logo zone in modules
    pub logo_radius: u32,
    /// Longer side of the scaled logo in pixels
    pub logo_display_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            verification_path: DEFAULT_VERIFICATION_PATH.to_string(),
            logo_path: Some(PathBuf::from(DEFAULT_LOGO_PATH)),
            box_size: BOX_SIZE,
            border_size: BORDER_SIZE,
            logo_radius: LOGO_RADIUS,
            logo_display_size: LOGO_DISPLAY_SIZE,
        }
    }
}

impl RenderConfig {
    /// Build the exact string the QR code encodes.
    ///
    /// No URL encoding is applied; callers validate the reference first.
    pub fn payload(&self, reference: &str) -> String {
        format!(
            "{}{}?ref={}",
            self.base_url, self.verification_path, reference
        )
    }

    /// Canvas side in pixels for a matrix of `modules` × `modules`.
    pub fn canvas_side(&self, modules: usize) -> u32 {
        modules as u32 * self.box_size + 2 * self.border_size
    }
}
