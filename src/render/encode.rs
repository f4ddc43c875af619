//! Encoder stage: payload string to module matrix.
//!
//! Uses the qrcode crate at error-correction level H. The matrix carries no
//! quiet zone; the rasterizer supplies its own white margin.

use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};

use crate::error::RenderError;

/// An N×N grid of QR modules, `true` = dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    size: usize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Build a matrix from row-major module data.
    ///
    /// Returns `None` if `modules.len() != size * size`.
    pub fn from_modules(size: usize, modules: Vec<bool>) -> Option<Self> {
        (modules.len() == size * size).then_some(Self { size, modules })
    }

    /// Number of modules per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Module at `row`, `col`. Out-of-range positions are light.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.modules[row * self.size + col]
    }

    /// QR version implied by the side length (`N = 4v + 17`).
    pub fn version(&self) -> usize {
        (self.size - 17) / 4
    }

    /// Count of dark modules.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }
}

/// Encode a payload at level H with no quiet zone.
pub fn encode(payload: &str) -> Result<ModuleMatrix, RenderError> {
    if payload.is_empty() {
        return Err(RenderError::InvalidPayload);
    }

    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
        .map_err(|e| match e {
            QrError::DataTooLong => RenderError::PayloadTooLarge,
            other => RenderError::EncodeFailure(other.to_string()),
        })?;

    let size = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == Color::Dark)
        .collect();

    ModuleMatrix::from_modules(size, modules).ok_or_else(|| {
        RenderError::EncodeFailure(format!("encoder returned a malformed {}x{} matrix", size, size))
    })
}
