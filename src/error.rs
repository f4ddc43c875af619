//! # Error Types
//!
//! This module defines error types used throughout the verif-qr library.

use thiserror::Error;

use crate::reference::ReferenceError;

/// Failures of a single render call.
///
/// The first two variants are caused by the caller's input; the last two are
/// internal failures. Wrappers map them to HTTP 400 and 500 respectively
/// (see [`RenderError::is_client_error`]).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Empty reference, rejected before the encoder runs
    #[error("Invalid payload: reference must not be empty")]
    InvalidPayload,

    /// The payload does not fit in any QR version at error-correction level H
    #[error("Payload too large for a level-H QR code")]
    PayloadTooLarge,

    /// Any other encoder failure
    #[error("QR encoding failed: {0}")]
    EncodeFailure(String),

    /// Image library failure (allocation, PNG encoding)
    #[error("Raster failure: {0}")]
    RasterFailure(String),
}

impl RenderError {
    /// True when the failure was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidPayload | Self::PayloadTooLarge)
    }
}

/// Main error type for verif-qr operations
#[derive(Debug, Error)]
pub enum VerifQrError {
    /// Rendering failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Reference rejected by validation
    #[error("Invalid reference: {0}")]
    Reference(#[from] ReferenceError),

    /// Invalid startup configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// PDF assembly error
    #[error("PDF error: {0}")]
    Pdf(String),

    /// HTTP server error (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(RenderError::InvalidPayload.is_client_error());
        assert!(RenderError::PayloadTooLarge.is_client_error());
        assert!(!RenderError::EncodeFailure("x".into()).is_client_error());
        assert!(!RenderError::RasterFailure("x".into()).is_client_error());
    }

    #[test]
    fn test_render_error_converts() {
        let err: VerifQrError = RenderError::PayloadTooLarge.into();
        assert!(matches!(err, VerifQrError::Render(RenderError::PayloadTooLarge)));
        assert!(err.to_string().contains("too large"));
    }
}
