//! # Verif-QR - Styled Verification QR Codes
//!
//! Verif-QR renders the branded QR codes printed on verified housing
//! documents. Each code points at the verification page for one document
//! reference and is drawn in the house style:
//!
//! - **Finder squares** in three shades of orange, one per concentric ring
//! - **Data modules** as round blue dots
//! - **Centre logo** on a white disc, or a bold "BH" mark when no logo is set
//!
//! Around the renderer sit a small HTTP service that stores the results as
//! PNG images or single-page PDFs, and a CLI.
//!
//! ## Quick Start
//!
//! ```no_run
//! use verif_qr::{Reference, RenderConfig, Renderer};
//!
//! let renderer = Renderer::new(RenderConfig::default());
//! let reference = Reference::parse(" att-document-001 ")?;
//! let png = renderer.render_qr(reference.as_str())?;
//! std::fs::write("QR_ATT-DOCUMENT-001.png", png)?;
//!
//! # Ok::<(), verif_qr::VerifQrError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`render`] | Encoder, classifier, rasterizer and logo compositor |
//! | [`config`] | Colours, palette and render geometry |
//! | [`reference`] | Document reference validation |
//! | [`archive`] | Timestamped artifact names and output directories |
//! | [`pdf`] | A4 PDF wrapper around a rendered code |
//! | [`server`] | HTTP API |
//! | [`logger`] | `tracing` subscriber setup |
//! | [`error`] | Error types |

pub mod archive;
pub mod config;
pub mod error;
pub mod logger;
pub mod pdf;
pub mod reference;
pub mod render;
pub mod server;

// Re-exports for convenience
pub use config::RenderConfig;
pub use error::{RenderError, VerifQrError};
pub use reference::Reference;
pub use render::Renderer;
