//! # Verif-QR CLI
//!
//! Command-line interface for the verification QR generator.
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP service
//! verif-qr serve --listen 0.0.0.0:8080
//!
//! # Render one code to QR_ATT-DOCUMENT-001.png
//! verif-qr render att-document-001
//!
//! # Render to a chosen file and also lay it out as a PDF
//! verif-qr render ATT-DOCUMENT-001 --out qr.png --pdf qr.pdf
//!
//! # Every flag can come from the environment instead
//! QR_PRIMARY_BLUE=#0033cc QR_LOGO_PATH=logo.png verif-qr serve
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use verif_qr::{
    Reference, RenderConfig, Renderer, VerifQrError,
    config::{
        Color, DEFAULT_BASE_URL, DEFAULT_LOGO_PATH, DEFAULT_VERIFICATION_PATH, Palette,
    },
    logger, pdf,
    server::{self, ServerConfig},
};

/// Verif-QR - Styled verification QR code generator
#[derive(Parser, Debug)]
#[command(name = "verif-qr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[command(flatten)]
        render: RenderArgs,

        /// Address to listen on
        #[arg(long, env = "QR_LISTEN", default_value = "0.0.0.0:8080")]
        listen: String,

        /// Directory for generated PNG images
        #[arg(long, env = "QR_IMAGES_DIR", default_value = "qr-images")]
        images_dir: PathBuf,

        /// Public URL prefix of generated images
        #[arg(
            long,
            env = "QR_IMAGES_BASE_URL",
            default_value = "http://localhost:8080/images"
        )]
        images_base_url: String,

        /// Directory for generated PDFs
        #[arg(long, env = "QR_PDF_DIR", default_value = "document-qr-code-generer")]
        pdf_dir: PathBuf,

        /// Public URL prefix of generated PDFs
        #[arg(
            long,
            env = "QR_DOWNLOAD_BASE_URL",
            default_value = "http://localhost:8080/download"
        )]
        download_base_url: String,

        /// Directory served under /static
        #[arg(long, env = "QR_STATIC_DIR", default_value = "static")]
        static_dir: PathBuf,
    },

    /// Render one QR code to disk
    Render {
        /// Document reference (letters, digits, '-' and '_')
        reference: String,

        /// Output PNG file (defaults to QR_{REFERENCE}.png)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Also write a PDF page to this file
        #[arg(long, value_name = "FILE")]
        pdf: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },
}

/// Rendering options shared by all subcommands.
#[derive(Args, Debug)]
struct RenderArgs {
    /// Data dot colour
    #[arg(long, env = "QR_PRIMARY_BLUE", default_value = "#0140ff")]
    primary_blue: String,

    /// Finder colour for rings 0 and 1 (centre)
    #[arg(long, env = "QR_ORANGE_DARK", default_value = "#f88206")]
    orange_dark: String,

    /// Finder colour for ring 2
    #[arg(long, env = "QR_ORANGE_MEDIUM", default_value = "#fa9000")]
    orange_medium: String,

    /// Finder colour for ring 3 (outer border)
    #[arg(long, env = "QR_ORANGE_LIGHT", default_value = "#ffa94d")]
    orange_light: String,

    /// Canvas background colour
    #[arg(long, env = "QR_BACKGROUND", default_value = "#ffffff")]
    background: String,

    /// Verification site origin
    #[arg(long, env = "QR_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Verification page path
    #[arg(long, env = "QR_VERIFICATION_PATH", default_value = DEFAULT_VERIFICATION_PATH)]
    verification_path: String,

    /// Logo bitmap drawn at the centre
    #[arg(long = "logo", env = "QR_LOGO_PATH", default_value = DEFAULT_LOGO_PATH)]
    logo_path: PathBuf,
}

impl RenderArgs {
    /// Parse colours and assemble the render configuration.
    fn to_config(&self) -> Result<RenderConfig, VerifQrError> {
        let palette = Palette {
            primary_blue: Color::from_hex(&self.primary_blue)?,
            orange_dark: Color::from_hex(&self.orange_dark)?,
            orange_medium: Color::from_hex(&self.orange_medium)?,
            orange_light: Color::from_hex(&self.orange_light)?,
            background: Color::from_hex(&self.background)?,
        };
        Ok(RenderConfig {
            palette,
            base_url: self.base_url.clone(),
            verification_path: self.verification_path.clone(),
            logo_path: Some(self.logo_path.clone()),
            ..Default::default()
        })
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), VerifQrError> {
    let cli = Cli::parse();
    logger::try_init().map_err(|e| VerifQrError::Config(format!("logger: {}", e)))?;

    match cli.command {
        Commands::Serve {
            render,
            listen,
            images_dir,
            images_base_url,
            pdf_dir,
            download_base_url,
            static_dir,
        } => {
            let renderer = Renderer::new(render.to_config()?);
            let config = ServerConfig {
                listen_addr: listen,
                images_dir,
                images_base_url,
                pdf_dir,
                download_base_url,
                static_dir,
            };

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config, renderer))
        }
        Commands::Render {
            reference,
            out,
            pdf: pdf_out,
            render,
        } => {
            let reference = Reference::parse(&reference)?;
            let renderer = Renderer::new(render.to_config()?);

            let image = renderer.render_image(reference.as_str())?;
            let png = verif_qr::render::canvas::encode_png(&image)?;
            let out = out.unwrap_or_else(|| PathBuf::from(format!("QR_{}.png", reference)));
            std::fs::write(&out, &png)?;
            println!(
                "Wrote {} ({}x{}, {} bytes)",
                out.display(),
                image.width(),
                image.height(),
                png.len()
            );

            if let Some(pdf_out) = pdf_out {
                let now = chrono::Local::now().naive_local();
                let bytes = pdf::build_pdf(reference.as_str(), &image, &now)?;
                std::fs::write(&pdf_out, &bytes)?;
                println!("Wrote {} ({} bytes)", pdf_out.display(), bytes.len());
            }

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn flag_help(command: &clap::Command, id: &str) -> String {
        command
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .and_then(|arg| arg.get_help())
            .map(|help| help.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_finder_flags_name_their_rings() {
        let cli = Cli::command();
        let serve = cli.find_subcommand("serve").unwrap();
        assert!(flag_help(serve, "orange_dark").contains("rings 0 and 1"));
        assert!(flag_help(serve, "orange_medium").contains("ring 2"));
        assert!(flag_help(serve, "orange_light").contains("ring 3 (outer border)"));
    }

    #[test]
    fn test_flags_build_palette() {
        let cli = Cli::parse_from(["verif-qr", "render", "ATT-1", "--orange-light", "#000001"]);
        let Commands::Render { render, .. } = cli.command else {
            panic!("expected render");
        };
        let config = render.to_config().unwrap();
        assert_eq!(config.palette.orange_light, Color::rgb(0, 0, 1));
        assert_eq!(config.palette.orange_dark, Palette::default().orange_dark);
    }
}
