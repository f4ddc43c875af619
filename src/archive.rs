//! # Artifact Archive
//!
//! Generated PDFs and PNGs are written to flat output directories under
//! timestamped names:
//!
//! | Kind | Pattern |
//! |------|---------|
//! | PDF | `QR_{ref}_{yyyyMMdd}_{HHmmss}.pdf` |
//! | PNG | `QR_IMG_{ref}_{yyyyMMdd}_{HHmmss}.png` |
//!
//! Names coming back in over HTTP are checked against the same patterns
//! before any filesystem access, which also rules out path traversal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::reference::is_reference_char;

/// Longest accepted image filename.
pub const MAX_IMAGE_FILENAME_LEN: usize = 100;

/// Kind of generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Pdf,
    Image,
}

impl ArtifactKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Pdf => "QR_",
            Self::Image => "QR_IMG_",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "png",
        }
    }

    /// Timestamped filename for `reference` generated at `at`.
    pub fn filename<Tz: TimeZone>(self, reference: &str, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        format!(
            "{}{}_{}.{}",
            self.prefix(),
            reference,
            at.format("%Y%m%d_%H%M%S"),
            self.extension()
        )
    }

    /// Check `name` against this kind's filename pattern.
    pub fn is_valid_filename(self, name: &str) -> bool {
        match self {
            Self::Pdf => matches_pattern(name, self.prefix(), ".pdf"),
            Self::Image => {
                name.len() <= MAX_IMAGE_FILENAME_LEN
                    && !name.contains("..")
                    && !name.contains('/')
                    && !name.contains('\\')
                    && matches_pattern(name, self.prefix(), ".png")
            }
        }
    }
}

/// `{prefix}[A-Za-z0-9_-]+_\d{8}_\d{6}{suffix}`
fn matches_pattern(name: &str, prefix: &str, suffix: &str) -> bool {
    let Some(body) = name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(suffix))
    else {
        return false;
    };

    // "_yyyyMMdd_HHmmss" is 16 ASCII bytes at the end of the body.
    const STAMP_LEN: usize = 16;
    if body.len() <= STAMP_LEN || !body.is_char_boundary(body.len() - STAMP_LEN) {
        return false;
    }
    let (reference, stamp) = body.split_at(body.len() - STAMP_LEN);
    let stamp = stamp.as_bytes();

    let stamp_ok = stamp[0] == b'_'
        && stamp[1..9].iter().all(u8::is_ascii_digit)
        && stamp[9] == b'_'
        && stamp[10..].iter().all(u8::is_ascii_digit);

    stamp_ok && !reference.is_empty() && reference.chars().all(is_reference_char)
}

/// A directory of generated artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

/// Directory status reported by health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    pub path: PathBuf,
    pub exists: bool,
    pub writable: bool,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of `filename` inside the store. The name is not validated.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Write `bytes` under `filename`, creating the directory if needed.
    pub fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
            tracing::info!("Created output directory {}", self.dir.display());
        }
        let path = self.path_for(filename);
        fs::write(&path, bytes)?;
        tracing::info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.path_for(filename).is_file()
    }

    /// Names of files with the given extension, sorted. A missing directory
    /// yields an empty list.
    pub fn list(&self, extension: &str) -> io::Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(extension)
                && let Some(name) = path.file_name().and_then(|n| n.to_str())
            {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn status(&self) -> StoreStatus {
        let metadata = fs::metadata(&self.dir).ok();
        StoreStatus {
            path: self.dir.clone(),
            exists: metadata.as_ref().is_some_and(|m| m.is_dir()),
            writable: metadata.is_some_and(|m| !m.permissions().readonly()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveDate};

    fn at() -> DateTime<Local> {
        let naive = NaiveDate::from_ymd_opt(2024, 3, 21)
            .unwrap()
            .and_hms_opt(14, 30, 22)
            .unwrap();
        Local.from_local_datetime(&naive).unwrap()
    }

    #[test]
    fn test_filenames() {
        assert_eq!(
            ArtifactKind::Pdf.filename("ATT-DOC-001", &at()),
            "QR_ATT-DOC-001_20240321_143022.pdf"
        );
        assert_eq!(
            ArtifactKind::Image.filename("ATT-DOC-001", &at()),
            "QR_IMG_ATT-DOC-001_20240321_143022.png"
        );
    }

    #[test]
    fn test_generated_names_validate() {
        for kind in [ArtifactKind::Pdf, ArtifactKind::Image] {
            let name = kind.filename("REF_1-A", &at());
            assert!(kind.is_valid_filename(&name), "{}", name);
        }
    }

    #[test]
    fn test_invalid_pdf_names() {
        let pdf = ArtifactKind::Pdf;
        assert!(!pdf.is_valid_filename("invalid-file.pdf"));
        assert!(!pdf.is_valid_filename("QR__20240101_120000.pdf"));
        assert!(!pdf.is_valid_filename("QR_ATT_2024010_120000.pdf"));
        assert!(!pdf.is_valid_filename("QR_ATT_20240101_120000.png"));
        assert!(!pdf.is_valid_filename("QR_A.B_20240101_120000.pdf"));
        assert!(!pdf.is_valid_filename("QR_ATT_2024O101_120000.pdf"));
        assert!(pdf.is_valid_filename("QR_ATT-TEST123_20240101_120000.pdf"));
    }

    #[test]
    fn test_invalid_image_names() {
        let img = ArtifactKind::Image;
        assert!(!img.is_valid_filename("QR_ATT_20240101_120000.png"));
        assert!(!img.is_valid_filename("QR_IMG_../../etc_20240101_120000.png"));
        assert!(!img.is_valid_filename("QR_IMG_A\\B_20240101_120000.png"));
        let long = format!("QR_IMG_{}_20240101_120000.png", "A".repeat(80));
        assert!(!img.is_valid_filename(&long));
        assert!(img.is_valid_filename("QR_IMG_ATT-DOCUMENT-001_20240321_143022.png"));
    }

    #[test]
    fn test_non_ascii_does_not_panic() {
        assert!(!ArtifactKind::Pdf.is_valid_filename("QR_é_20240101_12000é.pdf"));
        assert!(!ArtifactKind::Image.is_valid_filename("QR_IMG_ééééééééé.png"));
    }

    #[test]
    fn test_store_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path().join("out"));

        assert_eq!(store.list("pdf").unwrap(), Vec::<String>::new());
        assert!(!store.status().exists);

        store.save("QR_B_20240101_120000.pdf", b"%PDF-b").unwrap();
        store.save("QR_A_20240101_120000.pdf", b"%PDF-a").unwrap();
        store.save("QR_IMG_A_20240101_120000.png", b"png").unwrap();

        assert_eq!(
            store.list("pdf").unwrap(),
            vec![
                "QR_A_20240101_120000.pdf".to_string(),
                "QR_B_20240101_120000.pdf".to_string()
            ]
        );
        assert!(store.exists("QR_A_20240101_120000.pdf"));
        assert!(!store.exists("QR_C_20240101_120000.pdf"));

        let status = store.status();
        assert!(status.exists);
        assert!(status.writable);
    }
}
