//! Reference identifier validation.
//!
//! References arrive from HTTP query strings or the command line. They are
//! checked against `^[A-Za-z0-9_-]+$`, capped at 50 characters and
//! upper-cased before they reach the renderer.

use std::fmt;

use thiserror::Error;

/// Longest accepted reference, in characters.
pub const MAX_REFERENCE_LEN: usize = 50;

/// Why a reference was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("The reference is required")]
    Blank,

    #[error("The reference must not exceed {max} characters (got {len})", max = MAX_REFERENCE_LEN)]
    TooLong { len: usize },

    #[error("The reference may only contain letters, digits, hyphens and underscores")]
    InvalidCharacters,
}

/// A validated, upper-cased reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference(String);

impl Reference {
    /// Trim, validate and normalise a raw reference.
    pub fn parse(raw: &str) -> Result<Self, ReferenceError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ReferenceError::Blank);
        }

        let len = trimmed.chars().count();
        if len > MAX_REFERENCE_LEN {
            return Err(ReferenceError::TooLong { len });
        }

        if !trimmed.chars().all(is_reference_char) {
            return Err(ReferenceError::InvalidCharacters);
        }

        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Reference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `[A-Za-z0-9_-]`
pub fn is_reference_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}
