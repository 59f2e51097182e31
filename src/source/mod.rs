//! PLC source ingestion.
//!
//! Only the extensions the engine has parsers for are accepted. Anything else
//! is rejected here, before a run can start.

pub mod lines;

pub use lines::{resolve_line, split_lines};

use crate::error::IngestError;
use std::fs;
use std::path::Path;

/// Extensions the engine can parse (SCL, Structured Text, PLCopen XML, IL, AWL).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["scl", "st", "xml", "il", "awl"];

/// A loaded PLC source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    text: String,
}

impl SourceFile {
    /// Reads a file from disk. Invalid UTF-8 is replaced, not rejected.
    ///
    /// # Errors
    /// Returns `UnsupportedExtension` before touching the disk if the
    /// extension is not accepted, or `Io` if the read fails.
    pub fn read(path: &Path) -> Result<Self, IngestError> {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        check_extension(&name)?;

        let bytes = fs::read(path).map_err(|source| IngestError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        tracing::debug!(file = %name, bytes = bytes.len(), "loaded source file");

        Ok(Self { name, text })
    }

    /// Wraps text that was obtained elsewhere.
    ///
    /// # Errors
    /// Returns `UnsupportedExtension` if `name` has no accepted extension.
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Result<Self, IngestError> {
        let name = name.into();
        check_extension(&name)?;
        Ok(Self {
            name,
            text: text.into(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text of a 1-based line, if it exists.
    #[must_use]
    pub fn line(&self, line: Option<u32>) -> Option<&str> {
        resolve_line(&self.text, line)
    }
}

/// Returns true if the file name ends in an accepted extension (any case).
#[must_use]
pub fn is_supported(name: &str) -> bool {
    extension_of(name).is_some_and(|ext| {
        SUPPORTED_EXTENSIONS
            .iter()
            .any(|s| s.eq_ignore_ascii_case(ext))
    })
}

fn extension_of(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext).filter(|e| !e.is_empty())
}

fn check_extension(name: &str) -> Result<(), IngestError> {
    if is_supported(name) {
        Ok(())
    } else {
        Err(IngestError::UnsupportedExtension {
            name: name.to_string(),
        })
    }
}
