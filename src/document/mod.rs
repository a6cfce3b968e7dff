//! Document handling.
//!
//! A [`Document`] is the uploaded PDF: name, size, raw bytes. The
//! [`pdf`] module turns those bytes into plain text for the QA pipeline.

mod pdf;

use std::path::Path;

use crate::error::ExtractError;

pub use pdf::PdfExtractor;

/// An uploaded document. Created on load, never mutated.
#[derive(Debug, Clone)]
pub struct Document {
    /// File name as presented to the user (no directory components).
    pub name: String,
    /// Size of the raw file in bytes.
    pub byte_size: usize,
    /// Raw file contents.
    pub data: Vec<u8>,
}

impl Document {
    /// Load a document from disk.
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            byte_size: data.len(),
            data,
        })
    }

    /// Build a document from in-memory bytes.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            byte_size: data.len(),
            data,
        }
    }

    /// File size in KiB, for display.
    pub fn size_kib(&self) -> f64 {
        self.byte_size as f64 / 1024.0
    }
}

/// Whether a path carries the `.pdf` extension (case-insensitive).
///
/// The single accepted input type; both the shell and one-shot mode
/// gate on this before reading the file.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}
