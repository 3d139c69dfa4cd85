//! Text extraction — turns an uploaded PDF or DOCX payload into plain text.
//!
//! Dispatch is driven by the filename extension (case-insensitive). The
//! format check happens before any bytes are parsed, so an unsupported upload
//! never reaches a parser.

pub mod docx;
pub mod pdf;

use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use crate::errors::{ExtractionCause, ScreenError};

/// A resume as handed over by the caller: filename plus raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolves the format from the filename extension.
    pub fn from_filename(filename: &str) -> Result<Self, ScreenError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            _ => Err(ScreenError::UnsupportedFormat {
                filename: filename.to_string(),
                extension,
            }),
        }
    }
}

/// Extracts trimmed plain text from an uploaded document.
pub fn extract_text(document: &UploadedDocument) -> Result<String, ScreenError> {
    let format = DocumentFormat::from_filename(&document.filename)?;
    debug!(
        filename = %document.filename,
        ?format,
        bytes = document.bytes.len(),
        "Extracting text"
    );

    let extracted = match format {
        DocumentFormat::Pdf => pdf::extract(&document.bytes),
        DocumentFormat::Docx => docx::extract(&document.bytes),
    };

    extracted.map_err(|cause: ExtractionCause| ScreenError::ExtractionFailed {
        filename: document.filename.clone(),
        cause,
    })
}
