use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by the screening pipeline itself.
///
/// Every per-document failure carries the offending filename so a caller
/// can attribute it without keeping its own bookkeeping.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("Unsupported file format '.{extension}' for '{filename}' (expected .pdf or .docx)")]
    UnsupportedFormat { filename: String, extension: String },

    #[error("Failed to extract text from '{filename}': {cause}")]
    ExtractionFailed {
        filename: String,
        #[source]
        cause: ExtractionCause,
    },

    #[error("Language resource '{resource}' is unavailable: {reason}")]
    Initialization { resource: String, reason: String },
}

impl ScreenError {
    /// The document this error belongs to, if it is a per-document error.
    pub fn filename(&self) -> Option<&str> {
        match self {
            ScreenError::UnsupportedFormat { filename, .. }
            | ScreenError::ExtractionFailed { filename, .. } => Some(filename),
            ScreenError::Initialization { .. } => None,
        }
    }
}

/// Underlying library failure behind an `ExtractionFailed`.
#[derive(Debug, Error)]
pub enum ExtractionCause {
    #[error("{0}")]
    Pdf(#[from] pdf_extract::OutputError),

    #[error("PDF parser panicked: {0}")]
    PdfPanic(String),

    #[error("DOCX archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("DOCX XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Screen(#[from] ScreenError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Screen(e @ ScreenError::UnsupportedFormat { .. }) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                e.to_string(),
            ),
            AppError::Screen(e @ ScreenError::ExtractionFailed { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_FAILED",
                e.to_string(),
            ),
            AppError::Screen(e @ ScreenError::Initialization { .. }) => {
                tracing::error!("Initialization error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INITIALIZATION_ERROR",
                    e.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
