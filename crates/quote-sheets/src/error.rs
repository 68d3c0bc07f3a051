//! Error types for quote-sheets

use quote_sheets_xlsx::XlsxError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by template building and quotation processing
#[derive(Debug, Error)]
pub enum Error {
    /// A construction parameter is out of range (checked before any I/O)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The uploaded sheet does not have the template's shape
    #[error("Malformed upload: {0}")]
    MalformedUpload(String),

    /// A required base column is missing from the upload
    #[error("Malformed upload: required column '{0}' not found")]
    MissingColumn(String),

    /// Spreadsheet encoding/decoding failed
    #[error(transparent)]
    Xlsx(#[from] XlsxError),

    /// Sheet model error
    #[error(transparent)]
    Core(#[from] quote_sheets_core::Error),
}
