//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur during XLSX reading/writing
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file could not be decoded as a workbook
    #[error("Read error: {0}")]
    Read(#[from] calamine::XlsxError),

    /// The workbook could not be encoded
    #[error("Write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// Requested sheet is not in the workbook
    #[error("Sheet '{wanted}' not found (available: {})", .available.join(", "))]
    SheetNotFound {
        wanted: String,
        available: Vec<String>,
    },

    /// Invalid file format
    #[error("Invalid XLSX format: {0}")]
    InvalidFormat(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] quote_sheets_core::Error),
}
