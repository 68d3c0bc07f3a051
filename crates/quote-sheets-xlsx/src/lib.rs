//! # quote-sheets-xlsx
//!
//! XLSX (Office Open XML) reader and writer for quote-sheets.
//!
//! Writing goes through `rust_xlsxwriter`, reading through `calamine`; this
//! crate maps both onto the [`quote_sheets_core`] model.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{XlsxError, XlsxResult};
pub use reader::{SheetGrid, XlsxReader};
pub use writer::XlsxWriter;

/// MIME type of the produced spreadsheet files
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
