//! # quote-sheets
//!
//! Supplier quotation templates and lowest-price comparison reports.
//!
//! A procurement round has two steps:
//!
//! - [`TemplateBuilder`] produces a blank "Supplier Quotation" sheet with a
//!   unit price (UP) and an AVAILABLE column per supplier
//! - [`QuotationProcessor`] reads the filled-in sheet back, adds per-supplier
//!   totals and a summary row, and highlights the cheapest offers and
//!   availability problems
//!
//! ## Example
//!
//! ```rust
//! use quote_sheets::prelude::*;
//! use std::io::Cursor;
//!
//! let template = TemplateBuilder::new(TemplateOptions::new(2, 10)).build().unwrap();
//! assert_eq!(template.name(), "Supplier Quotation");
//!
//! // ... the sheet is filled in by suppliers, then:
//! let mut filled = template;
//! filled.set_cell_value("A4", "BOLT-10").unwrap();
//! filled.set_cell_value("C4", 4.0).unwrap();
//! filled.set_cell_value("D4", 1.5).unwrap();
//! filled.set_cell_value("F4", 1.25).unwrap();
//! filled.set_cell_value("D2", "Acme").unwrap();
//! filled.set_cell_value("F2", "Globex").unwrap();
//!
//! let bytes = XlsxWriter::write_buffer(&[&filled]).unwrap();
//! let suppliers = SupplierList::parse("Acme, Globex");
//! let result = QuotationProcessor::new()
//!     .process_reader(Cursor::new(bytes), &suppliers)
//!     .unwrap();
//!
//! assert_eq!(result.table.summary_value("Globex_TOTAL"), Some(&CellValue::Number(5.0)));
//! ```

pub mod error;
pub mod header;
pub mod highlight;
pub mod options;
pub mod prelude;
pub mod processor;
pub mod suppliers;
pub mod table;
pub mod template;

use std::path::Path;

pub use error::{Error, Result};
pub use header::{ColumnMapping, HeaderKey, MappedColumn};
pub use highlight::{highlights, Highlight, HighlightRule, HighlightedCell};
pub use options::{ProcessOptions, TemplateOptions, RESULT_SHEET_NAME, TEMPLATE_SHEET_NAME};
pub use processor::{
    ProcessReport, ProcessedQuotation, QuotationProcessor, RawQuotation, SupplierCountMismatch,
};
pub use suppliers::SupplierList;
pub use table::{Availability, ColumnKind, DerivedTable, QuotationTable, RowKind};
pub use template::TemplateBuilder;

pub use quote_sheets_core::{CellError, CellValue, Worksheet};
pub use quote_sheets_xlsx::{SheetGrid, XlsxError, XlsxReader, XlsxWriter, XLSX_MIME_TYPE};

/// Build a template and write it to `path`
pub fn write_template<P: AsRef<Path>>(options: &TemplateOptions, path: P) -> Result<()> {
    TemplateBuilder::new(*options).write_file(path)
}

/// Process a filled-in template on disk with default options
pub fn process_file<P: AsRef<Path>>(
    path: P,
    suppliers: &SupplierList,
) -> Result<ProcessedQuotation> {
    QuotationProcessor::new().process_file(path, suppliers)
}
