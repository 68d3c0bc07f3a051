//! Common imports
//!
//! ```rust
//! use quote_sheets::prelude::*;
//! ```

pub use crate::{
    Availability, CellError, CellValue, ColumnMapping, DerivedTable, Error, Highlight,
    HighlightedCell, ProcessOptions, ProcessReport, ProcessedQuotation, QuotationProcessor,
    Result, SupplierList, TemplateBuilder, TemplateOptions, Worksheet, XlsxReader, XlsxWriter,
};
