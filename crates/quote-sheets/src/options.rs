//! Call parameters for template building and quotation processing

use crate::error::{Error, Result};
use quote_sheets_core::{MAX_COLS, MAX_ROWS};

/// Sheet name of the generated template (and of the expected upload)
pub const TEMPLATE_SHEET_NAME: &str = "Supplier Quotation";

/// Sheet name of the processed quotation report
pub const RESULT_SHEET_NAME: &str = "Quotation";

/// Default number of blank data-entry rows in a template
pub const DEFAULT_ROW_COUNT: u32 = 100;

/// Rows above the data in a template: title, supplier labels, UP/AVAILABLE
pub const TEMPLATE_HEADER_ROWS: u32 = 3;

/// Base columns preceding the supplier columns
pub const BASE_COLUMN_COUNT: u16 = 3;

/// Template parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateOptions {
    /// Number of supplier column pairs
    pub supplier_count: u32,
    /// Number of blank data-entry rows
    pub row_count: u32,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            supplier_count: 1,
            row_count: DEFAULT_ROW_COUNT,
        }
    }
}

impl TemplateOptions {
    /// Create template options
    pub fn new(supplier_count: u32, row_count: u32) -> Self {
        Self {
            supplier_count,
            row_count,
        }
    }

    /// Total number of columns the template will use
    pub fn column_count(&self) -> u64 {
        BASE_COLUMN_COUNT as u64 + 2 * self.supplier_count as u64
    }

    /// Total number of rows the template will use
    pub fn total_rows(&self) -> u64 {
        TEMPLATE_HEADER_ROWS as u64 + self.row_count as u64
    }

    /// Reject counts that cannot produce a well-formed sheet
    pub fn validate(&self) -> Result<()> {
        if self.supplier_count == 0 {
            return Err(Error::InvalidParameter(
                "supplier count must be at least 1".into(),
            ));
        }
        if self.row_count == 0 {
            return Err(Error::InvalidParameter("row count must be at least 1".into()));
        }
        if self.column_count() > MAX_COLS as u64 {
            return Err(Error::InvalidParameter(format!(
                "{} suppliers need {} columns (max {})",
                self.supplier_count,
                self.column_count(),
                MAX_COLS
            )));
        }
        if self.total_rows() > MAX_ROWS as u64 {
            return Err(Error::InvalidParameter(format!(
                "{} rows plus headers exceed the sheet limit of {}",
                self.row_count, MAX_ROWS
            )));
        }
        Ok(())
    }
}

/// Upload reading and report rendering parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Sheet to read from the upload
    pub sheet_name: String,
    /// 0-based row holding supplier labels and base column names
    pub group_header_row: usize,
    /// 0-based row holding the UP/AVAILABLE labels
    pub field_header_row: usize,
    /// Sheet name of the produced report
    pub result_sheet_name: String,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            sheet_name: TEMPLATE_SHEET_NAME.to_string(),
            group_header_row: 1,
            field_header_row: 2,
            result_sheet_name: RESULT_SHEET_NAME.to_string(),
        }
    }
}
