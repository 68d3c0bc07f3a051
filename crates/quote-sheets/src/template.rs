//! Blank supplier-comparison templates.
//!
//! The template is a single "Supplier Quotation" sheet:
//!
//! | row | A               | B           | C   | D..                          |
//! |-----|-----------------|-------------|-----|------------------------------|
//! | 1   | QUOTATION NAME: |             |     | Suppliers (merged)           |
//! | 2   | ITEM CODE       | DESCRIPTION | QTY | Supplier 1 (merged pair) ... |
//! | 3   |                 |             |     | UP, AVAILABLE ...            |
//! | 4.. | data entry                                                      ||
//!
//! Every AVAILABLE data cell carries a YES / NO / NOT SURE dropdown.
//!
//! ## Example
//!
//! ```rust
//! use quote_sheets::{TemplateBuilder, TemplateOptions};
//!
//! let sheet = TemplateBuilder::new(TemplateOptions::new(2, 10)).build().unwrap();
//! assert_eq!(sheet.row_count(), 13);
//! assert_eq!(sheet.column_count(), 7);
//! ```

use std::path::Path;

use log::debug;
use quote_sheets_core::{
    BorderLineStyle, CellRange, DataValidation, HorizontalAlignment, Style,
    ValidationErrorStyle, VerticalAlignment, Worksheet,
};
use quote_sheets_xlsx::XlsxWriter;

use crate::error::Result;
use crate::options::{TemplateOptions, BASE_COLUMN_COUNT, TEMPLATE_HEADER_ROWS, TEMPLATE_SHEET_NAME};
use crate::table::{Availability, DESCRIPTION, ITEM_CODE, QTY};

/// Label in the top-left cell
pub const QUOTATION_NAME_LABEL: &str = "QUOTATION NAME:";
/// Label of the merged cell spanning all supplier columns
pub const SUPPLIERS_LABEL: &str = "Suppliers";
/// Second-level label of a supplier's price column
pub const UP_LABEL: &str = "UP";
/// Second-level label of a supplier's availability column
pub const AVAILABLE_LABEL: &str = "AVAILABLE";

const ITEM_CODE_WIDTH: f64 = 15.0;
const DESCRIPTION_WIDTH: f64 = 25.0;
const QTY_WIDTH: f64 = 10.0;
const SUPPLIER_WIDTH: f64 = 18.0;

const INPUT_MESSAGE: &str = "Choose: YES, NO, or NOT SURE";
const ERROR_TITLE: &str = "Invalid Input";
const ERROR_MESSAGE: &str = "Only YES, NO, or NOT SURE are allowed";

/// Placeholder label for the supplier at 0-based `index`
pub fn supplier_label(index: u32) -> String {
    format!("Supplier {}", index + 1)
}

/// Builds template worksheets
#[derive(Debug, Clone, Default)]
pub struct TemplateBuilder {
    options: TemplateOptions,
}

impl TemplateBuilder {
    pub fn new(options: TemplateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TemplateOptions {
        &self.options
    }

    /// Build the template sheet
    ///
    /// Fails with [`Error::InvalidParameter`](crate::Error::InvalidParameter)
    /// before touching any sheet when a count is zero or too large.
    pub fn build(&self) -> Result<Worksheet> {
        self.options.validate()?;

        let suppliers = self.options.supplier_count;
        let rows = self.options.row_count;
        // Both fit after validation.
        let last_col = (self.options.column_count() - 1) as u16;
        let first_data_row = TEMPLATE_HEADER_ROWS;
        let last_data_row = TEMPLATE_HEADER_ROWS + rows - 1;

        let header = header_style();
        let entry = Style::new().border(BorderLineStyle::Thin);
        let mut sheet = Worksheet::new(TEMPLATE_SHEET_NAME);

        // Row 1: quotation name label and the merged "Suppliers" banner
        let name_style = Style::new()
            .bold(true)
            .horizontal_alignment(HorizontalAlignment::Left)
            .vertical_alignment(VerticalAlignment::Center)
            .border(BorderLineStyle::Thin);
        sheet.write_at(0, 0, QUOTATION_NAME_LABEL, &name_style)?;
        sheet.write_at(0, BASE_COLUMN_COUNT, SUPPLIERS_LABEL, &header)?;
        for col in BASE_COLUMN_COUNT + 1..=last_col {
            sheet.set_cell_style_at(0, col, &header)?;
        }
        sheet.merge_cells(&CellRange::from_indices(0, BASE_COLUMN_COUNT, 0, last_col))?;

        // Rows 2-3: base headers, supplier labels, UP/AVAILABLE
        for (col, label) in [ITEM_CODE, DESCRIPTION, QTY].into_iter().enumerate() {
            sheet.write_at(1, col as u16, label, &header)?;
            sheet.set_cell_style_at(2, col as u16, &header)?;
        }

        let mut validation = DataValidation::list(Availability::ALL.iter().map(|a| a.as_str()))?
            .with_allow_blank(true)
            .with_input_message(INPUT_MESSAGE)
            .with_error_style(ValidationErrorStyle::Stop)
            .with_error_message(ERROR_TITLE, ERROR_MESSAGE);

        for index in 0..suppliers {
            let up_col = BASE_COLUMN_COUNT + (2 * index) as u16;
            let available_col = up_col + 1;

            sheet.write_at(1, up_col, supplier_label(index), &header)?;
            sheet.set_cell_style_at(1, available_col, &header)?;
            sheet.merge_cells(&CellRange::from_indices(1, up_col, 1, available_col))?;

            sheet.write_at(2, up_col, UP_LABEL, &header)?;
            sheet.write_at(2, available_col, AVAILABLE_LABEL, &header)?;

            validation = validation.with_range(CellRange::from_indices(
                first_data_row,
                available_col,
                last_data_row,
                available_col,
            ));
        }

        for row in first_data_row..=last_data_row {
            for col in 0..=last_col {
                sheet.set_cell_style_at(row, col, &entry)?;
            }
        }
        sheet.add_data_validation(validation);

        sheet.set_column_width(0, ITEM_CODE_WIDTH);
        sheet.set_column_width(1, DESCRIPTION_WIDTH);
        sheet.set_column_width(2, QTY_WIDTH);
        sheet.set_column_range_width(BASE_COLUMN_COUNT, last_col, SUPPLIER_WIDTH);

        debug!(
            "built template: {} suppliers, {} data rows, {} columns",
            suppliers,
            rows,
            last_col + 1
        );

        Ok(sheet)
    }

    /// Build and encode the template as XLSX bytes
    pub fn to_xlsx(&self) -> Result<Vec<u8>> {
        let sheet = self.build()?;
        Ok(XlsxWriter::write_buffer(&[&sheet])?)
    }

    /// Build and write the template to `path`
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let sheet = self.build()?;
        XlsxWriter::write_file(&[&sheet], path)?;
        Ok(())
    }
}

/// Bold, centered, thin-bordered header cell
pub(crate) fn header_style() -> Style {
    Style::new()
        .bold(true)
        .horizontal_alignment(HorizontalAlignment::Center)
        .vertical_alignment(VerticalAlignment::Center)
        .border(BorderLineStyle::Thin)
}
