//! # quote-sheets-core
//!
//! In-memory sheet model shared by the quote-sheets crates.
//!
//! A [`Worksheet`] holds everything the template and quotation reports need
//! before they are serialized:
//! - [`CellValue`] - Cell values (numbers, strings, booleans, errors)
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`Style`] - Cell formatting (bold, fills, borders, alignment)
//! - [`DataValidation`] - Dropdown list constraints
//! - [`ConditionalFormatRule`] - Formula-driven highlight rules
//!
//! ## Example
//!
//! ```rust
//! use quote_sheets_core::{CellValue, Worksheet};
//!
//! let mut sheet = Worksheet::new("Quotation");
//!
//! sheet.set_cell_value("A1", "ITEM CODE").unwrap();
//! sheet.set_cell_value_at(1, 0, CellValue::string("P-100")).unwrap();
//! sheet.set_cell_value_at(1, 2, CellValue::Number(4.0)).unwrap();
//!
//! assert_eq!(sheet.get_value_at(1, 2).as_number(), Some(4.0));
//! ```

pub mod cell;
pub mod conditional_format;
pub mod error;
pub mod style;
pub mod validation;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellData, CellError, CellRange, CellValue, SharedString};
pub use conditional_format::ConditionalFormatRule;
pub use error::{Error, Result};
pub use style::{BorderLineStyle, Color, HorizontalAlignment, Style, VerticalAlignment};
pub use validation::{DataValidation, ValidationErrorStyle};
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
