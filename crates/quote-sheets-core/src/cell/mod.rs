//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")
//! - [`CellData`] - A cell's value together with its style

mod address;
mod value;

pub use address::{CellAddress, CellRange, CellRangeIterator};
pub use value::{CellError, CellValue, SharedString};

use crate::style::Style;

/// Complete cell data: value plus optional direct formatting
///
/// A cell with an [`CellValue::Empty`] value and a style is still part of the
/// sheet's extent; templates rely on this for their formatted data-entry rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellData {
    /// Cell value
    pub value: CellValue,
    /// Direct cell style, if any
    pub style: Option<Style>,
}

impl CellData {
    /// Create cell data holding only a value
    pub fn new(value: CellValue) -> Self {
        Self { value, style: None }
    }

    /// Create cell data with a value and a style
    pub fn styled(value: CellValue, style: Style) -> Self {
        Self {
            value,
            style: Some(style),
        }
    }
}
