//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellData, CellRange, CellValue};
use crate::conditional_format::ConditionalFormatRule;
use crate::error::{Error, Result};
use crate::style::Style;
use crate::validation::DataValidation;
use crate::{MAX_COLS, MAX_ROWS, MAX_SHEET_NAME_LEN};

/// Default column width in characters (Excel's Calibri 11 default)
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.43;

/// A single worksheet
#[derive(Debug, Clone)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cells keyed by (row, col), row-major order
    cells: BTreeMap<(u32, u16), CellData>,
    /// Custom column widths in characters
    column_widths: BTreeMap<u16, f64>,
    /// Merged regions
    merged_regions: Vec<CellRange>,
    /// Data validations
    data_validations: Vec<DataValidation>,
    /// Conditional formatting rules
    conditional_formats: Vec<ConditionalFormatRule>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            column_widths: BTreeMap::new(),
            merged_regions: Vec::new(),
            data_validations: Vec::new(),
            conditional_formats: Vec::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    ///
    /// Excel rejects names that are empty, longer than 31 characters, or
    /// contain any of `[]:*?/\`.
    pub fn set_name<S: Into<String>>(&mut self, name: S) -> Result<()> {
        let name = name.into();
        if name.is_empty()
            || name.chars().count() > MAX_SHEET_NAME_LEN
            || name.contains(&['[', ']', ':', '*', '?', '/', '\\'][..])
        {
            return Err(Error::InvalidSheetName(name));
        }
        self.name = name;
        Ok(())
    }

    // === Cell Access ===

    /// Get cell data by address string
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr.row, addr.col))
    }

    /// Get cell data by row/column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(&(row, col))
    }

    /// Get cell value by address string
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get cell value by row/column indices
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cell_at(row, col)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    /// Get the direct style of a cell, if any
    pub fn cell_style_at(&self, row: u32, col: u16) -> Option<&Style> {
        self.cell_at(row, col).and_then(|c| c.style.as_ref())
    }

    /// Set cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set cell value by row/column indices, keeping any existing style
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.entry((row, col)).or_default().value = value.into();
        Ok(())
    }

    /// Set cell style by row/column indices, keeping any existing value
    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style: &Style) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.entry((row, col)).or_default().style = Some(style.clone());
        Ok(())
    }

    /// Set value and style of a cell in one step
    pub fn write_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
        style: &Style,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells
            .insert((row, col), CellData::styled(value.into(), style.clone()));
        Ok(())
    }

    /// Iterate over all stored cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter().map(|(&(row, col), data)| (row, col, data))
    }

    /// Number of stored cells (including styled blanks)
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    // === Range Operations ===

    /// Get the used range (bounds of all cells holding a value)
    pub fn used_range(&self) -> Option<CellRange> {
        Self::bounds(
            self.cells
                .iter()
                .filter(|(_, data)| !data.value.is_empty())
                .map(|(&key, _)| key),
        )
    }

    /// Get the sheet extent: bounds of all stored cells, styled blanks included
    ///
    /// This is what a spreadsheet application reports as the sheet dimension.
    pub fn extent(&self) -> Option<CellRange> {
        Self::bounds(self.cells.keys().copied())
    }

    /// Number of rows in the sheet extent
    pub fn row_count(&self) -> u32 {
        self.extent().map_or(0, |r| r.end.row + 1)
    }

    /// Number of columns in the sheet extent
    pub fn column_count(&self) -> u16 {
        self.extent().map_or(0, |r| r.end.col + 1)
    }

    fn bounds(keys: impl Iterator<Item = (u32, u16)>) -> Option<CellRange> {
        keys.fold(None, |acc: Option<(u32, u16, u32, u16)>, (row, col)| {
            Some(match acc {
                None => (row, col, row, col),
                Some((r0, c0, r1, c1)) => (r0.min(row), c0.min(col), r1.max(row), c1.max(col)),
            })
        })
        .map(|(r0, c0, r1, c1)| CellRange::from_indices(r0, c0, r1, c1))
    }

    // === Column Operations ===

    /// Get column width
    pub fn column_width(&self, col: u16) -> f64 {
        self.column_widths
            .get(&col)
            .copied()
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    /// Set column width
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    /// Set the same width for an inclusive span of columns
    pub fn set_column_range_width(&mut self, first_col: u16, last_col: u16, width: f64) {
        for col in first_col..=last_col {
            self.set_column_width(col, width);
        }
    }

    /// Get all custom column widths (column index → width in characters).
    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }

    // === Merged Cells ===

    /// Get merged regions
    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged_regions
    }

    /// Merge cells
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        self.validate_cell_position(range.end.row, range.end.col)?;
        if self.merged_regions.iter().any(|r| r.overlaps(range)) {
            return Err(Error::MergedCellConflict(range.to_string()));
        }
        self.merged_regions.push(*range);
        Ok(())
    }

    /// Find the merged region covering a cell
    pub fn merged_region_at(&self, row: u32, col: u16) -> Option<&CellRange> {
        self.merged_regions.iter().find(|r| r.contains(row, col))
    }

    // === Data Validation ===

    /// Add a data validation rule to this worksheet
    pub fn add_data_validation(&mut self, validation: DataValidation) {
        self.data_validations.push(validation);
    }

    /// Get all data validations
    pub fn data_validations(&self) -> &[DataValidation] {
        &self.data_validations
    }

    /// Find the data validation applying to a cell
    pub fn data_validation_at(&self, row: u32, col: u16) -> Option<&DataValidation> {
        self.data_validations
            .iter()
            .find(|v| v.applies_to(row, col))
    }

    /// Number of data validation rules
    pub fn data_validation_count(&self) -> usize {
        self.data_validations.len()
    }

    // === Conditional Formatting ===

    /// Add a conditional formatting rule to this worksheet
    pub fn add_conditional_format(&mut self, rule: ConditionalFormatRule) {
        self.conditional_formats.push(rule);
    }

    /// Get all conditional formatting rules
    pub fn conditional_formats(&self) -> &[ConditionalFormatRule] {
        &self.conditional_formats
    }

    /// Get the conditional formatting rules applying to a cell
    pub fn conditional_formats_at(&self, row: u32, col: u16) -> Vec<&ConditionalFormatRule> {
        self.conditional_formats
            .iter()
            .filter(|r| r.applies_to(row, col))
            .collect()
    }

    /// Number of conditional formatting rules
    pub fn conditional_format_count(&self) -> usize {
        self.conditional_formats.len()
    }

    fn validate_cell_position(&self, row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col as u32, MAX_COLS - 1));
        }
        Ok(())
    }
}
