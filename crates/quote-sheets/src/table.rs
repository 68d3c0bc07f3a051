//! Tabular quotation data and the processed report table.

use std::collections::BTreeSet;
use std::fmt;

use quote_sheets_core::{CellValue, Worksheet};

use crate::error::Result;
use crate::highlight::{self, HighlightedCell};
use crate::template::header_style;

/// Item code base column
pub const ITEM_CODE: &str = "ITEM CODE";
/// Description base column
pub const DESCRIPTION: &str = "DESCRIPTION";
/// Quantity base column
pub const QTY: &str = "QTY";
/// Item-code label of the summary row
pub const TOTAL_QUOTE_LABEL: &str = "TOTAL_QUOTE";

pub const UP_SUFFIX: &str = "_UP";
pub const AVAILABLE_SUFFIX: &str = "_AVAILABLE";
pub const TOTAL_SUFFIX: &str = "_TOTAL";

/// Canonical unit-price column name of a supplier
pub fn up_column(supplier: &str) -> String {
    format!("{}{}", supplier, UP_SUFFIX)
}

/// Canonical availability column name of a supplier
pub fn available_column(supplier: &str) -> String {
    format!("{}{}", supplier, AVAILABLE_SUFFIX)
}

/// Canonical total column name of a supplier
pub fn total_column(supplier: &str) -> String {
    format!("{}{}", supplier, TOTAL_SUFFIX)
}

/// Availability answer entered in the template dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    Yes,
    No,
    NotSure,
}

impl Availability {
    /// All answers, in dropdown order
    pub const ALL: [Availability; 3] = [Availability::Yes, Availability::No, Availability::NotSure];

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Yes => "YES",
            Availability::No => "NO",
            Availability::NotSure => "NOT SURE",
        }
    }

    /// Parse an answer, ignoring ASCII case like a spreadsheet `=` comparison
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
    }

    /// The answer held by a cell, if any
    pub fn from_cell(value: &CellValue) -> Option<Self> {
        value.as_string().and_then(Self::parse)
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a column, derived from its canonical name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// ITEM CODE, DESCRIPTION or QTY
    Base,
    UnitPrice,
    Availability,
    Total,
    /// Anything else (unmatched supplier columns, extra columns)
    Other,
}

impl ColumnKind {
    pub fn of(name: &str) -> Self {
        if [ITEM_CODE, DESCRIPTION, QTY].contains(&name) {
            ColumnKind::Base
        } else if name.ends_with(UP_SUFFIX) {
            ColumnKind::UnitPrice
        } else if name.ends_with(AVAILABLE_SUFFIX) {
            ColumnKind::Availability
        } else if name.ends_with(TOTAL_SUFFIX) {
            ColumnKind::Total
        } else {
            ColumnKind::Other
        }
    }
}

/// Named columns over rows of cell values; every row is as wide as `columns`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuotationTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl QuotationTable {
    /// Create a table, padding or truncating rows to the column count
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut table = Self {
            columns,
            rows: Vec::with_capacity(rows.len()),
        };
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Index of the first column named `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of the first column whose name matches `name` ignoring case
    pub fn position_ignore_case(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.eq_ignore_ascii_case(name))
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Value at `row` in the column named `column`
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.position(column).and_then(|col| self.get(row, col))
    }

    /// All values of a column, top to bottom
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().map(move |row| &row[col])
    }

    /// Insert a column at `index`; `values` are padded with blanks
    pub fn insert_column(&mut self, index: usize, name: impl Into<String>, values: Vec<CellValue>) {
        let index = index.min(self.columns.len());
        self.columns.insert(index, name.into());
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row.insert(index, values.next().unwrap_or_default());
        }
    }

    /// Append a row, padded or truncated to the column count
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(row);
    }
}

/// Position of a row in a [`DerivedTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Data,
    Blank,
    Summary,
}

/// Processed quotation: data rows, one blank separator row, one summary row
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedTable {
    table: QuotationTable,
    data_rows: usize,
    suppliers: Vec<String>,
}

impl DerivedTable {
    pub(crate) fn new(table: QuotationTable, data_rows: usize, suppliers: Vec<String>) -> Self {
        debug_assert_eq!(table.row_count(), data_rows + 2);
        Self {
            table,
            data_rows,
            suppliers,
        }
    }

    pub fn table(&self) -> &QuotationTable {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        self.table.columns()
    }

    /// Requested supplier names, in request order
    pub fn suppliers(&self) -> &[String] {
        &self.suppliers
    }

    pub fn data_row_count(&self) -> usize {
        self.data_rows
    }

    /// Total rows including the blank and summary rows
    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    pub fn blank_row_index(&self) -> usize {
        self.data_rows
    }

    pub fn summary_row_index(&self) -> usize {
        self.data_rows + 1
    }

    pub fn row_kind(&self, row: usize) -> Option<RowKind> {
        match row {
            r if r < self.data_rows => Some(RowKind::Data),
            r if r == self.blank_row_index() => Some(RowKind::Blank),
            r if r == self.summary_row_index() => Some(RowKind::Summary),
            _ => None,
        }
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.table.value(row, column)
    }

    /// Summary value of a column
    pub fn summary_value(&self, column: &str) -> Option<&CellValue> {
        self.value(self.summary_row_index(), column)
    }

    /// Existing `{supplier}_UP` column indices for requested suppliers
    pub fn unit_price_columns(&self) -> Vec<usize> {
        self.supplier_columns(up_column)
    }

    /// Existing `{supplier}_TOTAL` column indices for requested suppliers
    pub fn total_columns(&self) -> Vec<usize> {
        self.supplier_columns(total_column)
    }

    /// Existing `{supplier}_AVAILABLE` column indices for requested suppliers
    pub fn availability_columns(&self) -> Vec<usize> {
        self.supplier_columns(available_column)
    }

    fn supplier_columns(&self, name: fn(&str) -> String) -> Vec<usize> {
        self.suppliers
            .iter()
            .filter_map(|s| self.table.position(&name(s)))
            .collect()
    }

    /// Cells the highlight rules mark, evaluated in memory
    pub fn highlights(&self) -> BTreeSet<HighlightedCell> {
        highlight::highlights(self)
    }

    /// Render the report sheet: one bold header row, the table, highlight rules
    pub fn to_worksheet(&self, sheet_name: &str) -> Result<Worksheet> {
        let mut sheet = Worksheet::new(sheet_name);
        sheet.set_name(sheet_name)?;

        let header = header_style();
        for (col, name) in self.table.columns().iter().enumerate() {
            let col = sheet_col(col)?;
            sheet.write_at(0, col, name.as_str(), &header)?;
            let width = self
                .table
                .column_values(col as usize)
                .map(|v| v.to_string().chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0);
            sheet.set_column_width(col, (width as f64 + 2.0).clamp(10.0, 40.0));
        }

        for (row, values) in self.table.rows().iter().enumerate() {
            let sheet_row = sheet_row(row)?;
            for (col, value) in values.iter().enumerate() {
                if !matches!(value, CellValue::Empty) {
                    sheet.set_cell_value_at(sheet_row, sheet_col(col)?, value.clone())?;
                }
            }
        }

        for rule in highlight::plan(self).iter().map(highlight::HighlightRule::to_conditional_format) {
            sheet.add_conditional_format(rule?);
        }

        Ok(sheet)
    }
}

/// Report sheet row of a table row (below the header row)
pub(crate) fn sheet_row(row: usize) -> Result<u32> {
    u32::try_from(row + 1)
        .map_err(|_| quote_sheets_core::Error::RowOutOfBounds(u32::MAX, quote_sheets_core::MAX_ROWS).into())
}

pub(crate) fn sheet_col(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| {
        quote_sheets_core::Error::ColumnOutOfBounds(u32::MAX, quote_sheets_core::MAX_COLS).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> QuotationTable {
        QuotationTable::new(
            vec!["ITEM CODE".into(), "QTY".into(), "A_UP".into()],
            vec![
                vec!["X1".into(), 2.0.into(), 10.0.into()],
                vec!["X2".into(), 3.0.into()],
            ],
        )
    }

    #[test]
    fn test_rows_padded_to_width() {
        let table = sample();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[1].len(), 3);
        assert_eq!(table.get(1, 2), Some(&CellValue::Empty));
    }

    #[test]
    fn test_insert_column() {
        let mut table = sample();
        table.insert_column(3, "A_TOTAL", vec![20.0.into()]);
        assert_eq!(table.columns(), ["ITEM CODE", "QTY", "A_UP", "A_TOTAL"]);
        assert_eq!(table.value(0, "A_TOTAL"), Some(&CellValue::Number(20.0)));
        assert_eq!(table.value(1, "A_TOTAL"), Some(&CellValue::Empty));
    }

    #[test]
    fn test_position_ignore_case() {
        let table = sample();
        assert_eq!(table.position("qty"), None);
        assert_eq!(table.position_ignore_case("qty"), Some(1));
    }

    #[test]
    fn test_column_kind() {
        assert_eq!(ColumnKind::of("ITEM CODE"), ColumnKind::Base);
        assert_eq!(ColumnKind::of("Acme_UP"), ColumnKind::UnitPrice);
        assert_eq!(ColumnKind::of("Acme_AVAILABLE"), ColumnKind::Availability);
        assert_eq!(ColumnKind::of("Acme_TOTAL"), ColumnKind::Total);
        assert_eq!(ColumnKind::of("Notes"), ColumnKind::Other);
    }

    #[test]
    fn test_availability_parse() {
        assert_eq!(Availability::parse("NOT SURE"), Some(Availability::NotSure));
        assert_eq!(Availability::parse("no"), Some(Availability::No));
        assert_eq!(Availability::parse(" NO"), None);
        assert_eq!(Availability::from_cell(&CellValue::from("Yes")), Some(Availability::Yes));
        assert_eq!(Availability::from_cell(&CellValue::Number(1.0)), None);
        assert_eq!(Availability::NotSure.to_string(), "NOT SURE");
    }
}
