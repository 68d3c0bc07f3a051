//! XLSX reader
//!
//! Reads one sheet into a dense [`SheetGrid`] anchored at A1, so row and
//! column indices match what the user sees in the spreadsheet application.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{CellErrorType, Data, Reader, Xlsx};
use log::debug;

use crate::error::{XlsxError, XlsxResult};
use quote_sheets_core::{CellError, CellValue};

static EMPTY: CellValue = CellValue::Empty;

/// Cell values of a single sheet, row-major, anchored at A1
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetGrid {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    /// Build a grid from rows of values (used by tests and in-memory callers)
    pub fn from_rows<S: Into<String>>(name: S, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows (up to the last row holding any cell)
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Get a row by 0-based index
    pub fn row(&self, row: usize) -> Option<&[CellValue]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Get a cell; cells outside the grid read as empty
    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a named sheet from a file path
    pub fn read_file<P: AsRef<Path>>(path: P, sheet_name: &str) -> XlsxResult<SheetGrid> {
        let bytes = std::fs::read(path)?;
        Self::read(Cursor::new(bytes), sheet_name)
    }

    /// Read a named sheet from any seekable reader
    pub fn read<R: Read + Seek>(reader: R, sheet_name: &str) -> XlsxResult<SheetGrid> {
        let mut workbook: Xlsx<R> = Xlsx::new(reader)?;

        let available = workbook.sheet_names();
        if !available.iter().any(|name| name == sheet_name) {
            return Err(XlsxError::SheetNotFound {
                wanted: sheet_name.to_string(),
                available,
            });
        }

        let range = workbook.worksheet_range(sheet_name)?;

        let (start_row, start_col) = match range.start() {
            Some((row, col)) => (row as usize, col as usize),
            None => {
                debug!("sheet '{}' is empty", sheet_name);
                return Ok(SheetGrid::from_rows(sheet_name, Vec::new()));
            }
        };

        let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row];
        for source in range.rows() {
            let mut row = vec![CellValue::Empty; start_col];
            row.extend(source.iter().map(convert_cell));
            rows.push(row);
        }

        debug!(
            "read sheet '{}': {} rows from {}{}",
            sheet_name,
            rows.len(),
            quote_sheets_core::CellAddress::column_to_letters(start_col as u16),
            start_row + 1
        );

        Ok(SheetGrid::from_rows(sheet_name, rows))
    }

    /// List the sheet names of a workbook
    pub fn sheet_names<R: Read + Seek>(reader: R) -> XlsxResult<Vec<String>> {
        let workbook: Xlsx<R> = Xlsx::new(reader)?;
        Ok(workbook.sheet_names())
    }
}

fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Float(n) => CellValue::Number(*n),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::String(s) => match CellError::parse(s) {
            // Error literals written as formula results come back as text
            Some(e) => CellValue::Error(e),
            None => CellValue::string(s.as_str()),
        },
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::string(s.as_str()),
        Data::Error(e) => CellValue::Error(convert_error(e)),
    }
}

fn convert_error(error: &CellErrorType) -> CellError {
    match error {
        CellErrorType::Div0 => CellError::Div0,
        CellErrorType::NA => CellError::Na,
        CellErrorType::Name => CellError::Name,
        CellErrorType::Null => CellError::Null,
        CellErrorType::Num => CellError::Num,
        CellErrorType::Ref => CellError::Ref,
        CellErrorType::Value => CellError::Value,
        CellErrorType::GettingData => CellError::Na,
    }
}
