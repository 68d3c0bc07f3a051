//! Turns a filled-in template into the comparison report.
//!
//! Processing runs in four steps:
//!
//! 1. map the two-level upload header onto canonical column names
//! 2. insert `{supplier}_TOTAL` right after each `{supplier}_UP`
//! 3. append a blank row and a `TOTAL_QUOTE` summary row
//! 4. plan the highlight rules and render the "Quotation" sheet
//!
//! A requested supplier with no `_UP` column is skipped with a warning;
//! everything else that does not fit the template shape is an error.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::{debug, warn};
use quote_sheets_core::{CellError, CellValue, Worksheet};
use quote_sheets_xlsx::{SheetGrid, XlsxReader, XlsxWriter};

use crate::error::{Error, Result};
use crate::header::{ColumnMapping, HeaderKey};
use crate::options::ProcessOptions;
use crate::suppliers::SupplierList;
use crate::table::{
    total_column, up_column, DerivedTable, QuotationTable, ITEM_CODE, QTY, TOTAL_QUOTE_LABEL,
};

/// Upload contents before normalization: one header key per column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQuotation {
    headers: Vec<HeaderKey>,
    rows: Vec<Vec<CellValue>>,
}

impl RawQuotation {
    pub fn new(headers: Vec<HeaderKey>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }

    /// Split an upload grid into header keys and data rows, without trailing blank rows
    pub fn from_grid(grid: &SheetGrid, options: &ProcessOptions) -> Result<Self> {
        let last_header_row = options.group_header_row.max(options.field_header_row);
        if grid.height() <= last_header_row {
            return Err(Error::MalformedUpload(format!(
                "sheet '{}' has {} rows, expected header rows {} and {}",
                grid.name(),
                grid.height(),
                options.group_header_row + 1,
                options.field_header_row + 1
            )));
        }

        let groups = grid.row(options.group_header_row).unwrap_or_default();
        let fields = grid.row(options.field_header_row).unwrap_or_default();
        if groups.iter().chain(fields).all(CellValue::is_empty) {
            return Err(Error::MalformedUpload(format!(
                "header rows {} and {} of sheet '{}' are empty",
                options.group_header_row + 1,
                options.field_header_row + 1,
                grid.name()
            )));
        }
        let headers = HeaderKey::from_rows(groups, fields);

        // Blank rows between items keep their position; only the unused
        // template slots at the bottom are trimmed.
        let mut rows: Vec<Vec<CellValue>> = grid
            .rows()
            .skip(last_header_row + 1)
            .map(<[CellValue]>::to_vec)
            .collect();
        while rows
            .last()
            .is_some_and(|row| row.iter().all(CellValue::is_empty))
        {
            rows.pop();
        }

        debug!(
            "read {} columns and {} data rows from '{}'",
            headers.len(),
            rows.len(),
            grid.name()
        );

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[HeaderKey] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }
}

/// Requested supplier count differs from the supplier groups in the upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplierCountMismatch {
    pub requested: usize,
    pub found: usize,
}

/// Recoverable problems found while processing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessReport {
    /// How every upload column was named
    pub mapping: ColumnMapping,
    /// Requested suppliers without a `_UP` column (no total, no comparison)
    pub skipped_suppliers: Vec<String>,
    /// Supplier labels in the upload that matched no requested name
    pub unmatched_groups: Vec<String>,
    pub supplier_count_mismatch: Option<SupplierCountMismatch>,
}

impl ProcessReport {
    pub fn has_warnings(&self) -> bool {
        !self.skipped_suppliers.is_empty()
            || !self.unmatched_groups.is_empty()
            || self.supplier_count_mismatch.is_some()
    }

    /// Human-readable warning lines
    pub fn warnings(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for supplier in &self.skipped_suppliers {
            lines.push(format!(
                "column '{}' not found; supplier '{}' has no total",
                up_column(supplier),
                supplier
            ));
        }
        for group in &self.unmatched_groups {
            lines.push(format!("supplier label '{}' matches no supplier name", group));
        }
        if let Some(mismatch) = self.supplier_count_mismatch {
            lines.push(format!(
                "{} supplier names given but the sheet has {} supplier groups",
                mismatch.requested, mismatch.found
            ));
        }
        lines
    }
}

/// Result of processing an upload
#[derive(Debug, Clone)]
pub struct ProcessedQuotation {
    pub table: DerivedTable,
    /// The "Quotation" report sheet
    pub worksheet: Worksheet,
    pub report: ProcessReport,
}

impl ProcessedQuotation {
    pub fn to_xlsx(&self) -> Result<Vec<u8>> {
        Ok(XlsxWriter::write_buffer(&[&self.worksheet])?)
    }

    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        XlsxWriter::write_file(&[&self.worksheet], path)?;
        Ok(())
    }
}

/// Builds comparison reports from filled-in templates
#[derive(Debug, Clone, Default)]
pub struct QuotationProcessor {
    options: ProcessOptions,
}

impl QuotationProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ProcessOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Process an XLSX file on disk
    pub fn process_file<P: AsRef<Path>>(
        &self,
        path: P,
        suppliers: &SupplierList,
    ) -> Result<ProcessedQuotation> {
        let file = File::open(path).map_err(quote_sheets_xlsx::XlsxError::from)?;
        self.process_reader(BufReader::new(file), suppliers)
    }

    /// Process XLSX bytes from any seekable reader
    pub fn process_reader<R: Read + Seek>(
        &self,
        reader: R,
        suppliers: &SupplierList,
    ) -> Result<ProcessedQuotation> {
        let raw = self.read_upload(reader)?;
        self.process(&raw, suppliers)
    }

    /// Read the upload sheet without processing it
    pub fn read_upload<R: Read + Seek>(&self, reader: R) -> Result<RawQuotation> {
        let grid = XlsxReader::read(reader, &self.options.sheet_name)?;
        RawQuotation::from_grid(&grid, &self.options)
    }

    /// Map upload headers to canonical names and check the required columns
    pub fn normalize(
        &self,
        raw: &RawQuotation,
        suppliers: &SupplierList,
    ) -> Result<(QuotationTable, ColumnMapping)> {
        let mapping = ColumnMapping::build(raw.headers(), suppliers);
        let table = QuotationTable::new(mapping.names(), raw.rows().to_vec());

        for required in [ITEM_CODE, QTY] {
            if table.position_ignore_case(required).is_none() {
                return Err(Error::MissingColumn(required.to_string()));
            }
        }

        Ok((table, mapping))
    }

    /// Compute totals, append the summary and render the report
    pub fn process(&self, raw: &RawQuotation, suppliers: &SupplierList) -> Result<ProcessedQuotation> {
        let (mut table, mapping) = self.normalize(raw, suppliers)?;
        let data_rows = table.row_count();

        let mut skipped_suppliers = Vec::new();
        for supplier in suppliers {
            let up = up_column(supplier);
            let Some(up_col) = table.position(&up) else {
                warn!("column '{}' not found; skipping supplier '{}'", up, supplier);
                skipped_suppliers.push(supplier.clone());
                continue;
            };
            let qty_col = required_column(&table, QTY)?;

            let totals = table
                .rows()
                .iter()
                .map(|row| line_total(&row[up_col], &row[qty_col]))
                .collect();
            table.insert_column(up_col + 1, total_column(supplier), totals);
        }

        let mut summary = vec![CellValue::Empty; table.column_count()];
        summary[required_column(&table, ITEM_CODE)?] = TOTAL_QUOTE_LABEL.into();
        for supplier in suppliers {
            if let Some(col) = table.position(&total_column(supplier)) {
                summary[col] = column_sum(table.column_values(col));
            }
        }
        table.push_row(Vec::new());
        table.push_row(summary);

        let unmatched_groups = mapping.unmatched_groups();
        for group in &unmatched_groups {
            warn!("supplier label '{}' matches no supplier name", group);
        }

        let found = mapping.groups().len();
        let supplier_count_mismatch = (found != suppliers.len()).then(|| {
            warn!(
                "{} supplier names given but the sheet has {} supplier groups",
                suppliers.len(),
                found
            );
            SupplierCountMismatch {
                requested: suppliers.len(),
                found,
            }
        });

        let derived = DerivedTable::new(table, data_rows, suppliers.names().to_vec());
        let worksheet = derived.to_worksheet(&self.options.result_sheet_name)?;
        debug!(
            "processed {} rows for {} suppliers ({} skipped), {} highlight rules",
            data_rows,
            suppliers.len(),
            skipped_suppliers.len(),
            worksheet.conditional_format_count()
        );

        Ok(ProcessedQuotation {
            table: derived,
            worksheet,
            report: ProcessReport {
                mapping,
                skipped_suppliers,
                unmatched_groups,
                supplier_count_mismatch,
            },
        })
    }
}

fn required_column(table: &QuotationTable, name: &str) -> Result<usize> {
    table
        .position_ignore_case(name)
        .ok_or_else(|| Error::MissingColumn(name.to_string()))
}

/// Unit price times quantity for one row
///
/// Blank inputs give a blank total. Errors propagate; any other
/// non-numeric input gives `#VALUE!`.
pub fn line_total(price: &CellValue, quantity: &CellValue) -> CellValue {
    if price.is_empty() || quantity.is_empty() {
        return CellValue::Empty;
    }
    match (price, quantity) {
        (CellValue::Error(e), _) | (_, CellValue::Error(e)) => CellValue::Error(*e),
        (CellValue::Number(p), CellValue::Number(q)) => CellValue::Number(p * q),
        _ => CellValue::Error(CellError::Value),
    }
}

/// Sum of a total column; the first error wins, blanks are skipped
///
/// A column with no numeric cells sums to blank.
pub fn column_sum<'a, I>(values: I) -> CellValue
where
    I: IntoIterator<Item = &'a CellValue>,
{
    let mut sum: Option<f64> = None;
    for value in values {
        match value {
            CellValue::Number(n) => sum = Some(sum.unwrap_or(0.0) + n),
            CellValue::Error(e) => return CellValue::Error(*e),
            v if v.is_empty() => {}
            _ => return CellValue::Error(CellError::Value),
        }
    }
    sum.map_or(CellValue::Empty, CellValue::Number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(&10.0.into(), &2.0.into()), CellValue::Number(20.0));
        assert_eq!(line_total(&CellValue::Empty, &2.0.into()), CellValue::Empty);
        assert_eq!(line_total(&"  ".into(), &2.0.into()), CellValue::Empty);
        assert_eq!(line_total(&10.0.into(), &CellValue::Empty), CellValue::Empty);
        assert_eq!(
            line_total(&"TBD".into(), &2.0.into()),
            CellValue::Error(CellError::Value)
        );
        assert_eq!(
            line_total(&10.0.into(), &true.into()),
            CellValue::Error(CellError::Value)
        );
        assert_eq!(
            line_total(&CellError::Na.into(), &2.0.into()),
            CellValue::Error(CellError::Na)
        );
    }

    #[test]
    fn test_column_sum() {
        let values = [CellValue::Number(20.0), CellValue::Empty, CellValue::Number(15.0)];
        assert_eq!(column_sum(&values), CellValue::Number(35.0));

        let values = [CellValue::Number(20.0), CellValue::Error(CellError::Value)];
        assert_eq!(column_sum(&values), CellValue::Error(CellError::Value));

        let values = [CellValue::Empty, CellValue::Empty];
        assert_eq!(column_sum(&values), CellValue::Empty);
    }

    #[test]
    fn test_from_grid_trims_trailing_empty_rows() {
        let grid = SheetGrid::from_rows(
            "Supplier Quotation",
            vec![
                vec!["QUOTATION NAME:".into()],
                vec!["ITEM CODE".into(), "QTY".into(), "Acme".into(), CellValue::Empty],
                vec![CellValue::Empty, CellValue::Empty, "UP".into(), "AVAILABLE".into()],
                vec!["X1".into(), 2.0.into(), 5.0.into(), "YES".into()],
                vec![CellValue::Empty, "".into()],
                vec!["X2".into(), 1.0.into()],
                vec![CellValue::Empty, CellValue::Empty],
                vec!["  ".into()],
            ],
        );
        let raw = RawQuotation::from_grid(&grid, &ProcessOptions::default()).unwrap();
        assert_eq!(raw.headers().len(), 4);
        assert_eq!(raw.headers()[3], HeaderKey::grouped("Acme", "AVAILABLE"));
        assert_eq!(raw.rows().len(), 3);
        assert!(raw.rows()[1].iter().all(CellValue::is_empty));
        assert_eq!(raw.rows()[2][0], CellValue::from("X2"));
    }

    #[test]
    fn test_from_grid_missing_header_rows() {
        let grid = SheetGrid::from_rows("Supplier Quotation", vec![vec!["QUOTATION NAME:".into()]]);
        let err = RawQuotation::from_grid(&grid, &ProcessOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedUpload(_)));
    }

    #[test]
    fn test_missing_required_column() {
        let raw = RawQuotation::new(
            vec![HeaderKey::base("ITEM CODE"), HeaderKey::grouped("Acme", "UP")],
            vec![vec!["X1".into(), 3.0.into()]],
        );
        let err = QuotationProcessor::new()
            .process(&raw, &SupplierList::parse("Acme"))
            .unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == "QTY"));
    }

    #[test]
    fn test_report_warnings() {
        let report = ProcessReport {
            skipped_suppliers: vec!["Globex".into()],
            unmatched_groups: vec!["Supplier 2".into()],
            supplier_count_mismatch: Some(SupplierCountMismatch { requested: 2, found: 1 }),
            ..Default::default()
        };
        assert!(report.has_warnings());
        assert_eq!(report.warnings().len(), 3);
        assert!(!ProcessReport::default().has_warnings());
    }
}
