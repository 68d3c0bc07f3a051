//! End-to-end quotation processing tests

use std::collections::BTreeSet;
use std::io::Cursor;

use pretty_assertions::assert_eq;
use quote_sheets::prelude::*;
use quote_sheets::{
    HeaderKey, RawQuotation, RowKind, SupplierCountMismatch, XlsxError, RESULT_SHEET_NAME,
};

fn s(text: &str) -> CellValue {
    CellValue::from(text)
}

fn n(value: f64) -> CellValue {
    CellValue::Number(value)
}

const E: CellValue = CellValue::Empty;

fn supplier_headers(suppliers: &[&str]) -> Vec<HeaderKey> {
    let mut headers = vec![
        HeaderKey::base("ITEM CODE"),
        HeaderKey::base("DESCRIPTION"),
        HeaderKey::base("QTY"),
    ];
    for supplier in suppliers {
        headers.push(HeaderKey::grouped(*supplier, "UP"));
        headers.push(HeaderKey::grouped(*supplier, "AVAILABLE"));
    }
    headers
}

fn alpha_beta() -> RawQuotation {
    RawQuotation::new(
        supplier_headers(&["ALPHA", "BETA"]),
        vec![
            vec![s("A1"), s("Bolt"), n(2.0), n(10.0), s("YES"), n(8.0), s("NO")],
            vec![s("A2"), s("Nut"), n(3.0), n(5.0), s("NOT SURE"), n(5.0), s("YES")],
        ],
    )
}

fn cell(row: usize, col: usize, highlight: Highlight) -> HighlightedCell {
    HighlightedCell::new(row, col, highlight)
}

#[test]
fn test_alpha_beta_scenario() {
    let suppliers = SupplierList::parse("ALPHA, BETA");
    let result = QuotationProcessor::new().process(&alpha_beta(), &suppliers).unwrap();
    let table = &result.table;

    assert_eq!(
        table.columns(),
        [
            "ITEM CODE",
            "DESCRIPTION",
            "QTY",
            "ALPHA_UP",
            "ALPHA_TOTAL",
            "ALPHA_AVAILABLE",
            "BETA_UP",
            "BETA_TOTAL",
            "BETA_AVAILABLE",
        ]
    );
    assert_eq!(table.row_count(), 4);
    assert_eq!(table.row_kind(2), Some(RowKind::Blank));
    assert_eq!(table.row_kind(3), Some(RowKind::Summary));

    let rows = table.table().rows();
    assert_eq!(rows[0][4], n(20.0));
    assert_eq!(rows[1][4], n(15.0));
    assert_eq!(rows[0][7], n(16.0));
    assert_eq!(rows[1][7], n(15.0));
    assert_eq!(rows[2], vec![E; 9]);
    assert_eq!(rows[3], vec![s("TOTAL_QUOTE"), E, E, E, n(35.0), E, E, n(31.0), E]);

    let expected: BTreeSet<_> = [
        cell(0, 6, Highlight::LowestPrice),
        cell(1, 3, Highlight::LowestPrice),
        cell(1, 6, Highlight::LowestPrice),
        cell(3, 7, Highlight::LowestTotal),
        cell(0, 8, Highlight::Unavailable),
        cell(1, 5, Highlight::Uncertain),
    ]
    .into_iter()
    .collect();
    assert_eq!(table.highlights(), expected);
    assert!(!result.report.has_warnings());
}

#[test]
fn test_report_worksheet() {
    let suppliers = SupplierList::parse("ALPHA, BETA");
    let result = QuotationProcessor::new().process(&alpha_beta(), &suppliers).unwrap();
    let sheet = &result.worksheet;

    assert_eq!(sheet.name(), RESULT_SHEET_NAME);
    assert_eq!(sheet.get_value("A1").unwrap(), s("ITEM CODE"));
    assert_eq!(sheet.get_value("E1").unwrap(), s("ALPHA_TOTAL"));
    assert!(sheet.cell_style_at(0, 0).unwrap().bold);
    assert_eq!(sheet.get_value("E2").unwrap(), n(20.0));
    assert!(sheet.get_value("A4").unwrap().is_empty());
    assert_eq!(sheet.get_value("A5").unwrap(), s("TOTAL_QUOTE"));
    assert_eq!(sheet.get_value("H5").unwrap(), n(31.0));
    assert_eq!(sheet.data_validation_count(), 0);

    // 2 price rules, 2 x 2 availability rules, 2 summary rules
    assert_eq!(sheet.conditional_format_count(), 8);
    let rules = sheet.conditional_formats_at(1, 6);
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].formula, "=AND(ISNUMBER(G2),G2=MIN($D2,$G2))");
    assert!(sheet.conditional_formats_at(3, 6).is_empty());
    assert_eq!(sheet.conditional_formats_at(4, 7).len(), 1);
}

#[test]
fn test_processing_is_idempotent() {
    let suppliers = SupplierList::parse("ALPHA, BETA");
    let processor = QuotationProcessor::new();
    let first = processor.process(&alpha_beta(), &suppliers).unwrap();
    let second = processor.process(&alpha_beta(), &suppliers).unwrap();

    assert_eq!(first.table, second.table);
    assert_eq!(first.table.highlights(), first.table.highlights());
    assert_eq!(first.table.highlights(), second.table.highlights());
    assert_eq!(
        first.worksheet.conditional_formats(),
        second.worksheet.conditional_formats()
    );
}

#[test]
fn test_tied_prices_all_highlighted() {
    let raw = RawQuotation::new(
        supplier_headers(&["A", "B", "C"]),
        vec![vec![s("X"), E, n(1.0), n(7.0), E, n(7.0), E, n(7.0), E]],
    );
    let result = QuotationProcessor::new()
        .process(&raw, &SupplierList::parse("A, B, C"))
        .unwrap();

    let greens: Vec<_> = result
        .table
        .highlights()
        .into_iter()
        .filter(|c| c.row == 0)
        .map(|c| result.table.columns()[c.col].clone())
        .collect();
    assert_eq!(greens, ["A_UP", "B_UP", "C_UP"]);
    assert_eq!(result.table.highlights().len(), 6);
}

#[test]
fn test_unknown_supplier_is_skipped() {
    let suppliers = SupplierList::parse("ALPHA, BETA, GAMMA");
    let result = QuotationProcessor::new().process(&alpha_beta(), &suppliers).unwrap();

    assert!(!result.table.columns().iter().any(|c| c.starts_with("GAMMA")));
    assert_eq!(result.report.skipped_suppliers, ["GAMMA"]);
    assert_eq!(
        result.report.supplier_count_mismatch,
        Some(quote_sheets::SupplierCountMismatch { requested: 3, found: 2 })
    );
    assert_eq!(result.table.summary_value("BETA_TOTAL"), Some(&n(31.0)));
}

#[test]
fn test_misspelled_supplier_is_reported() {
    let suppliers = SupplierList::parse("ALPHA, BETTA");
    let result = QuotationProcessor::new().process(&alpha_beta(), &suppliers).unwrap();

    assert!(result.table.columns().contains(&"BETA_UP".to_string()));
    assert!(!result.table.columns().contains(&"BETA_TOTAL".to_string()));
    assert_eq!(result.report.skipped_suppliers, ["BETTA"]);
    assert_eq!(result.report.unmatched_groups, ["BETA"]);

    // BETA is not compared, so ALPHA holds every minimum
    let greens: BTreeSet<_> = result
        .table
        .highlights()
        .into_iter()
        .filter(|c| c.highlight == Highlight::LowestPrice)
        .map(|c| (c.row, c.col))
        .collect();
    assert_eq!(greens, [(0, 3), (1, 3)].into_iter().collect());
}

#[test]
fn test_supplier_names_match_case_insensitively() {
    let suppliers = SupplierList::parse("alpha, Beta");
    let result = QuotationProcessor::new().process(&alpha_beta(), &suppliers).unwrap();

    assert_eq!(result.table.summary_value("alpha_TOTAL"), Some(&n(35.0)));
    assert_eq!(result.table.summary_value("Beta_TOTAL"), Some(&n(31.0)));
}

#[test]
fn test_no_supplier_names() {
    let result = QuotationProcessor::new()
        .process(&alpha_beta(), &SupplierList::new())
        .unwrap();
    let table = &result.table;

    assert!(!table.columns().iter().any(|c| c.ends_with("_TOTAL")));
    let summary = &table.table().rows()[table.summary_row_index()];
    assert_eq!(summary[0], s("TOTAL_QUOTE"));
    assert!(summary[1..].iter().all(CellValue::is_empty));
    assert!(table.highlights().is_empty());
    assert_eq!(result.report.unmatched_groups, ["ALPHA", "BETA"]);
}

#[test]
fn test_non_numeric_price_gives_value_error() {
    let raw = RawQuotation::new(
        supplier_headers(&["A", "B"]),
        vec![
            vec![s("X1"), E, n(2.0), s("call us"), E, n(3.0), E],
            vec![s("X2"), E, n(1.0), n(4.0), E, E, E],
        ],
    );
    let result = QuotationProcessor::new()
        .process(&raw, &SupplierList::parse("A, B"))
        .unwrap();
    let table = &result.table;

    assert_eq!(table.value(0, "A_TOTAL"), Some(&CellValue::Error(CellError::Value)));
    assert_eq!(table.value(1, "A_TOTAL"), Some(&n(4.0)));
    assert_eq!(table.value(1, "B_TOTAL"), Some(&E));
    assert_eq!(table.summary_value("A_TOTAL"), Some(&CellValue::Error(CellError::Value)));
    assert_eq!(table.summary_value("B_TOTAL"), Some(&n(6.0)));

    // An error total makes the summary comparison fail in the sheet too
    assert!(table
        .highlights()
        .iter()
        .all(|c| c.highlight != Highlight::LowestTotal));
}

#[test]
fn test_missing_qty_column() {
    let raw = RawQuotation::new(
        vec![HeaderKey::base("ITEM CODE"), HeaderKey::grouped("A", "UP")],
        vec![vec![s("X1"), n(1.0)]],
    );
    let err = QuotationProcessor::new()
        .process(&raw, &SupplierList::parse("A"))
        .unwrap_err();
    assert!(matches!(err, Error::MissingColumn(ref column) if column == "QTY"));
}

fn filled_template() -> Worksheet {
    let mut sheet = TemplateBuilder::new(TemplateOptions::new(2, 10)).build().unwrap();
    sheet.set_cell_value("B1", "Q3 fasteners").unwrap();
    sheet.set_cell_value("D2", "Acme").unwrap();
    sheet.set_cell_value("F2", "Globex").unwrap();

    sheet.set_cell_value("A4", "BOLT-10").unwrap();
    sheet.set_cell_value("B4", "Hex bolt M10").unwrap();
    sheet.set_cell_value("C4", 100.0).unwrap();
    sheet.set_cell_value("D4", 0.25).unwrap();
    sheet.set_cell_value("E4", "YES").unwrap();
    sheet.set_cell_value("F4", 0.2).unwrap();
    sheet.set_cell_value("G4", "NOT SURE").unwrap();

    sheet.set_cell_value("A5", "NUT-10").unwrap();
    sheet.set_cell_value("C5", 50.0).unwrap();
    sheet.set_cell_value("D5", 0.1).unwrap();
    sheet.set_cell_value("E5", "NO").unwrap();
    sheet.set_cell_value("F5", "TBD").unwrap();
    sheet
}

#[test]
fn test_xlsx_roundtrip() {
    let bytes = XlsxWriter::write_buffer(&[&filled_template()]).unwrap();
    let suppliers = SupplierList::parse("Acme, Globex");
    let result = QuotationProcessor::new()
        .process_reader(Cursor::new(bytes), &suppliers)
        .unwrap();

    assert_eq!(result.table.data_row_count(), 2);
    assert_eq!(result.table.value(0, "Acme_TOTAL"), Some(&n(25.0)));
    assert_eq!(result.table.value(0, "Globex_TOTAL"), Some(&n(20.0)));
    assert_eq!(
        result.table.value(1, "Globex_TOTAL"),
        Some(&CellValue::Error(CellError::Value))
    );
    assert_eq!(result.table.summary_value("Acme_TOTAL"), Some(&n(30.0)));
    assert!(!result.report.has_warnings());

    let output = result.to_xlsx().unwrap();
    let grid = XlsxReader::read(Cursor::new(output), RESULT_SHEET_NAME).unwrap();
    assert_eq!(grid.get(0, 0), &s("ITEM CODE"));
    assert_eq!(grid.get(0, 4), &s("Acme_TOTAL"));
    assert_eq!(grid.get(1, 4), &n(25.0));
    assert!(grid.get(2, 7).is_error());
    assert!(grid.get(3, 0).is_empty());
    assert_eq!(grid.get(4, 0), &s("TOTAL_QUOTE"));
    assert!(grid.get(4, 7).is_error());
}

#[test]
fn test_process_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("filled.xlsx");
    let output = dir.path().join("highlighted_quotation.xlsx");
    XlsxWriter::write_file(&[&filled_template()], &input).unwrap();

    let result = quote_sheets::process_file(&input, &SupplierList::parse("Acme")).unwrap();
    result.write_file(&output).unwrap();

    assert_eq!(result.report.unmatched_groups, ["Globex"]);
    assert!(output.exists());
}

#[test]
fn test_wrong_sheet_name() {
    let mut sheet = filled_template();
    sheet.set_name("Sheet1").unwrap();
    let bytes = XlsxWriter::write_buffer(&[&sheet]).unwrap();

    let err = QuotationProcessor::new()
        .process_reader(Cursor::new(bytes), &SupplierList::parse("Acme"))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Xlsx(XlsxError::SheetNotFound { ref available, .. }) if available == &["Sheet1"]
    ));
}

#[test]
fn test_blank_row_between_items_is_kept() {
    let mut sheet = TemplateBuilder::new(TemplateOptions::new(1, 10)).build().unwrap();
    sheet.set_cell_value("D2", "Acme").unwrap();
    sheet.set_cell_value("A4", "X1").unwrap();
    sheet.set_cell_value("C4", 2.0).unwrap();
    sheet.set_cell_value("D4", 5.0).unwrap();
    sheet.set_cell_value("A6", "X2").unwrap();
    sheet.set_cell_value("C6", 3.0).unwrap();
    sheet.set_cell_value("D6", 4.0).unwrap();
    let bytes = XlsxWriter::write_buffer(&[&sheet]).unwrap();

    let result = QuotationProcessor::new()
        .process_reader(Cursor::new(bytes), &SupplierList::parse("Acme"))
        .unwrap();
    let table = &result.table;

    assert_eq!(table.data_row_count(), 3);
    assert_eq!(table.row_kind(1), Some(RowKind::Data));
    assert_eq!(table.value(1, "Acme_TOTAL"), Some(&E));
    assert_eq!(table.value(2, "ITEM CODE"), Some(&s("X2")));
    assert_eq!(table.value(2, "Acme_TOTAL"), Some(&n(12.0)));
    assert_eq!(table.summary_value("Acme_TOTAL"), Some(&n(22.0)));
    assert!(table.highlights().iter().all(|c| c.row != 1));
    assert_eq!(result.worksheet.get_value("A4").unwrap(), s("X2"));
}

#[test]
fn test_repeated_supplier_label() {
    let mut sheet = filled_template();
    sheet.set_cell_value("F2", "Acme").unwrap();
    let bytes = XlsxWriter::write_buffer(&[&sheet]).unwrap();

    let result = QuotationProcessor::new()
        .process_reader(Cursor::new(bytes), &SupplierList::parse("Acme"))
        .unwrap();

    assert_eq!(
        result.table.columns(),
        [
            "ITEM CODE",
            "DESCRIPTION",
            "QTY",
            "Acme_UP",
            "Acme_TOTAL",
            "Acme_AVAILABLE",
            "Acme_UP_2",
            "Acme_AVAILABLE_2",
        ]
    );
    assert_eq!(result.table.value(0, "Acme_TOTAL"), Some(&n(25.0)));
    assert_eq!(result.table.value(0, "Acme_UP_2"), Some(&n(0.2)));
    assert_eq!(result.report.unmatched_groups, ["Acme"]);
    assert_eq!(
        result.report.supplier_count_mismatch,
        Some(SupplierCountMismatch { requested: 1, found: 2 })
    );
    assert!(result.report.has_warnings());
}
