//! Highlight rules for the quotation report.
//!
//! Rules are planned once from a [`DerivedTable`] and then either emitted as
//! formula-based conditional formats (so the spreadsheet re-evaluates them
//! after edits) or evaluated in memory for previews. Both paths share the
//! same semantics:
//!
//! - data rows: every `_UP` cell equal to the row minimum is green
//! - summary row: every `_TOTAL` cell equal to the minimum total is green
//! - `_AVAILABLE` cells: `NO` is red, `NOT SURE` is orange
//!
//! The minimum only considers numeric cells, blanks are never highlighted,
//! and an error among the compared cells suppresses the whole comparison.
//! Ties are all highlighted.

use std::collections::BTreeSet;
use std::ops::Range;

use quote_sheets_core::{CellAddress, CellRange, CellValue, Color, ConditionalFormatRule, Style};

use crate::error::Result;
use crate::table::{sheet_col, sheet_row, Availability, DerivedTable, QuotationTable};

/// Highlight categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Highlight {
    /// Cheapest unit price in a row
    LowestPrice,
    /// Cheapest supplier total in the summary row
    LowestTotal,
    /// Availability answered NO
    Unavailable,
    /// Availability answered NOT SURE
    Uncertain,
}

impl Highlight {
    /// Background and text color applied to a highlighted cell
    pub fn colors(self) -> (Color, Color) {
        match self {
            Highlight::LowestPrice | Highlight::LowestTotal => (Color::LIGHT_GREEN, Color::DARK_GREEN),
            Highlight::Unavailable => (Color::LIGHT_RED, Color::DARK_RED),
            Highlight::Uncertain => (Color::LIGHT_ORANGE, Color::DARK_ORANGE),
        }
    }

    pub fn style(self) -> Style {
        let (fill, font) = self.colors();
        Style::new().fill_color(fill).font_color(font)
    }

    fn for_availability(answer: Availability) -> Option<Self> {
        match answer {
            Availability::No => Some(Highlight::Unavailable),
            Availability::NotSure => Some(Highlight::Uncertain),
            Availability::Yes => None,
        }
    }
}

/// A highlighted table cell (0-based table coordinates, header excluded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HighlightedCell {
    pub row: usize,
    pub col: usize,
    pub highlight: Highlight,
}

impl HighlightedCell {
    pub fn new(row: usize, col: usize, highlight: Highlight) -> Self {
        Self { row, col, highlight }
    }
}

/// What a rule tests for each cell it covers
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Cell is numeric and equals the minimum of the peer columns in its row
    RowMinimum { peers: Vec<usize> },
    /// Cell text equals the answer, ignoring case
    Equals(Availability),
}

/// One highlight rule covering a single column over a run of rows
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightRule {
    pub highlight: Highlight,
    pub column: usize,
    pub rows: Range<usize>,
    pub condition: Condition,
    /// Lower runs first
    pub priority: u32,
}

impl HighlightRule {
    /// Whether the rule marks the cell at `row` of this rule's column
    pub fn matches(&self, table: &QuotationTable, row: usize) -> bool {
        let Some(value) = table.get(row, self.column) else {
            return false;
        };
        match &self.condition {
            Condition::RowMinimum { peers } => {
                let Some(n) = value.as_number() else {
                    return false;
                };
                match row_minimum(table, row, peers) {
                    Some(min) => n == min,
                    None => false,
                }
            }
            Condition::Equals(answer) => Availability::from_cell(value) == Some(*answer),
        }
    }

    /// Formula relative to the first covered cell, in report sheet coordinates
    pub fn formula(&self) -> Result<String> {
        let row = sheet_row(self.rows.start)?;
        let cell = CellAddress::new(row, sheet_col(self.column)?).to_a1_string();

        Ok(match &self.condition {
            Condition::RowMinimum { peers } => {
                let peers = peers
                    .iter()
                    .map(|&col| -> Result<String> {
                        Ok(CellAddress::new(row, sheet_col(col)?)
                            .with_absolute_column()
                            .to_a1_string())
                    })
                    .collect::<Result<Vec<_>>>()?;
                format!("=AND(ISNUMBER({cell}),{cell}=MIN({}))", peers.join(","))
            }
            Condition::Equals(answer) => format!("={}=\"{}\"", cell, answer.as_str()),
        })
    }

    /// Covered range in report sheet coordinates
    pub fn range(&self) -> Result<CellRange> {
        let col = sheet_col(self.column)?;
        Ok(CellRange::from_indices(
            sheet_row(self.rows.start)?,
            col,
            sheet_row(self.rows.end - 1)?,
            col,
        ))
    }

    pub fn to_conditional_format(&self) -> Result<ConditionalFormatRule> {
        Ok(ConditionalFormatRule::expression(self.formula()?)
            .with_range(self.range()?)
            .with_format(self.highlight.style())
            .with_priority(self.priority))
    }
}

/// Minimum over the numeric peer cells of a row; `None` when there is none
/// or when a peer holds an error (the sheet's MIN fails in that case)
fn row_minimum(table: &QuotationTable, row: usize, peers: &[usize]) -> Option<f64> {
    let mut min: Option<f64> = None;
    for &col in peers {
        match table.get(row, col) {
            Some(CellValue::Number(n)) => min = Some(min.map_or(*n, |m| m.min(*n))),
            Some(CellValue::Error(_)) => return None,
            _ => {}
        }
    }
    min
}

/// Plan every highlight rule for a derived table
///
/// Rules never cover the blank separator row; a table without data rows
/// only gets the summary rule.
pub fn plan(table: &DerivedTable) -> Vec<HighlightRule> {
    let mut rules = Vec::new();
    let data = 0..table.data_row_count();

    if !data.is_empty() {
        let prices = table.unit_price_columns();
        for &column in &prices {
            rules.push(HighlightRule {
                highlight: Highlight::LowestPrice,
                column,
                rows: data.clone(),
                condition: Condition::RowMinimum { peers: prices.clone() },
                priority: 0,
            });
        }

        for column in table.availability_columns() {
            for answer in Availability::ALL {
                if let Some(highlight) = Highlight::for_availability(answer) {
                    rules.push(HighlightRule {
                        highlight,
                        column,
                        rows: data.clone(),
                        condition: Condition::Equals(answer),
                        priority: 0,
                    });
                }
            }
        }
    }

    let summary = table.summary_row_index();
    let totals = table.total_columns();
    for &column in &totals {
        rules.push(HighlightRule {
            highlight: Highlight::LowestTotal,
            column,
            rows: summary..summary + 1,
            condition: Condition::RowMinimum { peers: totals.clone() },
            priority: 0,
        });
    }

    for (index, rule) in rules.iter_mut().enumerate() {
        rule.priority = index as u32 + 1;
    }
    rules
}

/// Evaluate planned rules against the table's current values
pub fn evaluate(table: &DerivedTable, rules: &[HighlightRule]) -> BTreeSet<HighlightedCell> {
    let mut cells = BTreeSet::new();
    for rule in rules {
        for row in rule.rows.clone() {
            if rule.matches(table.table(), row) {
                cells.insert(HighlightedCell::new(row, rule.column, rule.highlight));
            }
        }
    }
    cells
}

/// Plan and evaluate in one step
pub fn highlights(table: &DerivedTable) -> BTreeSet<HighlightedCell> {
    evaluate(table, &plan(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derived(columns: &[&str], rows: Vec<Vec<CellValue>>, suppliers: &[&str]) -> DerivedTable {
        let data_rows = rows.len() - 2;
        DerivedTable::new(
            QuotationTable::new(columns.iter().map(|c| c.to_string()).collect(), rows),
            data_rows,
            suppliers.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn two_supplier_table() -> DerivedTable {
        derived(
            &["ITEM CODE", "QTY", "A_UP", "A_TOTAL", "A_AVAILABLE", "B_UP", "B_TOTAL", "B_AVAILABLE"],
            vec![
                vec!["X".into(), 1.0.into(), 4.0.into(), 4.0.into(), "NO".into(), 4.0.into(), 4.0.into(), "not sure".into()],
                vec!["Y".into(), 1.0.into(), CellValue::Empty, CellValue::Empty, "YES".into(), 7.0.into(), 7.0.into()],
                vec![],
                vec!["TOTAL_QUOTE".into(), CellValue::Empty, CellValue::Empty, 4.0.into(), CellValue::Empty, CellValue::Empty, 11.0.into()],
            ],
            &["A", "B"],
        )
    }

    #[test]
    fn test_plan_shape() {
        let rules = plan(&two_supplier_table());
        // 2 price rules, 2 x 2 availability rules, 2 summary rules
        assert_eq!(rules.len(), 8);
        assert!(rules.iter().all(|r| r.rows.end <= 2 || r.rows == (3..4)));
        let priorities: Vec<u32> = rules.iter().map(|r| r.priority).collect();
        assert_eq!(priorities, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_evaluate() {
        let cells = highlights(&two_supplier_table());
        let expected: BTreeSet<_> = [
            HighlightedCell::new(0, 2, Highlight::LowestPrice),
            HighlightedCell::new(0, 5, Highlight::LowestPrice),
            HighlightedCell::new(0, 4, Highlight::Unavailable),
            HighlightedCell::new(0, 7, Highlight::Uncertain),
            HighlightedCell::new(1, 5, Highlight::LowestPrice),
            HighlightedCell::new(3, 3, Highlight::LowestTotal),
        ]
        .into_iter()
        .collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_error_suppresses_row_comparison() {
        let table = derived(
            &["ITEM CODE", "A_UP", "B_UP"],
            vec![
                vec!["X".into(), CellValue::Error(quote_sheets_core::CellError::Value), 3.0.into()],
                vec![],
                vec!["TOTAL_QUOTE".into()],
            ],
            &["A", "B"],
        );
        assert!(highlights(&table).is_empty());
    }

    #[test]
    fn test_text_prices_ignored() {
        let table = derived(
            &["ITEM CODE", "A_UP", "B_UP"],
            vec![vec!["X".into(), "n/a".into(), 3.0.into()], vec![], vec!["TOTAL_QUOTE".into()]],
            &["A", "B"],
        );
        let cells = highlights(&table);
        assert_eq!(cells.len(), 1);
        assert!(cells.contains(&HighlightedCell::new(0, 2, Highlight::LowestPrice)));
    }

    #[test]
    fn test_formulas() {
        let rules = plan(&two_supplier_table());

        assert_eq!(rules[0].formula().unwrap(), "=AND(ISNUMBER(C2),C2=MIN($C2,$F2))");
        assert_eq!(rules[0].range().unwrap().to_a1_string(), "C2:C3");
        assert_eq!(rules[2].formula().unwrap(), "=E2=\"NO\"");
        assert_eq!(rules[3].formula().unwrap(), "=E2=\"NOT SURE\"");
        assert_eq!(rules[6].formula().unwrap(), "=AND(ISNUMBER(D5),D5=MIN($D5,$G5))");
        assert_eq!(rules[6].range().unwrap().to_a1_string(), "D5");
    }

    #[test]
    fn test_styles() {
        let style = Highlight::LowestPrice.style();
        assert_eq!(style.fill, Some(Color::LIGHT_GREEN));
        assert_eq!(style.font_color, Color::DARK_GREEN);
        assert_eq!(Highlight::Unavailable.colors(), (Color::LIGHT_RED, Color::DARK_RED));
        assert_eq!(Highlight::Uncertain.colors(), (Color::LIGHT_ORANGE, Color::DARK_ORANGE));
    }
}
