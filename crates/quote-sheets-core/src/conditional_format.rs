//! Conditional formatting
//!
//! Rules are formula-based: the spreadsheet application re-evaluates them
//! whenever the user edits a cell, so highlights stay correct after the
//! report is handed over.
//!
//! ## Example
//!
//! ```rust
//! use quote_sheets_core::{CellRange, Color, ConditionalFormatRule, Style, Worksheet};
//!
//! let mut sheet = Worksheet::new("Quotation");
//!
//! let rule = ConditionalFormatRule::expression("=E2=\"NO\"")
//!     .with_range(CellRange::parse("E2").unwrap())
//!     .with_format(Style::new().fill_color(Color::LIGHT_RED).font_color(Color::DARK_RED));
//!
//! sheet.add_conditional_format(rule);
//! assert_eq!(sheet.conditional_formats_at(1, 4).len(), 1);
//! ```

use crate::cell::CellRange;
use crate::style::Style;

/// A formula-based conditional formatting rule
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalFormatRule {
    /// Formula evaluated relative to the top-left cell of the first range
    pub formula: String,
    /// Cell ranges this rule applies to
    pub ranges: Vec<CellRange>,
    /// Priority (lower = higher priority)
    pub priority: u32,
    /// Stop processing further rules if this one matches
    pub stop_if_true: bool,
    /// Format to apply when the formula is TRUE (font color and fill)
    pub format: Style,
}

impl ConditionalFormatRule {
    /// Highlight cells where the formula evaluates to TRUE
    ///
    /// A missing leading `=` is added.
    pub fn expression(formula: impl Into<String>) -> Self {
        let formula = formula.into();
        let formula = if formula.starts_with('=') {
            formula
        } else {
            format!("={}", formula)
        };

        Self {
            formula,
            ranges: Vec::new(),
            priority: 1,
            stop_if_true: false,
            format: Style::default(),
        }
    }

    /// Add a cell range to this rule
    pub fn with_range(mut self, range: CellRange) -> Self {
        self.ranges.push(range);
        self
    }

    /// Set the format applied when the rule matches
    pub fn with_format(mut self, format: Style) -> Self {
        self.format = format;
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Set stop-if-true
    pub fn with_stop_if_true(mut self, stop: bool) -> Self {
        self.stop_if_true = stop;
        self
    }

    /// Check if this rule applies to a specific cell
    pub fn applies_to(&self, row: u32, col: u16) -> bool {
        self.ranges.iter().any(|r| r.contains(row, col))
    }
}
