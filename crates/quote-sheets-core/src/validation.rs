//! Data validation
//!
//! Restricts what users may type into template cells. Only list (dropdown)
//! validation is modelled; that is all the quotation template needs.
//!
//! ## Example
//!
//! ```rust
//! use quote_sheets_core::{CellRange, DataValidation, Worksheet};
//!
//! let mut sheet = Worksheet::new("Supplier Quotation");
//!
//! let validation = DataValidation::list(["YES", "NO", "NOT SURE"])
//!     .unwrap()
//!     .with_range(CellRange::parse("E4:E103").unwrap())
//!     .with_error_message("Invalid Input", "Only YES, NO, or NOT SURE are allowed");
//!
//! sheet.add_data_validation(validation);
//! assert!(sheet.data_validation_at(3, 4).is_some());
//! ```

use crate::cell::CellRange;
use crate::error::{Error, Result};

/// Excel caps an inline list source (`"a,b,c"`) at 255 characters.
const MAX_LIST_SOURCE_LEN: usize = 255;

/// Dropdown list validation rule
#[derive(Debug, Clone, PartialEq)]
pub struct DataValidation {
    /// Allowed values, in dropdown order
    pub values: Vec<String>,
    /// Cell ranges this validation applies to
    pub ranges: Vec<CellRange>,
    /// Allow blank/empty cells
    pub allow_blank: bool,

    /// Input message text (shown when the cell is selected)
    pub input_message: Option<String>,

    /// Error alert style
    pub error_style: ValidationErrorStyle,
    /// Error alert title
    pub error_title: Option<String>,
    /// Error alert message
    pub error_message: Option<String>,
}

impl DataValidation {
    /// Create a list validation from its allowed values
    ///
    /// Fails if a value contains a comma (the inline source separator) or
    /// the joined source exceeds Excel's 255 character limit.
    pub fn list<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();

        if values.is_empty() {
            return Err(Error::InvalidValidation("list has no values".into()));
        }
        if let Some(bad) = values.iter().find(|v| v.contains(',')) {
            return Err(Error::InvalidValidation(format!(
                "list value '{}' contains a comma",
                bad
            )));
        }

        let validation = Self {
            values,
            ranges: Vec::new(),
            allow_blank: true,
            input_message: None,
            error_style: ValidationErrorStyle::Stop,
            error_title: None,
            error_message: None,
        };

        if validation.source().len() > MAX_LIST_SOURCE_LEN {
            return Err(Error::InvalidValidation(format!(
                "list source exceeds {} characters",
                MAX_LIST_SOURCE_LEN
            )));
        }

        Ok(validation)
    }

    /// Inline list source as stored in the file (e.g. `YES,NO,NOT SURE`)
    pub fn source(&self) -> String {
        self.values.join(",")
    }

    /// Add a cell range to this validation
    pub fn with_range(mut self, range: CellRange) -> Self {
        self.ranges.push(range);
        self
    }

    /// Set whether blank cells are allowed
    pub fn with_allow_blank(mut self, allow: bool) -> Self {
        self.allow_blank = allow;
        self
    }

    /// Set the prompt shown when a cell is selected
    pub fn with_input_message(mut self, message: impl Into<String>) -> Self {
        self.input_message = Some(message.into());
        self
    }

    /// Set an error message (shown when invalid data is entered)
    pub fn with_error_message(
        mut self,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.error_title = Some(title.into());
        self.error_message = Some(message.into());
        self
    }

    /// Set the error style
    pub fn with_error_style(mut self, style: ValidationErrorStyle) -> Self {
        self.error_style = style;
        self
    }

    /// Check if this validation applies to a specific cell
    pub fn applies_to(&self, row: u32, col: u16) -> bool {
        self.ranges.iter().any(|r| r.contains(row, col))
    }

    /// Check whether a typed value would be accepted
    pub fn accepts(&self, value: &str) -> bool {
        (self.allow_blank && value.is_empty()) || self.values.iter().any(|v| v == value)
    }
}

/// Error alert styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationErrorStyle {
    /// Reject invalid data (default)
    #[default]
    Stop,
    /// Warn but allow
    Warning,
    /// Just inform
    Information,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_validation() {
        let v = DataValidation::list(["YES", "NO", "NOT SURE"]).unwrap();
        assert_eq!(v.values, vec!["YES", "NO", "NOT SURE"]);
        assert_eq!(v.source(), "YES,NO,NOT SURE");
        assert_eq!(v.error_style, ValidationErrorStyle::Stop);
        assert!(v.allow_blank);
    }

    #[test]
    fn test_list_rejects_commas_and_empty() {
        assert!(DataValidation::list(["A,B"]).is_err());
        assert!(DataValidation::list(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_list_rejects_long_source() {
        let long = vec!["X".repeat(200), "Y".repeat(60)];
        assert!(DataValidation::list(long).is_err());
    }

    #[test]
    fn test_with_messages() {
        let v = DataValidation::list(["YES", "NO"])
            .unwrap()
            .with_input_message("Choose: YES or NO")
            .with_error_message("Invalid Input", "Only YES or NO are allowed");

        assert_eq!(v.input_message.as_deref(), Some("Choose: YES or NO"));
        assert_eq!(v.error_title.as_deref(), Some("Invalid Input"));
        assert_eq!(v.error_message.as_deref(), Some("Only YES or NO are allowed"));
    }

    #[test]
    fn test_applies_to() {
        let v = DataValidation::list(["YES"])
            .unwrap()
            .with_range(CellRange::parse("E4:E10").unwrap())
            .with_range(CellRange::parse("G4:G10").unwrap());

        assert!(v.applies_to(3, 4)); // E4
        assert!(v.applies_to(9, 6)); // G10
        assert!(!v.applies_to(3, 5)); // F4
        assert!(!v.applies_to(2, 4)); // E3 - header row
    }

    #[test]
    fn test_accepts() {
        let v = DataValidation::list(["YES", "NO", "NOT SURE"]).unwrap();
        assert!(v.accepts("NOT SURE"));
        assert!(v.accepts(""));
        assert!(!v.accepts("yes"));
        assert!(!v.with_allow_blank(false).accepts(""));
    }
}
