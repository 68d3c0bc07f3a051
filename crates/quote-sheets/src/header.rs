//! Two-level upload headers and their mapping to canonical column names.
//!
//! An upload carries supplier labels in one header row and UP / AVAILABLE in
//! the row below. A merged supplier label is only stored in the first of
//! its two columns, so blank labels inherit the nearest group to the left.
//!
//! ```text
//!   ITEM CODE | DESCRIPTION | QTY | Acme |           | Globex |
//!             |             |     | UP   | AVAILABLE | UP     | AVAILABLE
//! ```
//!
//! maps to `ITEM CODE, DESCRIPTION, QTY, Acme_UP, Acme_AVAILABLE, Globex_UP,
//! Globex_AVAILABLE` when both suppliers are requested.

use std::collections::HashSet;
use std::fmt;

use log::debug;
use quote_sheets_core::{CellAddress, CellValue};

use crate::suppliers::SupplierList;
use crate::table::ColumnKind;

/// Raw two-level column key as read from the upload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeaderKey {
    /// Supplier label, `None` for base columns
    pub group: Option<String>,
    pub field: String,
}

impl HeaderKey {
    pub fn base(field: impl Into<String>) -> Self {
        Self {
            group: None,
            field: field.into(),
        }
    }

    pub fn grouped(group: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            group: Some(group.into()),
            field: field.into(),
        }
    }

    /// Zip the group row and the field row into one key per column
    pub fn from_rows(groups: &[CellValue], fields: &[CellValue]) -> Vec<HeaderKey> {
        let width = groups.len().max(fields.len());
        let mut current: Option<String> = None;
        let mut keys = Vec::with_capacity(width);

        for col in 0..width {
            let group = header_text(groups.get(col));
            let field = header_text(fields.get(col));

            let key = match (group.is_empty(), field.is_empty()) {
                (false, true) => {
                    current = None;
                    HeaderKey::base(group)
                }
                (false, false) => {
                    current = Some(group.clone());
                    HeaderKey::grouped(group, field)
                }
                (true, false) => match &current {
                    Some(group) => HeaderKey::grouped(group.clone(), field),
                    None => HeaderKey::base(field),
                },
                // Unlabelled column: named by its letter so names stay unique
                (true, true) => {
                    let letters = u16::try_from(col)
                        .map(CellAddress::column_to_letters)
                        .unwrap_or_else(|_| col.to_string());
                    HeaderKey::base(format!("COLUMN {}", letters))
                }
            };
            keys.push(key);
        }

        keys
    }

    pub fn is_base(&self) -> bool {
        self.group.is_none()
    }
}

impl fmt::Display for HeaderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            Some(group) => write!(f, "{} / {}", group, self.field),
            None => f.write_str(&self.field),
        }
    }
}

fn header_text(value: Option<&CellValue>) -> String {
    value.map(|v| v.to_string().trim().to_string()).unwrap_or_default()
}

/// One upload column and the name it is known by after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedColumn {
    pub source: HeaderKey,
    pub name: String,
    /// Canonical supplier name when the group matched a requested supplier
    pub supplier: Option<String>,
    /// Which supplier group of the sheet (0-based, left to right) the column belongs to
    pub group_index: Option<usize>,
}

impl MappedColumn {
    pub fn kind(&self) -> ColumnKind {
        match self.supplier {
            Some(_) => ColumnKind::of(&self.name),
            None if self.source.is_base() => ColumnKind::of(&self.name),
            None => ColumnKind::Other,
        }
    }
}

/// Consecutive columns sharing one supplier label
struct GroupRun {
    label: String,
    index: usize,
    supplier: Option<String>,
    fields: HashSet<String>,
}

/// Explicit mapping from upload headers to canonical column names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: Vec<MappedColumn>,
}

impl ColumnMapping {
    /// Match every supplier group against the requested suppliers
    ///
    /// A group is a run of columns with the same label; a repeated field
    /// (a second `UP`) starts a new group even under the same label.
    /// Matched groups become `{supplier}_{FIELD}` using the caller's spelling
    /// of the supplier. Each supplier matches at most one group; later groups
    /// with the same label stay unmatched. Unmatched groups keep
    /// `{group}_{field}` as written in the sheet, suffixed with `_2`, `_3`, ...
    /// when that name is already in use.
    pub fn build(keys: &[HeaderKey], suppliers: &SupplierList) -> Self {
        let mut claimed: HashSet<String> = HashSet::new();
        let mut used: HashSet<String> = HashSet::new();
        let mut current: Option<GroupRun> = None;
        let mut group_count = 0;
        let mut columns = Vec::with_capacity(keys.len());

        for key in keys {
            let (name, supplier, group_index) = match &key.group {
                None => {
                    current = None;
                    (key.field.clone(), None, None)
                }
                Some(label) => {
                    let field = key.field.to_uppercase();
                    let mut run = match current.take() {
                        Some(run) if run.label == *label && !run.fields.contains(&field) => run,
                        _ => {
                            let run = start_group(label, group_count, suppliers, &mut claimed);
                            group_count += 1;
                            run
                        }
                    };
                    run.fields.insert(field.clone());

                    let name = match &run.supplier {
                        Some(supplier) => format!("{}_{}", supplier, field),
                        None => format!("{}_{}", label, key.field),
                    };
                    let mapped = (name, run.supplier.clone(), Some(run.index));
                    current = Some(run);
                    mapped
                }
            };

            let name = unique_name(name, &mut used);
            debug!("column '{}' -> '{}'", key, name);
            columns.push(MappedColumn {
                source: key.clone(),
                name,
                supplier,
                group_index,
            });
        }

        Self { columns }
    }

    pub fn columns(&self) -> &[MappedColumn] {
        &self.columns
    }

    /// Canonical names, in sheet order
    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Label of every supplier group in the sheet, left to right
    ///
    /// A label used by two groups appears twice.
    pub fn groups(&self) -> Vec<&str> {
        self.group_heads().map(|c| c.source.group.as_deref().unwrap_or_default()).collect()
    }

    /// Labels of the groups that matched no requested supplier
    pub fn unmatched_groups(&self) -> Vec<String> {
        self.group_heads()
            .filter(|c| c.supplier.is_none())
            .filter_map(|c| c.source.group.clone())
            .collect()
    }

    /// First column of each supplier group
    fn group_heads(&self) -> impl Iterator<Item = &MappedColumn> + '_ {
        let mut last = None;
        self.columns.iter().filter(move |c| match c.group_index {
            Some(index) if last != Some(index) => {
                last = Some(index);
                true
            }
            _ => false,
        })
    }
}

fn start_group(
    label: &str,
    index: usize,
    suppliers: &SupplierList,
    claimed: &mut HashSet<String>,
) -> GroupRun {
    let supplier = match suppliers.find_ignore_case(label) {
        Some(supplier) if claimed.insert(supplier.to_string()) => Some(supplier.to_string()),
        Some(supplier) => {
            debug!("group '{}' repeats supplier '{}'; left unmatched", label, supplier);
            None
        }
        None => None,
    };
    GroupRun {
        label: label.to_string(),
        index,
        supplier,
        fields: HashSet::new(),
    }
}

/// `name`, or `name_2`, `name_3`, ... if already taken
fn unique_name(name: String, used: &mut HashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", name, n);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(cells: &[&str]) -> Vec<CellValue> {
        cells
            .iter()
            .map(|c| if c.is_empty() { CellValue::Empty } else { CellValue::from(*c) })
            .collect()
    }

    #[test]
    fn test_from_rows_forward_fills_groups() {
        let keys = HeaderKey::from_rows(
            &row(&["ITEM CODE", "DESCRIPTION", "QTY", "Acme", "", "Globex", ""]),
            &row(&["", "", "", "UP", "AVAILABLE", "UP", "AVAILABLE"]),
        );
        assert_eq!(
            keys,
            vec![
                HeaderKey::base("ITEM CODE"),
                HeaderKey::base("DESCRIPTION"),
                HeaderKey::base("QTY"),
                HeaderKey::grouped("Acme", "UP"),
                HeaderKey::grouped("Acme", "AVAILABLE"),
                HeaderKey::grouped("Globex", "UP"),
                HeaderKey::grouped("Globex", "AVAILABLE"),
            ]
        );
    }

    #[test]
    fn test_from_rows_base_in_second_row() {
        let keys = HeaderKey::from_rows(&row(&["", "Acme"]), &row(&["QTY", "UP"]));
        assert_eq!(keys, vec![HeaderKey::base("QTY"), HeaderKey::grouped("Acme", "UP")]);
    }

    #[test]
    fn test_from_rows_unlabelled_column() {
        let keys = HeaderKey::from_rows(&row(&["ITEM CODE", ""]), &row(&["", ""]));
        assert_eq!(keys[1], HeaderKey::base("COLUMN B"));
    }

    #[test]
    fn test_mapping_matches_case_insensitively() {
        let keys = vec![
            HeaderKey::base("QTY"),
            HeaderKey::grouped("ACME", "UP"),
            HeaderKey::grouped("ACME", "AVAILABLE"),
        ];
        let mapping = ColumnMapping::build(&keys, &SupplierList::parse("Acme"));
        assert_eq!(mapping.names(), ["QTY", "Acme_UP", "Acme_AVAILABLE"]);
        assert_eq!(mapping.columns()[1].supplier.as_deref(), Some("Acme"));
        assert_eq!(mapping.columns()[1].kind(), ColumnKind::UnitPrice);
        assert!(mapping.unmatched_groups().is_empty());
    }

    #[test]
    fn test_mapping_keeps_unmatched_groups() {
        let keys = vec![
            HeaderKey::grouped("Supplier 1", "UP"),
            HeaderKey::grouped("Supplier 1", "AVAILABLE"),
            HeaderKey::grouped("Acme", "UP"),
        ];
        let mapping = ColumnMapping::build(&keys, &SupplierList::parse("Acme, Globex"));
        assert_eq!(mapping.names(), ["Supplier 1_UP", "Supplier 1_AVAILABLE", "Acme_UP"]);
        assert_eq!(mapping.columns()[0].kind(), ColumnKind::Other);
        assert_eq!(mapping.groups(), ["Supplier 1", "Acme"]);
        assert_eq!(mapping.unmatched_groups(), ["Supplier 1"]);
    }

    #[test]
    fn test_mapping_identical_labels() {
        let keys = vec![
            HeaderKey::base("QTY"),
            HeaderKey::grouped("Acme", "UP"),
            HeaderKey::grouped("Acme", "AVAILABLE"),
            HeaderKey::grouped("Acme", "UP"),
            HeaderKey::grouped("Acme", "AVAILABLE"),
        ];
        let mapping = ColumnMapping::build(&keys, &SupplierList::parse("Acme"));
        assert_eq!(
            mapping.names(),
            ["QTY", "Acme_UP", "Acme_AVAILABLE", "Acme_UP_2", "Acme_AVAILABLE_2"]
        );
        assert_eq!(mapping.columns()[3].supplier, None);
        assert_eq!(mapping.columns()[3].group_index, Some(1));
        assert_eq!(mapping.groups(), ["Acme", "Acme"]);
        assert_eq!(mapping.unmatched_groups(), ["Acme"]);
    }

    #[test]
    fn test_mapping_duplicate_group_left_unmatched() {
        let keys = vec![HeaderKey::grouped("Acme", "UP"), HeaderKey::grouped("ACME", "UP")];
        let mapping = ColumnMapping::build(&keys, &SupplierList::parse("Acme"));
        assert_eq!(mapping.names(), ["Acme_UP", "ACME_UP"]);
        assert_eq!(mapping.unmatched_groups(), ["ACME"]);
    }
}
