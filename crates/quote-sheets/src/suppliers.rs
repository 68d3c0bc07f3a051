//! The caller-owned, ordered list of supplier names.
//!
//! Names are trimmed, blank entries are ignored and exact duplicates are
//! dropped. Matching against sheet labels is case-insensitive; the first
//! name in the list wins when several differ only by case.

/// Ordered, deduplicated supplier names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierList {
    names: Vec<String>,
}

impl SupplierList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse free-form input where names are separated by commas or newlines
    ///
    /// # Example
    ///
    /// ```rust
    /// use quote_sheets::SupplierList;
    ///
    /// let list = SupplierList::parse("Acme, Globex\nInitech,, Acme");
    /// assert_eq!(list.names(), ["Acme", "Globex", "Initech"]);
    /// ```
    pub fn parse(input: &str) -> Self {
        let mut list = Self::new();
        list.extend_from_input(input);
        list
    }

    /// Append every name found in `input`, returning how many were new
    pub fn extend_from_input(&mut self, input: &str) -> usize {
        input
            .split(|c: char| c == ',' || c == '\n' || c == '\r')
            .filter(|name| self.add(*name))
            .count()
    }

    /// Add a single name; returns false for blanks and duplicates
    pub fn add(&mut self, name: impl AsRef<str>) -> bool {
        let name = name.as_ref().trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// Remove the name at `index`
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.names.len() {
            Some(self.names.remove(index))
        } else {
            None
        }
    }

    /// Remove a name by exact match
    pub fn remove_name(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| n == name.trim()) {
            Some(index) => {
                self.names.remove(index);
                true
            }
            None => false,
        }
    }

    /// Exact membership test
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Canonical name matching `label` case-insensitively
    pub fn find_ignore_case(&self, label: &str) -> Option<&str> {
        let label = label.trim().to_lowercase();
        self.names
            .iter()
            .find(|n| n.to_lowercase() == label)
            .map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}

impl<S: AsRef<str>> FromIterator<S> for SupplierList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for name in iter {
            list.add(name);
        }
        list
    }
}

impl<'a> IntoIterator for &'a SupplierList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
