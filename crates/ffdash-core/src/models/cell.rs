//! Loosely-typed spreadsheet cells and header-keyed rows

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// A single non-empty spreadsheet cell
///
/// Values keep whatever type the workbook reader inferred; nothing is coerced
/// on the way into the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// Empty text counts as a missing value
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(v) => f.write_str(v),
            CellValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v.into())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

/// One spreadsheet row keyed by column header
///
/// Empty cells are simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: HashMap<String, CellValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value under a header, replacing any previous value
    pub fn insert(&mut self, header: impl Into<String>, value: CellValue) {
        self.cells.insert(header.into(), value);
    }

    /// Builder-style insert
    pub fn with(mut self, header: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(header, value.into());
        self
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells.get(header)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text() {
        assert!(CellValue::from("").is_blank());
        assert!(!CellValue::from("W").is_blank());
        assert!(!CellValue::Int(0).is_blank());
    }

    #[test]
    fn test_cell_display() {
        let joined = [
            CellValue::Int(2023),
            CellValue::Float(101.5),
            CellValue::from("Regular"),
        ]
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("|");
        assert_eq!(joined, "2023|101.5|Regular");
    }

    #[test]
    fn test_raw_row_builder() {
        let row = RawRow::new().with("Year", 2023).with("coach", "X");
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("Year"), Some(&CellValue::Int(2023)));
        assert_eq!(row.get("year"), None);
    }
}
