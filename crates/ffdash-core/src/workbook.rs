//! Spreadsheet loader
//!
//! Opens a workbook (xlsx, xlsm, xlsb, xls or ods, chosen by extension) and
//! turns a named sheet into header-keyed rows:
//!
//! - the first row of the sheet's used range is the header row
//! - empty cells are left out of the row, fully empty rows are skipped
//! - repeated headers get a `_1`, `_2`, ... suffix
//! - date cells become their spreadsheet serial number

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};

use crate::error::{IngestError, IngestResult};
use crate::models::{CellValue, RawRow};

/// An open workbook
pub struct Workbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl std::fmt::Debug for Workbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbook")
            .field("path", &self.path)
            .field("sheets", &self.sheet_names())
            .finish()
    }
}

impl Workbook {
    /// Open a workbook file
    pub fn open(path: impl AsRef<Path>) -> IngestResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IngestError::FileNotFound(path.to_path_buf()));
        }

        let sheets = open_workbook_auto(path)
            .map_err(|e| IngestError::WorkbookParse(format!("{}: {}", path.display(), e)))?;

        Ok(Self {
            path: path.to_path_buf(),
            sheets,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names().iter().any(|n| n == name)
    }

    /// Rows of the named sheet, or `None` if the workbook has no such sheet
    pub fn sheet_rows(&mut self, name: &str) -> IngestResult<Option<Vec<RawRow>>> {
        if !self.has_sheet(name) {
            return Ok(None);
        }

        let range = self.sheets.worksheet_range(name).map_err(|e| {
            IngestError::WorkbookParse(format!("{} [{}]: {}", self.path.display(), name, e))
        })?;

        Ok(Some(rows_from_range(&range)))
    }
}

/// Convert a sheet range into header-keyed rows
pub fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };

    let headers = header_names(header_row);

    rows.filter_map(|cells| {
        let row: RawRow = cells
            .iter()
            .zip(headers.iter())
            .filter_map(|(cell, header)| {
                let header = header.as_ref()?;
                cell_value(cell).map(|value| (header.clone(), value))
            })
            .collect();
        (!row.is_empty()).then_some(row)
    })
    .collect()
}

/// Header text per column; `None` for columns with an empty header cell
fn header_names(cells: &[Data]) -> Vec<Option<String>> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    cells
        .iter()
        .map(|cell| {
            let name = match cell_value(cell)? {
                CellValue::Text(s) => s.trim().to_string(),
                other => other.to_string(),
            };
            if name.is_empty() {
                return None;
            }

            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{}_{}", name, count)
            };
            *count += 1;
            Some(unique)
        })
        .collect()
}

/// Cell contents as a loosely-typed value; `None` for empty and error cells
pub fn cell_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Int(v) => Some(CellValue::Int(*v)),
        Data::Float(v) => Some(CellValue::Float(*v)),
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Bool(v) => Some(CellValue::Bool(*v)),
        Data::DateTime(dt) => Some(CellValue::Float(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
        Data::Error(e) => {
            tracing::debug!(error = ?e, "Skipping cell with spreadsheet error value");
            None
        }
        Data::Empty => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::Workbook as XlsxWorkbook;

    fn write_fixture(dir: &Path) -> PathBuf {
        let path = dir.join("fixture.xlsx");
        let mut workbook = XlsxWorkbook::new();
        {
            let sheet = workbook.add_worksheet();
            sheet.set_name("weekly_results").unwrap();
            sheet.write_string(0, 0, "Year").unwrap();
            sheet.write_string(0, 1, "Coach").unwrap();
            sheet.write_string(0, 2, "Points").unwrap();
            sheet.write_string(0, 3, "Coach").unwrap();
            sheet.write_number(1, 0, 2023.0).unwrap();
            sheet.write_string(1, 1, "X").unwrap();
            sheet.write_number(1, 2, 101.25).unwrap();
            // row 2 left blank
            sheet.write_number(3, 0, 2024.0).unwrap();
            sheet.write_string(3, 3, "dup").unwrap();
        }
        {
            let sheet = workbook.add_worksheet();
            sheet.set_name("other").unwrap();
            sheet.write_string(0, 0, "ignored").unwrap();
        }
        workbook.save(&path).unwrap();
        path
    }

    #[test]
    fn test_open_missing_file() {
        let err = Workbook::open("/nonexistent/fantasy.xlsx").unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound(_)));
    }

    #[test]
    fn test_open_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.xlsx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        let err = Workbook::open(&path).unwrap_err();
        assert!(matches!(err, IngestError::WorkbookParse(_)));
    }

    #[test]
    fn test_sheet_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path());

        let mut workbook = Workbook::open(&path).unwrap();
        assert!(workbook.has_sheet("weekly_results"));
        assert!(!workbook.has_sheet("coach_lookup"));

        let rows = workbook.sheet_rows("weekly_results").unwrap().unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].get("Year"), Some(&CellValue::Float(2023.0)));
        assert_eq!(rows[0].get("Coach"), Some(&CellValue::from("X")));
        assert_eq!(rows[0].get("Points"), Some(&CellValue::Float(101.25)));
        assert_eq!(rows[0].len(), 3);

        assert_eq!(rows[1].get("Year"), Some(&CellValue::Float(2024.0)));
        assert_eq!(rows[1].get("Coach"), None);
        assert_eq!(rows[1].get("Coach_1"), Some(&CellValue::from("dup")));
    }

    #[test]
    fn test_absent_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path());

        let mut workbook = Workbook::open(&path).unwrap();
        assert_eq!(workbook.sheet_rows("coach_lookup").unwrap(), None);
    }

    #[test]
    fn test_cell_value_conversion() {
        assert_eq!(cell_value(&Data::Empty), None);
        assert_eq!(cell_value(&Data::String(String::new())), None);
        assert_eq!(cell_value(&Data::Int(7)), Some(CellValue::Int(7)));
        assert_eq!(
            cell_value(&Data::String("W".into())),
            Some(CellValue::from("W"))
        );
        assert_eq!(cell_value(&Data::Bool(true)), Some(CellValue::Bool(true)));
    }
}
