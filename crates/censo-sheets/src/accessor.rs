//! Worksheet access abstraction and the JSON-backed workbook.
//!
//! Row and column references are 1-based throughout, the way sheet ranges are
//! written: row 1 is the header row, column 1 is `A`.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};

/// Read/write surface a placement run needs from the destination workbook.
///
/// Each call stands for what would be a remote call against a hosted
/// spreadsheet, so every one can fail; callers decide whether a failure
/// abandons the row, the slot, or the run.
pub trait WorksheetAccessor {
    /// Titles of every worksheet in the workbook.
    fn worksheet_titles(&self) -> Result<Vec<String>>;

    /// All cell values of a worksheet in row-major order, with trailing
    /// all-empty rows trimmed so `rows.len() + 1` is the next free row.
    fn read_all(&self, title: &str) -> Result<Vec<Vec<String>>>;

    /// Writes a single cell.
    fn write_cell(&mut self, title: &str, row: u32, column: u32, value: &str) -> Result<()>;

    /// Writes a run of cells left to right starting at `start_column`.
    fn write_row(
        &mut self,
        title: &str,
        row: u32,
        start_column: u32,
        values: &[String],
    ) -> Result<()>;
}

/// Workbook held in memory and persisted as a JSON file.
///
/// The file maps worksheet titles to row-major cell grids; it can be
/// inspected or edited by hand between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryWorkbook {
    sheets: BTreeMap<String, Vec<Vec<String>>>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a worksheet, replacing any existing one with the same title.
    pub fn insert_sheet(&mut self, title: impl Into<String>, rows: Vec<Vec<String>>) {
        self.sheets.insert(title.into(), rows);
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SheetError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source,
        })?;
        let workbook: Self = serde_json::from_str(&text).map_err(|source| SheetError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            sheets = workbook.sheets.len(),
            "workbook loaded"
        );
        Ok(workbook)
    }

    /// Saves through a temp file and rename, so a failed write cannot
    /// truncate the existing workbook.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).map_err(|source| SheetError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SheetError::Io {
                operation: "create directory for",
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let temp_path = path.with_extension("json.tmp");
        let mut file = File::create(&temp_path).map_err(|source| SheetError::Io {
            operation: "create",
            path: temp_path.clone(),
            source,
        })?;
        file.write_all(text.as_bytes())
            .map_err(|source| SheetError::Io {
                operation: "write",
                path: temp_path.clone(),
                source,
            })?;
        file.sync_all().map_err(|source| SheetError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, path).map_err(|source| SheetError::Io {
            operation: "rename",
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("saved workbook to {}", path.display());
        Ok(())
    }

    fn sheet(&self, title: &str) -> Result<&Vec<Vec<String>>> {
        self.sheets
            .get(title)
            .ok_or_else(|| SheetError::WorksheetNotFound {
                title: title.to_string(),
            })
    }

    fn sheet_mut(&mut self, title: &str) -> Result<&mut Vec<Vec<String>>> {
        self.sheets
            .get_mut(title)
            .ok_or_else(|| SheetError::WorksheetNotFound {
                title: title.to_string(),
            })
    }
}

fn grid_index(row: u32, column: u32) -> Result<(usize, usize)> {
    match (row.checked_sub(1), column.checked_sub(1)) {
        (Some(row_index), Some(column_index)) => Ok((row_index as usize, column_index as usize)),
        _ => Err(SheetError::InvalidReference { row, column }),
    }
}

fn set_cell(sheet: &mut Vec<Vec<String>>, row_index: usize, column_index: usize, value: &str) {
    if sheet.len() <= row_index {
        sheet.resize_with(row_index + 1, Vec::new);
    }
    let row = &mut sheet[row_index];
    if row.len() <= column_index {
        row.resize_with(column_index + 1, String::new);
    }
    row[column_index] = value.to_string();
}

impl WorksheetAccessor for MemoryWorkbook {
    fn worksheet_titles(&self) -> Result<Vec<String>> {
        Ok(self.sheets.keys().cloned().collect())
    }

    fn read_all(&self, title: &str) -> Result<Vec<Vec<String>>> {
        let sheet = self.sheet(title)?;
        let occupied = sheet
            .iter()
            .rposition(|row| row.iter().any(|cell| !cell.is_empty()))
            .map_or(0, |last| last + 1);
        Ok(sheet[..occupied].to_vec())
    }

    fn write_cell(&mut self, title: &str, row: u32, column: u32, value: &str) -> Result<()> {
        let (row_index, column_index) = grid_index(row, column)?;
        let sheet = self.sheet_mut(title)?;
        set_cell(sheet, row_index, column_index, value);
        Ok(())
    }

    fn write_row(
        &mut self,
        title: &str,
        row: u32,
        start_column: u32,
        values: &[String],
    ) -> Result<()> {
        let (row_index, start_index) = grid_index(row, start_column)?;
        let sheet = self.sheet_mut(title)?;
        for (offset, value) in values.iter().enumerate() {
            set_cell(sheet, row_index, start_index + offset, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| (*cell).to_string()).collect()
    }

    #[test]
    fn read_all_trims_trailing_empty_rows_only() {
        let mut workbook = MemoryWorkbook::new();
        workbook.insert_sheet(
            "01",
            vec![
                row(&["Data", "", "Leito"]),
                row(&["", ""]),
                row(&["10/01/2024"]),
                row(&[]),
                row(&["", "", ""]),
            ],
        );
        let rows = workbook.read_all("01").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], row(&["", ""]));
    }

    #[test]
    fn writes_grow_the_grid() {
        let mut workbook = MemoryWorkbook::new();
        workbook.insert_sheet("01", Vec::new());

        workbook.write_cell("01", 5, 1, "10/01/2024").unwrap();
        workbook.write_row("01", 5, 8, &row(&["2.31", "98"])).unwrap();

        let rows = workbook.read_all("01").unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4][0], "10/01/2024");
        assert_eq!(rows[4][7], "2.31");
        assert_eq!(rows[4][8], "98");
    }

    #[test]
    fn unknown_worksheet_is_an_error() {
        let mut workbook = MemoryWorkbook::new();
        assert!(matches!(
            workbook.read_all("03"),
            Err(SheetError::WorksheetNotFound { .. })
        ));
        assert!(matches!(
            workbook.write_cell("03", 1, 1, "x"),
            Err(SheetError::WorksheetNotFound { .. })
        ));
    }

    #[test]
    fn zero_based_references_are_rejected() {
        let mut workbook = MemoryWorkbook::new();
        workbook.insert_sheet("01", Vec::new());
        assert!(matches!(
            workbook.write_cell("01", 0, 1, "x"),
            Err(SheetError::InvalidReference { .. })
        ));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("workbook.json");

        let mut workbook = MemoryWorkbook::new();
        workbook.insert_sheet("CENSO AUTOMÁTICO", vec![row(&["Leito"])]);
        workbook.insert_sheet("01", vec![row(&["Data"])]);
        workbook.save(&path).unwrap();

        let loaded = MemoryWorkbook::load(&path).unwrap();
        assert_eq!(loaded, workbook);
        assert_eq!(
            loaded.worksheet_titles().unwrap(),
            vec!["01".to_string(), "CENSO AUTOMÁTICO".to_string()]
        );
    }

    #[test]
    fn load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("workbook.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            MemoryWorkbook::load(&path),
            Err(SheetError::Format { .. })
        ));
    }
}
