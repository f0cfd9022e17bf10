//! Workbook access errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    /// The requested worksheet title does not exist in the workbook.
    #[error("worksheet not found: {title}")]
    WorksheetNotFound { title: String },

    /// A cell reference used row or column zero; references are 1-based.
    #[error("cell reference out of range: row {row}, column {column}")]
    InvalidReference { row: u32, column: u32 },

    /// Reading or writing the workbook file failed.
    #[error("failed to {operation} workbook file: {}", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workbook file exists but does not hold valid workbook JSON.
    #[error("invalid workbook file: {}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias for workbook operations.
pub type Result<T> = std::result::Result<T, SheetError>;
