//! Report file discovery and batch extraction.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use censo_model::RawReportRecord;

use crate::error::{ExtractError, Result};
use crate::extract::extract_report;
use crate::pdf::read_report_text;

/// Lists all PDF files in a directory.
///
/// Returns files sorted by filename so batch order is stable across runs.
pub fn list_report_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ExtractError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| ExtractError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| ExtractError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);

        if is_pdf {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// One batch extraction's output: the parsed records plus messages for files
/// that had to be skipped.
#[derive(Debug, Default)]
pub struct ExtractionBatch {
    pub records: Vec<RawReportRecord>,
    /// One message per skipped file; the batch continued past each.
    pub errors: Vec<String>,
}

impl ExtractionBatch {
    pub fn files_seen(&self) -> usize {
        self.records.len() + self.errors.len()
    }
}

/// Extracts every report PDF in `dir`, in filename order.
///
/// A file that cannot be read or parsed is skipped with a warning and no
/// partial record; only an unreadable directory is a hard error.
pub fn extract_directory(dir: &Path) -> Result<ExtractionBatch> {
    let files = list_report_files(dir)?;
    let mut batch = ExtractionBatch::default();

    for path in files {
        match read_report_text(&path) {
            Ok(text) => {
                let record = extract_report(&text);
                debug!(
                    file = %path.display(),
                    matched = record.values.values().filter(|v| !v.is_empty()).count(),
                    "report extracted"
                );
                batch.records.push(record);
            }
            Err(err) => {
                warn!(file = %path.display(), error = %err, "skipping unreadable report");
                batch.errors.push(err.to_string());
            }
        }
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_report_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in &["b.pdf", "a.PDF", "notes.txt", "c.pdf"] {
            std::fs::write(dir.path().join(name), b"placeholder").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.pdf")).unwrap();
        dir
    }

    #[test]
    fn lists_only_pdf_files_sorted_by_name() {
        let dir = create_report_dir();
        let files = list_report_files(dir.path()).unwrap();

        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf", "c.pdf"]);
    }

    #[test]
    fn missing_directory_is_a_hard_error() {
        let err = list_report_files(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, ExtractError::DirectoryNotFound { .. }));
    }

    #[test]
    fn corrupt_files_are_skipped_not_fatal() {
        let dir = create_report_dir();
        let batch = extract_directory(dir.path()).unwrap();

        // None of the placeholder files is a real PDF.
        assert!(batch.records.is_empty());
        assert_eq!(batch.errors.len(), 3);
        assert_eq!(batch.files_seen(), 3);
    }

    #[test]
    fn empty_directory_is_an_empty_batch() {
        let dir = TempDir::new().unwrap();
        let batch = extract_directory(dir.path()).unwrap();
        assert!(batch.records.is_empty());
        assert!(batch.errors.is_empty());
    }
}
