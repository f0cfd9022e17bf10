//! Acquisition seam.
//!
//! The portal robot that logs in and downloads reports lives out of tree;
//! the pipeline depends only on this trait. The destination directory travels
//! as an argument and the realized path comes back as the return value, so no
//! shared mutable configuration is involved.

use std::path::{Path, PathBuf};

use crate::error::{ExtractError, Result};

/// Produces report PDFs for the named patients under `dest` and returns the
/// directory the files actually landed in.
pub trait ReportSource {
    fn acquire(&self, patients: &[String], dest: &Path) -> Result<PathBuf>;
}

/// Source for reports that are already on local storage: validates the
/// directory and hands it back unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDirectorySource;

impl ReportSource for LocalDirectorySource {
    fn acquire(&self, _patients: &[String], dest: &Path) -> Result<PathBuf> {
        if !dest.is_dir() {
            return Err(ExtractError::DirectoryNotFound {
                path: dest.to_path_buf(),
            });
        }
        Ok(dest.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn local_source_returns_existing_directory() {
        let dir = TempDir::new().unwrap();
        let source = LocalDirectorySource;
        let realized = source.acquire(&[], dir.path()).unwrap();
        assert_eq!(realized, dir.path());
    }

    #[test]
    fn local_source_rejects_missing_directory() {
        let source = LocalDirectorySource;
        let err = source
            .acquire(&["João Da Silva".to_string()], Path::new("/no/such/dir"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::DirectoryNotFound { .. }));
    }
}
