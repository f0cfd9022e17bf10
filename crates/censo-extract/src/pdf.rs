use std::path::Path;

use crate::error::{ExtractError, Result};

/// Extracts the full text of a report PDF, pages concatenated in order.
///
/// The extractor's own error type carries no path, so it is flattened into a
/// message here; callers treat any failure as "skip this file".
pub fn read_report_text(path: &Path) -> Result<String> {
    pdf_extract::extract_text(path).map_err(|err| ExtractError::PdfText {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
