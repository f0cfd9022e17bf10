use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("report directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },
    #[error("failed to read report directory {}: {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to extract text from {}: {message}", .path.display())]
    PdfText { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
