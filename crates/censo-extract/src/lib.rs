mod patterns;

pub mod discovery;
pub mod error;
pub mod extract;
pub mod pdf;
pub mod source;

pub use discovery::{ExtractionBatch, extract_directory, list_report_files};
pub use error::{ExtractError, Result};
pub use extract::{UNKNOWN_PATIENT, extract_report};
pub use pdf::read_report_text;
pub use source::{LocalDirectorySource, ReportSource};
