use std::path::PathBuf;

use censo_model::PlacementReport;

#[derive(Debug)]
pub struct RunResult {
    pub pdf_dir: PathBuf,
    pub workbook: PathBuf,
    pub files_seen: usize,
    pub records_extracted: usize,
    pub consolidated_rows: usize,
    pub roster_entries: usize,
    pub report: PlacementReport,
    pub raw_csv: Option<PathBuf>,
    pub consolidated_csv: Option<PathBuf>,
    pub errors: Vec<String>,
    pub dry_run: bool,
    pub has_errors: bool,
}

#[derive(Debug)]
pub struct ExtractResult {
    pub pdf_dir: PathBuf,
    pub csv: PathBuf,
    pub files_seen: usize,
    pub records_extracted: usize,
    pub errors: Vec<String>,
    pub has_errors: bool,
}
