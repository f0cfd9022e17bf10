//! CLI argument definitions for the census pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use censo_sheets::DEFAULT_ROSTER_SHEET;

#[derive(Parser)]
#[command(
    name = "censo",
    version,
    about = "Censo Renal - Consolidate dialysis lab reports into the census workbook",
    long_about = "Extract laboratory results from nephrology report PDFs, consolidate\n\
                  them into one row per patient and census day, and append those rows\n\
                  to the matching bed worksheets of the census workbook."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Log patient names as-is instead of redacting them.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract report PDFs, consolidate and fill the census workbook.
    Run(RunArgs),

    /// Extract report PDFs to a CSV without touching any workbook.
    Extract(ExtractArgs),

    /// List the tracked analytes with aggregation rule and column.
    Analytes,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Directory containing the laboratory report PDFs.
    #[arg(value_name = "PDF_DIR")]
    pub pdf_dir: PathBuf,

    /// Census workbook file to update.
    #[arg(long = "workbook", value_name = "FILE")]
    pub workbook: PathBuf,

    /// Census day every result should land on (default: each sample's own day).
    #[arg(long = "census-day", value_name = "DD/MM/YYYY")]
    pub census_day: Option<String>,

    /// Time of day after which samples roll over to the next census day.
    #[arg(long = "cutoff", value_name = "HH:MM", default_value = "11:30")]
    pub cutoff: String,

    /// Comma-separated sample days (DD/MM/YYYY) to keep; others are dropped.
    #[arg(long = "dates", value_name = "DAYS")]
    pub dates: Option<String>,

    /// Worksheet holding the bed roster.
    #[arg(long = "roster-sheet", value_name = "NAME", default_value = DEFAULT_ROSTER_SHEET)]
    pub roster_sheet: String,

    /// Additional worksheet title to leave untouched (repeatable).
    #[arg(long = "ignore", value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Also write every extracted record to this CSV.
    #[arg(long = "raw-csv", value_name = "FILE")]
    pub raw_csv: Option<PathBuf>,

    /// Also write the consolidated rows to this CSV.
    #[arg(long = "consolidated-csv", value_name = "FILE")]
    pub consolidated_csv: Option<PathBuf>,

    /// Report what would be written without saving the workbook.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Directory containing the laboratory report PDFs.
    #[arg(value_name = "PDF_DIR")]
    pub pdf_dir: PathBuf,

    /// CSV file to write the extracted records to.
    #[arg(long = "csv", value_name = "FILE")]
    pub csv: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
