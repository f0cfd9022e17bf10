//! Pipeline stages wiring extraction, consolidation and placement together.
//!
//! Each stage runs inside its own tracing span and reports counts and
//! duration when it finishes. The command layer composes stages; the stages
//! themselves stay free of terminal concerns.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info, info_span, trace};

use censo_consolidate::{aggregate, filter_by_dates};
use censo_extract::{ExtractionBatch, LocalDirectorySource, ReportSource, extract_directory};
use censo_model::{ConsolidatedRecord, PlacementReport, RawReportRecord};
use censo_sheets::{PlacementOptions, WorksheetAccessor, place, read_roster};

use crate::logging::redact_value;

/// Day format used on the command line, in workbook date cells, and in the
/// CSV exports.
pub const DAY_FORMAT: &str = "%d/%m/%Y";

const CUTOFF_FORMAT: &str = "%H:%M";

/// Parses a `DD/MM/YYYY` day as given on the command line.
///
/// # Errors
///
/// Returns an error when the value does not parse as a calendar day.
pub fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DAY_FORMAT)
        .with_context(|| format!("invalid date '{value}', expected DD/MM/YYYY"))
}

/// Parses an `HH:MM` rollover cutoff time.
///
/// # Errors
///
/// Returns an error when the value does not parse as a time of day.
pub fn parse_cutoff(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), CUTOFF_FORMAT)
        .with_context(|| format!("invalid cutoff time '{value}', expected HH:MM"))
}

/// Parses a comma-separated list of `DD/MM/YYYY` days. Empty items are
/// skipped so trailing commas are harmless.
pub fn parse_dates(value: &str) -> Result<BTreeSet<NaiveDate>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_day)
        .collect()
}

/// Resolves the directory holding the report PDFs through the acquisition
/// seam. Reports are expected on local storage already; a remote
/// [`ReportSource`] downloading them per patient lives out of tree.
///
/// # Errors
///
/// Returns an error when the directory does not exist.
pub fn acquire_stage(pdf_dir: &Path) -> Result<PathBuf> {
    let realized = LocalDirectorySource
        .acquire(&[], pdf_dir)
        .with_context(|| format!("locate report directory {}", pdf_dir.display()))?;
    debug!(dir = %realized.display(), "report directory resolved");
    Ok(realized)
}

/// Extracts every report PDF under `pdf_dir`.
///
/// Unreadable files are collected as batch errors; only an unreadable
/// directory fails the stage.
pub fn extract_stage(pdf_dir: &Path) -> Result<ExtractionBatch> {
    info_span!("extract").in_scope(|| {
        let started = Instant::now();
        let batch = extract_directory(pdf_dir)
            .with_context(|| format!("extract reports from {}", pdf_dir.display()))?;

        for record in &batch.records {
            trace!(
                patient = redact_value(&record.patient_name),
                timestamp = ?record.sample_timestamp,
                "record extracted"
            );
        }

        info!(
            files = batch.files_seen(),
            records = batch.records.len(),
            failures = batch.errors.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "extraction complete"
        );
        Ok(batch)
    })
}

/// Consolidates raw records into one row per patient and census day.
///
/// When `dates` is given, records outside those sample days are dropped
/// before grouping.
pub fn consolidate_stage(
    records: Vec<RawReportRecord>,
    reference_day: Option<NaiveDate>,
    cutoff: NaiveTime,
    dates: Option<&BTreeSet<NaiveDate>>,
) -> Vec<ConsolidatedRecord> {
    info_span!("consolidate").in_scope(|| {
        let started = Instant::now();
        let records = match dates {
            Some(dates) => filter_by_dates(records, dates),
            None => records,
        };
        let kept = records.len();
        let consolidated = aggregate(&records, reference_day, cutoff);

        info!(
            records = kept,
            rows = consolidated.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "consolidation complete"
        );
        consolidated
    })
}

/// Outcome of the placement stage.
#[derive(Debug)]
pub struct PlacementStage {
    pub roster_entries: usize,
    pub report: PlacementReport,
}

/// Reads the bed roster and appends consolidated rows to the slot
/// worksheets.
///
/// # Errors
///
/// Returns an error when the roster sheet is missing or unreadable.
/// Per-worksheet failures are collected in the report instead.
pub fn placement_stage(
    consolidated: &[ConsolidatedRecord],
    workbook: &mut impl WorksheetAccessor,
    roster_sheet: &str,
    options: &PlacementOptions,
    progress: impl FnMut(usize, usize),
) -> Result<PlacementStage> {
    info_span!("place", roster_sheet).in_scope(|| {
        let started = Instant::now();
        let roster = read_roster(workbook, roster_sheet)
            .with_context(|| format!("read roster sheet '{roster_sheet}'"))?;
        let report = place(consolidated, &roster, workbook, options, progress)
            .context("place consolidated rows")?;

        info!(
            roster_entries = roster.len(),
            worksheets = report.worksheets_processed(),
            rows = report.rows_written(),
            skipped = report.skipped_count(),
            duration_ms = started.elapsed().as_millis() as u64,
            "placement complete"
        );
        Ok(PlacementStage {
            roster_entries: roster.len(),
            report,
        })
    })
}
