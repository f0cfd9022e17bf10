//! Row placement into destination worksheets.
//!
//! Each patient worksheet is append-only: the next free row is computed once
//! per slot and advanced per row written within the run. Nothing tracks the
//! cursor across runs, so two concurrent runs against one workbook can
//! overwrite each other; callers serialize runs.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use censo_model::{
    Analyte, ConsolidatedRecord, NameLookup, PlacementReport, RosterEntry, SkipReason, SlotOutcome,
};
use tracing::{debug, warn};

use crate::accessor::WorksheetAccessor;
use crate::error::Result;

/// Destination slots are the two-digit worksheets `"01"` through `"70"`.
pub const SLOT_COUNT: u32 = 70;

/// Administrative and template worksheets excluded from placement.
pub const DEFAULT_IGNORED_SHEETS: [&str; 3] = ["CENSO AUTOMÁTICO", "Modelo - Evoluções", "Modelo"];

/// Column holding the census day, `A`.
const DATE_COLUMN: u32 = 1;

/// First column of the analyte block, `H`.
const BLOCK_START_COLUMN: u32 = 8;

#[derive(Debug, Clone)]
pub struct PlacementOptions {
    /// Worksheet titles never written to.
    pub ignored_sheets: Vec<String>,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            ignored_sheets: DEFAULT_IGNORED_SHEETS
                .iter()
                .map(|sheet| (*sheet).to_string())
                .collect(),
        }
    }
}

impl PlacementOptions {
    fn is_ignored(&self, title: &str) -> bool {
        self.ignored_sheets.iter().any(|sheet| sheet == title)
    }
}

/// Appends consolidated rows to the worksheets named by the roster.
///
/// Walks every slot in order. A slot that cannot be resolved (missing
/// worksheet, no roster entry, roster name unmatched) is recorded and
/// skipped; an unmatched name usually just means no labs were collected for
/// that patient, so none of these stop the run. Read and write failures on
/// one slot or row are reported and the run moves on.
///
/// `progress` receives `(processed, resolvable)` after each slot whose rows
/// were attempted, where `resolvable` counts the slot worksheets that exist.
pub fn place(
    consolidated: &[ConsolidatedRecord],
    roster: &[RosterEntry],
    workbook: &mut impl WorksheetAccessor,
    options: &PlacementOptions,
    mut progress: impl FnMut(usize, usize),
) -> Result<PlacementReport> {
    let lookup = NameLookup::build(consolidated.iter().map(|record| record.patient_name.as_str()));
    let mut by_patient: BTreeMap<&str, Vec<&ConsolidatedRecord>> = BTreeMap::new();
    for record in consolidated {
        by_patient
            .entry(record.patient_name.as_str())
            .or_default()
            .push(record);
    }
    let roster_names: HashMap<&str, &str> = roster
        .iter()
        .map(|entry| (entry.slot_id.as_str(), entry.canonical_name.as_str()))
        .collect();

    let titles: BTreeSet<String> = workbook.worksheet_titles()?.into_iter().collect();
    let slot_ids: Vec<String> = (1..=SLOT_COUNT).map(|number| format!("{number:02}")).collect();
    let resolvable = slot_ids
        .iter()
        .filter(|slot_id| titles.contains(slot_id.as_str()))
        .count();

    let mut report = PlacementReport::default();
    let mut processed = 0;

    for slot_id in slot_ids {
        if !titles.contains(slot_id.as_str()) {
            debug!(slot = %slot_id, "slot worksheet missing");
            report
                .slots
                .push((slot_id, SlotOutcome::Skipped(SkipReason::MissingWorksheet)));
            continue;
        }
        if options.is_ignored(&slot_id) {
            debug!(slot = %slot_id, "slot on the ignore list");
            report
                .slots
                .push((slot_id, SlotOutcome::Skipped(SkipReason::Ignored)));
            continue;
        }
        let Some(roster_name) = roster_names.get(slot_id.as_str()).copied() else {
            debug!(slot = %slot_id, "no roster entry");
            report
                .slots
                .push((slot_id, SlotOutcome::Skipped(SkipReason::NoRosterEntry)));
            continue;
        };
        let Some(patient) = lookup.get(roster_name) else {
            debug!(slot = %slot_id, "roster name matched no extracted record");
            report.slots.push((
                slot_id,
                SlotOutcome::Skipped(SkipReason::NameNotMatched {
                    roster_name: roster_name.to_string(),
                }),
            ));
            continue;
        };
        let Some(records) = by_patient.get(patient) else {
            report.slots.push((
                slot_id,
                SlotOutcome::Skipped(SkipReason::NoConsolidatedData {
                    patient: patient.to_string(),
                }),
            ));
            continue;
        };

        let rows = match workbook.read_all(&slot_id) {
            Ok(rows) => rows,
            Err(err) => {
                warn!(slot = %slot_id, error = %err, "worksheet read failed");
                report.errors.push(format!("worksheet {slot_id}: {err}"));
                report.slots.push((
                    slot_id,
                    SlotOutcome::Skipped(SkipReason::ReadFailed {
                        message: err.to_string(),
                    }),
                ));
                continue;
            }
        };

        // The cursor advances only past rows that landed, so a failed row
        // does not leave a hole in the worksheet.
        let mut cursor = rows.len() as u32 + 1;
        let mut written = 0usize;
        for record in records {
            let date = record.formatted_day();
            let block = analyte_block(record);
            let outcome = workbook
                .write_cell(&slot_id, cursor, DATE_COLUMN, &date)
                .and_then(|()| workbook.write_row(&slot_id, cursor, BLOCK_START_COLUMN, &block));
            match outcome {
                Ok(()) => {
                    cursor += 1;
                    written += 1;
                }
                Err(err) => {
                    warn!(slot = %slot_id, row = cursor, error = %err, "row write failed");
                    report
                        .errors
                        .push(format!("worksheet {slot_id} row {cursor}: {err}"));
                }
            }
        }

        debug!(slot = %slot_id, rows = written, "slot updated");
        report
            .slots
            .push((slot_id, SlotOutcome::Written { rows: written }));
        processed += 1;
        progress(processed, resolvable);
    }

    Ok(report)
}

/// The twelve cells written from column H on: the eleven destination
/// analytes in panel order plus a trailing blank clearing the last column of
/// the block.
fn analyte_block(record: &ConsolidatedRecord) -> Vec<String> {
    let mut block: Vec<String> = Analyte::OUTPUT
        .iter()
        .map(|analyte| match record.values.get(analyte) {
            Some(Some(value)) => cell_text(value),
            _ => String::new(),
        })
        .collect();
    block.push(String::new());
    block
}

/// Blanks the literal `nan` marker; anything else is written verbatim.
fn cell_text(value: &str) -> String {
    if value.trim().eq_ignore_ascii_case("nan") {
        String::new()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn consolidated(pairs: &[(Analyte, &str)]) -> ConsolidatedRecord {
        let mut values: BTreeMap<Analyte, Option<String>> = Analyte::OUTPUT
            .iter()
            .map(|analyte| (*analyte, None))
            .collect();
        for (analyte, value) in pairs {
            values.insert(*analyte, Some((*value).to_string()));
        }
        ConsolidatedRecord {
            patient_name: "João Da Silva".to_string(),
            day: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            values,
        }
    }

    #[test]
    fn block_is_twelve_cells_in_panel_order() {
        let record = consolidated(&[
            (Analyte::Creatinina, "2.31"),
            (Analyte::ProteinaCReativa, "12.4"),
        ]);
        let block = analyte_block(&record);
        assert_eq!(block.len(), 12);
        assert_eq!(block[0], "2.31");
        assert_eq!(block[10], "12.4");
        assert_eq!(block[11], "");
    }

    #[test]
    fn literal_nan_cells_are_blanked() {
        let record = consolidated(&[(Analyte::Ureia, "NaN"), (Analyte::Sodio, "141")]);
        let block = analyte_block(&record);
        assert_eq!(block[1], "");
        assert_eq!(block[3], "141");
    }
}
