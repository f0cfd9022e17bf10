//! Placement outcome types.
//!
//! Expected absences (an unmatched slot usually means "no labs today for this
//! patient") are tagged values, not errors, so callers and tests can assert on
//! the reason directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a destination slot was passed over without writing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Worksheet title is on the ignore list (administrative or template
    /// sheets).
    Ignored,
    /// No worksheet with this slot id exists in the workbook.
    MissingWorksheet,
    /// The roster binds no patient to this slot.
    NoRosterEntry,
    /// The roster name matched no extracted patient after normalization.
    NameNotMatched { roster_name: String },
    /// The patient matched but has no consolidated rows to write.
    NoConsolidatedData { patient: String },
    /// Reading the worksheet to find the append offset failed.
    ReadFailed { message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Ignored => write!(f, "on the ignore list"),
            SkipReason::MissingWorksheet => write!(f, "worksheet not found"),
            SkipReason::NoRosterEntry => write!(f, "no roster entry"),
            SkipReason::NameNotMatched { roster_name } => {
                write!(f, "no extracted record matches '{roster_name}'")
            }
            SkipReason::NoConsolidatedData { patient } => {
                write!(f, "no consolidated data for '{patient}'")
            }
            SkipReason::ReadFailed { message } => {
                write!(f, "worksheet read failed: {message}")
            }
        }
    }
}

/// Outcome of one destination slot within a placement run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotOutcome {
    /// Rows were appended. Individual row-write failures are collected on the
    /// report and do not change the tag, so `rows` can be lower than the
    /// number of consolidated records for the patient.
    Written { rows: usize },
    Skipped(SkipReason),
}

/// Result of one placement run over the destination workbook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacementReport {
    /// Outcome per visited slot, in slot order.
    pub slots: Vec<(String, SlotOutcome)>,
    /// Row-level write failures the run continued past.
    pub errors: Vec<String>,
}

impl PlacementReport {
    /// Worksheets where the append offset was resolved and rows were
    /// attempted.
    pub fn worksheets_processed(&self) -> usize {
        self.slots
            .iter()
            .filter(|(_, outcome)| matches!(outcome, SlotOutcome::Written { .. }))
            .count()
    }

    /// Rows successfully appended across all worksheets.
    pub fn rows_written(&self) -> usize {
        self.slots
            .iter()
            .map(|(_, outcome)| match outcome {
                SlotOutcome::Written { rows } => *rows,
                SlotOutcome::Skipped(_) => 0,
            })
            .sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.slots.len() - self.worksheets_processed()
    }

    pub fn outcome(&self, slot_id: &str) -> Option<&SlotOutcome> {
        self.slots
            .iter()
            .find(|(slot, _)| slot == slot_id)
            .map(|(_, outcome)| outcome)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
