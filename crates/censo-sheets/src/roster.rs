//! Roster worksheet reading.

use censo_model::{RosterEntry, parse_roster};
use tracing::debug;

use crate::accessor::WorksheetAccessor;
use crate::error::Result;

/// Worksheet the ward keeps the bed census on.
pub const DEFAULT_ROSTER_SHEET: &str = "CENSO AUTOMÁTICO";

/// Data rows below the header, one per destination slot.
pub const ROSTER_DATA_ROWS: usize = 70;

/// Reads the slot-to-patient roster from `sheet`.
///
/// Row 1 is the header; the 70 rows below it carry the slot id in column 1
/// and the patient name in column 4. Read fresh at the start of every
/// placement run, never cached, since admissions change it between runs.
pub fn read_roster(workbook: &impl WorksheetAccessor, sheet: &str) -> Result<Vec<RosterEntry>> {
    let rows = workbook.read_all(sheet)?;
    let data = rows.get(1..).unwrap_or_default();
    let data = &data[..data.len().min(ROSTER_DATA_ROWS)];
    let entries = parse_roster(data);
    debug!(sheet, entries = entries.len(), "roster read");
    Ok(entries)
}
