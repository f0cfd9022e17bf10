use serde::{Deserialize, Serialize};

/// One row of the census roster: a destination worksheet slot bound to a
/// patient. The roster is read fresh at the start of every placement run and
/// never cached, since admissions change it between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Two-digit worksheet identifier, `"01"` through `"70"`.
    pub slot_id: String,
    /// Patient name as the ward spells it; matched against extracted names
    /// after normalization.
    pub canonical_name: String,
}

/// Extracts roster entries from a rectangular block of cell values.
///
/// Column 1 holds the slot identifier and column 4 the patient name; rows
/// missing either are skipped rather than reported, since the roster sheet
/// keeps blank rows for unoccupied beds.
pub fn parse_roster(rows: &[Vec<String>]) -> Vec<RosterEntry> {
    let mut entries = Vec::new();
    for row in rows {
        let slot = row.first().map(|cell| cell.trim()).unwrap_or_default();
        let name = row.get(3).map(|cell| cell.trim()).unwrap_or_default();
        if slot.is_empty() || name.is_empty() {
            continue;
        }
        entries.push(RosterEntry {
            slot_id: slot.to_string(),
            canonical_name: name.to_string(),
        });
    }
    entries
}
