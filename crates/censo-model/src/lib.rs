pub mod analytes;
pub mod lookup;
pub mod record;
pub mod report;
pub mod roster;

pub use analytes::{AggregationPolicy, Analyte, TOTAL_CALCIUM_MARKER};
pub use lookup::{NameLookup, normalize_name};
pub use record::{ConsolidatedRecord, RawReportRecord};
pub use report::{PlacementReport, SkipReason, SlotOutcome};
pub use roster::{RosterEntry, parse_roster};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_round_trips_through_json() {
        let report = PlacementReport {
            slots: vec![
                ("01".to_string(), SlotOutcome::Written { rows: 1 }),
                (
                    "02".to_string(),
                    SlotOutcome::Skipped(SkipReason::NameNotMatched {
                        roster_name: "Maria Souza".to_string(),
                    }),
                ),
            ],
            errors: vec![],
        };
        let json = serde_json::to_string(&report).expect("serialize report");
        let round: PlacementReport = serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(round.rows_written(), 1);
        assert_eq!(round.outcome("02"), report.outcome("02"));
    }

    #[test]
    fn panel_labels_are_unique() {
        let mut labels: Vec<&str> = Analyte::ALL.iter().map(Analyte::as_str).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Analyte::ALL.len());
    }
}
