use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

use crate::analytes::Analyte;

/// One parsed laboratory report, before consolidation.
///
/// Values are the raw matched strings with the decimal comma already rewritten
/// to a period: an empty string means the pattern did not match, anything else
/// is kept verbatim so callers can tell "absent" from "found but unparsable".
#[derive(Debug, Clone, PartialEq)]
pub struct RawReportRecord {
    pub patient_name: String,
    /// Sample reception time. `None` when the report carries no parseable
    /// date and time, which excludes the record from consolidation.
    pub sample_timestamp: Option<NaiveDateTime>,
    pub values: BTreeMap<Analyte, String>,
}

impl RawReportRecord {
    /// Calendar date of the sample, when known.
    pub fn sample_date(&self) -> Option<NaiveDate> {
        self.sample_timestamp.map(|ts| ts.date())
    }

    /// True when every analyte pattern missed.
    pub fn is_empty(&self) -> bool {
        self.values.values().all(|value| value.is_empty())
    }
}

/// One (patient, census day) row after aggregation.
///
/// Keyed by the output panel. A `Some` value is the winning report's own text,
/// guaranteed to have a finite leading decimal reading, so source precision
/// and the total-calcium marker survive into the destination sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidatedRecord {
    pub patient_name: String,
    pub day: NaiveDate,
    pub values: BTreeMap<Analyte, Option<String>>,
}

impl ConsolidatedRecord {
    /// Day formatted for the destination sheet and exports.
    pub fn formatted_day(&self) -> String {
        self.day.format("%d/%m/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn sample_date_drops_time_component() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let record = RawReportRecord {
            patient_name: "Maria Souza".to_string(),
            sample_timestamp: Some(day.and_time(NaiveTime::from_hms_opt(23, 45, 0).unwrap())),
            values: BTreeMap::new(),
        };
        assert_eq!(record.sample_date(), Some(day));
        assert!(record.is_empty());
    }

    #[test]
    fn day_formats_for_the_sheet() {
        let record = ConsolidatedRecord {
            patient_name: "Maria Souza".to_string(),
            day: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            values: BTreeMap::new(),
        };
        assert_eq!(record.formatted_day(), "05/01/2024");
    }
}
