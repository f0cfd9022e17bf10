//! Census-day bucketing and per-field consolidation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use censo_model::{AggregationPolicy, Analyte, ConsolidatedRecord, RawReportRecord};

use crate::numeric::read_leading_f64;

/// Census cutoff used when no override is given: a sample received at or
/// after this time the evening before counts toward the next census day.
pub fn default_cutoff() -> NaiveTime {
    NaiveTime::from_hms_opt(11, 30, 0).expect("fixed census cutoff")
}

/// Collapses raw report records into one row per (patient, census day).
///
/// Records without a timestamp are dropped up front. With a `reference_day`,
/// only records attributable to that day survive (its own date, or the
/// evening before at or past `cutoff`) and all buckets carry the reference
/// day; without one, records group by their own calendar date. Output is
/// ordered by (patient, day).
pub fn aggregate(
    records: &[RawReportRecord],
    reference_day: Option<NaiveDate>,
    cutoff: NaiveTime,
) -> Vec<ConsolidatedRecord> {
    let mut buckets: BTreeMap<(String, NaiveDate), Vec<&RawReportRecord>> = BTreeMap::new();
    let mut without_timestamp = 0usize;
    let mut out_of_window = 0usize;

    for record in records {
        let Some(timestamp) = record.sample_timestamp else {
            without_timestamp += 1;
            continue;
        };
        let Some(day) = bucket_day(timestamp, reference_day, cutoff) else {
            out_of_window += 1;
            continue;
        };
        buckets
            .entry((record.patient_name.clone(), day))
            .or_default()
            .push(record);
    }

    debug!(
        records = records.len(),
        without_timestamp,
        out_of_window,
        buckets = buckets.len(),
        "grouped records into census buckets"
    );

    buckets
        .into_iter()
        .map(|((patient_name, day), mut group)| {
            group.sort_by_key(|record| record.sample_timestamp);
            consolidate_bucket(patient_name, day, &group)
        })
        .collect()
}

/// Keeps only records sampled on one of the given days. Applied before
/// per-date aggregation for ad-hoc multi-date exports.
pub fn filter_by_dates(
    records: Vec<RawReportRecord>,
    dates: &BTreeSet<NaiveDate>,
) -> Vec<RawReportRecord> {
    records
        .into_iter()
        .filter(|record| {
            record
                .sample_date()
                .is_some_and(|date| dates.contains(&date))
        })
        .collect()
}

fn bucket_day(
    timestamp: NaiveDateTime,
    reference_day: Option<NaiveDate>,
    cutoff: NaiveTime,
) -> Option<NaiveDate> {
    let date = timestamp.date();
    match reference_day {
        Some(reference) => {
            let same_day = date == reference;
            let late_previous_evening =
                date.succ_opt() == Some(reference) && timestamp.time() >= cutoff;
            (same_day || late_previous_evening).then_some(reference)
        }
        None => Some(date),
    }
}

fn consolidate_bucket(
    patient_name: String,
    day: NaiveDate,
    group: &[&RawReportRecord],
) -> ConsolidatedRecord {
    let mut values = BTreeMap::new();
    for analyte in Analyte::OUTPUT {
        let value = match analyte.policy() {
            AggregationPolicy::Max => max_reading(analyte, group),
            AggregationPolicy::Last => last_reading(analyte, group),
        };
        values.insert(analyte, value);
    }
    ConsolidatedRecord {
        patient_name,
        day,
        values,
    }
}

/// Highest parseable reading in the bucket, kept as its source string so
/// precision and the total-calcium marker survive. Ties keep the earliest
/// record's text.
fn max_reading(analyte: Analyte, group: &[&RawReportRecord]) -> Option<String> {
    let mut best: Option<(f64, &str)> = None;
    for record in group {
        let Some(text) = record.values.get(&analyte) else {
            continue;
        };
        let Some(number) = read_leading_f64(text) else {
            continue;
        };
        if best.is_none_or(|(current, _)| number > current) {
            best = Some((number, text));
        }
    }
    best.map(|(_, text)| text.to_string())
}

/// Reading of the chronologically last record in the bucket that carries a
/// parseable value for this analyte.
fn last_reading(analyte: Analyte, group: &[&RawReportRecord]) -> Option<String> {
    group.iter().rev().find_map(|record| {
        let text = record.values.get(&analyte)?;
        read_leading_f64(text).map(|_| text.clone())
    })
}
