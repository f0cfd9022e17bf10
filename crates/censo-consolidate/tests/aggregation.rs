//! Bucketing and per-field consolidation behavior.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime};

use censo_consolidate::{aggregate, default_cutoff, filter_by_dates};
use censo_model::{Analyte, RawReportRecord};

fn record(name: &str, timestamp: &str, pairs: &[(Analyte, &str)]) -> RawReportRecord {
    let mut values: BTreeMap<Analyte, String> = Analyte::ALL
        .iter()
        .map(|analyte| (*analyte, String::new()))
        .collect();
    for (analyte, value) in pairs {
        values.insert(*analyte, (*value).to_string());
    }
    RawReportRecord {
        patient_name: name.to_string(),
        sample_timestamp: Some(
            NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M").unwrap(),
        ),
        values,
    }
}

fn day(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

#[test]
fn late_evening_sample_rolls_into_next_census_day() {
    let records = vec![
        record("João Da Silva", "2024-01-10 23:00", &[(Analyte::Ureia, "98")]),
        record("João Da Silva", "2024-01-10 08:00", &[(Analyte::Ureia, "120")]),
    ];

    let consolidated = aggregate(&records, Some(day("2024-01-11")), default_cutoff());

    // The 23:00 sample is at or past the 11:30 cutoff and counts toward the
    // 11th; the 08:00 sample stays on the 10th and is out of scope.
    assert_eq!(consolidated.len(), 1);
    assert_eq!(consolidated[0].day, day("2024-01-11"));
    assert_eq!(consolidated[0].values[&Analyte::Ureia].as_deref(), Some("98"));
}

#[test]
fn cutoff_boundary_is_inclusive() {
    let records = vec![record(
        "João Da Silva",
        "2024-01-10 11:30",
        &[(Analyte::Creatinina, "2.1")],
    )];

    let consolidated = aggregate(&records, Some(day("2024-01-11")), default_cutoff());
    assert_eq!(consolidated.len(), 1);
}

#[test]
fn max_and_last_policies_apply_per_field() {
    let records = vec![
        record(
            "João Da Silva",
            "2024-01-10 06:00",
            &[(Analyte::Potassio, "4.0"), (Analyte::Hemoglobina, "10.0")],
        ),
        record(
            "João Da Silva",
            "2024-01-10 09:00",
            &[(Analyte::Potassio, "5.5"), (Analyte::Hemoglobina, "9.0")],
        ),
    ];

    let consolidated = aggregate(&records, Some(day("2024-01-10")), default_cutoff());

    assert_eq!(consolidated.len(), 1);
    let values = &consolidated[0].values;
    assert_eq!(values[&Analyte::Potassio].as_deref(), Some("5.5"));
    assert_eq!(values[&Analyte::Hemoglobina].as_deref(), Some("9.0"));
}

#[test]
fn last_policy_skips_records_missing_the_analyte() {
    let records = vec![
        record(
            "João Da Silva",
            "2024-01-10 06:00",
            &[(Analyte::Plaquetas, "231000")],
        ),
        record(
            "João Da Silva",
            "2024-01-10 09:00",
            &[(Analyte::Potassio, "4.8")],
        ),
    ];

    let consolidated = aggregate(&records, None, default_cutoff());

    let values = &consolidated[0].values;
    assert_eq!(values[&Analyte::Plaquetas].as_deref(), Some("231000"));
}

#[test]
fn unparsable_values_become_none_not_zero() {
    let records = vec![record(
        "João Da Silva",
        "2024-01-10 09:00",
        &[(Analyte::Sodio, "indeterminado"), (Analyte::Ureia, "")],
    )];

    let consolidated = aggregate(&records, None, default_cutoff());

    let values = &consolidated[0].values;
    assert_eq!(values[&Analyte::Sodio], None);
    assert_eq!(values[&Analyte::Ureia], None);
}

#[test]
fn max_ignores_unparsable_readings() {
    let records = vec![
        record("João Da Silva", "2024-01-10 06:00", &[(Analyte::Sodio, "hemolisado")]),
        record("João Da Silva", "2024-01-10 09:00", &[(Analyte::Sodio, "141")]),
    ];

    let consolidated = aggregate(&records, None, default_cutoff());
    assert_eq!(consolidated[0].values[&Analyte::Sodio].as_deref(), Some("141"));
}

#[test]
fn calcium_marker_survives_consolidation() {
    let records = vec![record(
        "João Da Silva",
        "2024-01-10 09:00",
        &[(Analyte::Calcio, "8.9 (total)")],
    )];

    let consolidated = aggregate(&records, None, default_cutoff());
    assert_eq!(
        consolidated[0].values[&Analyte::Calcio].as_deref(),
        Some("8.9 (total)")
    );
}

#[test]
fn records_without_timestamp_are_dropped() {
    let mut no_timestamp = record("João Da Silva", "2024-01-10 09:00", &[]);
    no_timestamp.sample_timestamp = None;

    let consolidated = aggregate(&[no_timestamp], None, default_cutoff());
    assert!(consolidated.is_empty());
}

#[test]
fn without_reference_day_records_group_by_own_date() {
    let records = vec![
        record("João Da Silva", "2024-01-09 23:45", &[(Analyte::Ureia, "90")]),
        record("João Da Silva", "2024-01-10 09:00", &[(Analyte::Ureia, "98")]),
        record("Maria Souza", "2024-01-10 10:00", &[(Analyte::Ureia, "55")]),
    ];

    let consolidated = aggregate(&records, None, default_cutoff());

    // One bucket per (patient, date), ordered by patient then day; the
    // evening record keeps its own date because no cutoff rule applies.
    assert_eq!(consolidated.len(), 3);
    assert_eq!(consolidated[0].patient_name, "João Da Silva");
    assert_eq!(consolidated[0].day, day("2024-01-09"));
    assert_eq!(consolidated[1].day, day("2024-01-10"));
    assert_eq!(consolidated[2].patient_name, "Maria Souza");
}

#[test]
fn one_consolidated_record_per_patient_and_day() {
    let records = vec![
        record("João Da Silva", "2024-01-09 23:45", &[(Analyte::Creatinina, "2.1")]),
        record("João Da Silva", "2024-01-10 09:00", &[(Analyte::Creatinina, "2.31")]),
        record("João Da Silva", "2024-01-10 11:00", &[(Analyte::Creatinina, "1.9")]),
    ];

    let consolidated = aggregate(&records, Some(day("2024-01-10")), default_cutoff());

    assert_eq!(consolidated.len(), 1);
    assert_eq!(
        consolidated[0].values[&Analyte::Creatinina].as_deref(),
        Some("2.31")
    );
}

#[test]
fn date_filter_restricts_records_before_grouping() {
    let records = vec![
        record("João Da Silva", "2024-01-09 10:00", &[(Analyte::Ureia, "90")]),
        record("João Da Silva", "2024-01-10 10:00", &[(Analyte::Ureia, "98")]),
    ];
    let mut wanted = BTreeSet::new();
    wanted.insert(day("2024-01-10"));

    let filtered = filter_by_dates(records, &wanted);

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].sample_date(), Some(day("2024-01-10")));
}
