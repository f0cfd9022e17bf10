//! Report text parsing.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use censo_model::{Analyte, RawReportRecord, TOTAL_CALCIUM_MARKER};

use crate::patterns::ANALYTE_PATTERNS;

/// Sentinel patient name when a report has no recognizable name header.
pub const UNKNOWN_PATIENT: &str = "Paciente Desconhecido";

/// The all-caps patient name sits on the line directly above the "Nome:"
/// label. The class covers Portuguese uppercase so accented names survive
/// whole, and stays within one line so earlier all-caps header lines are not
/// swallowed into the name.
static NAME_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*([A-ZÁÀÂÃÉÊÍÓÔÕÚÜÇ][A-ZÁÀÂÃÉÊÍÓÔÕÚÜÇ ]*)\nNome\s*:").unwrap()
});

static RECEIVED_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Amostra recebida em:\s*(\d{2}/\d{2}/\d{4})\s*[àa]s\s*(\d{1,2})h\s*(\d{1,2})min")
        .unwrap()
});

/// Parses one report's text into a raw record.
///
/// Total over any input: a missing name becomes the sentinel, a missing or
/// unparsable reception time becomes `None`, and missed analyte patterns
/// become empty strings. Nothing here errors, so a bad report can never
/// abort a batch.
pub fn extract_report(text: &str) -> RawReportRecord {
    RawReportRecord {
        patient_name: extract_name(text),
        sample_timestamp: extract_timestamp(text),
        values: extract_values(text),
    }
}

fn extract_name(text: &str) -> String {
    NAME_LINE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|group| title_case(group.as_str()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_PATIENT.to_string())
}

/// Reception timestamp from the fixed phrase
/// `Amostra recebida em: DD/MM/YYYY às HHh MMmin`. Any absent or invalid
/// component yields `None`; a record without a timestamp cannot be bucketed.
fn extract_timestamp(text: &str) -> Option<NaiveDateTime> {
    let caps = RECEIVED_AT.captures(text)?;
    let date = NaiveDate::parse_from_str(caps.get(1)?.as_str(), "%d/%m/%Y").ok()?;
    let hour: u32 = caps.get(2)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(3)?.as_str().parse().ok()?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(date.and_time(time))
}

fn extract_values(text: &str) -> BTreeMap<Analyte, String> {
    let mut values = BTreeMap::new();
    for pattern in ANALYTE_PATTERNS.iter() {
        let value = pattern
            .first_value(text)
            .map(|raw| raw.replace(',', "."))
            .unwrap_or_default();
        values.insert(pattern.analyte, value);
    }
    apply_calcium_tiebreak(&mut values);
    values
}

/// An ionic measurement supersedes the generic calcium reading outright; a
/// generic reading alone is tagged with the total-fraction marker so the two
/// measurements stay distinguishable downstream.
fn apply_calcium_tiebreak(values: &mut BTreeMap<Analyte, String>) {
    let ionic = values
        .get(&Analyte::CalcioIonico)
        .cloned()
        .unwrap_or_default();
    if !ionic.is_empty() {
        values.insert(Analyte::Calcio, ionic);
    } else if let Some(generic) = values.get_mut(&Analyte::Calcio) {
        if !generic.is_empty() {
            generic.push_str(TOTAL_CALCIUM_MARKER);
        }
    }
}

/// Word-by-word title casing, whitespace collapsed to single spaces:
/// `JOÃO DA SILVA` becomes `João Da Silva`.
fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_handles_accents_and_spacing() {
        assert_eq!(title_case("JOÃO DA SILVA"), "João Da Silva");
        assert_eq!(title_case("  MARIA   JOSÉ "), "Maria José");
        assert_eq!(title_case("ANTÔNIO"), "Antônio");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn timestamp_requires_both_date_and_time() {
        assert!(extract_timestamp("Amostra recebida em: 10/01/2024 às 14h 30min").is_some());
        assert!(extract_timestamp("Amostra recebida em: 10/01/2024").is_none());
        assert!(extract_timestamp("sem cabeçalho").is_none());
    }

    #[test]
    fn timestamp_rejects_impossible_values() {
        assert!(extract_timestamp("Amostra recebida em: 32/01/2024 às 14h 30min").is_none());
        assert!(extract_timestamp("Amostra recebida em: 10/01/2024 às 25h 00min").is_none());
    }

    #[test]
    fn timestamp_accepts_unaccented_preposition() {
        let ts = extract_timestamp("Amostra recebida em: 09/01/2024 as 23h 45min").unwrap();
        assert_eq!(ts.to_string(), "2024-01-09 23:45:00");
    }
}
