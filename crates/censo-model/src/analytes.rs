use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix appended to a generic calcium reading when no ionic measurement is
/// present, so total and ionized calcium stay distinguishable downstream.
pub const TOTAL_CALCIUM_MARKER: &str = " (total)";

/// One analyte of the fixed nephrology census panel.
///
/// `CalcioIonico` exists only during extraction: when its pattern matches, the
/// value replaces the generic calcium reading, and it never reaches the
/// consolidated output or the destination sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Analyte {
    Creatinina,
    Ureia,
    Bicarbonato,
    Sodio,
    Potassio,
    Magnesio,
    Calcio,
    CalcioIonico,
    Fosforo,
    Hemoglobina,
    Plaquetas,
    ProteinaCReativa,
}

/// How multiple readings of one analyte within a single census-day bucket
/// collapse into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationPolicy {
    /// Highest reading of the bucket; the worst value of the day is the
    /// actionable one.
    Max,
    /// Reading of the chronologically last report in the bucket; the row
    /// should reflect the most recent measurement.
    Last,
}

impl AggregationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationPolicy::Max => "max",
            AggregationPolicy::Last => "last",
        }
    }
}

impl Analyte {
    /// Every analyte with a search pattern, in extraction order.
    pub const ALL: [Analyte; 12] = [
        Analyte::Creatinina,
        Analyte::Ureia,
        Analyte::Bicarbonato,
        Analyte::Sodio,
        Analyte::Potassio,
        Analyte::Magnesio,
        Analyte::Calcio,
        Analyte::CalcioIonico,
        Analyte::Fosforo,
        Analyte::Hemoglobina,
        Analyte::Plaquetas,
        Analyte::ProteinaCReativa,
    ];

    /// The analyte block of a census row, in destination column order.
    pub const OUTPUT: [Analyte; 11] = [
        Analyte::Creatinina,
        Analyte::Ureia,
        Analyte::Bicarbonato,
        Analyte::Sodio,
        Analyte::Potassio,
        Analyte::Magnesio,
        Analyte::Calcio,
        Analyte::Fosforo,
        Analyte::Hemoglobina,
        Analyte::Plaquetas,
        Analyte::ProteinaCReativa,
    ];

    /// Label as it appears on reports and sheet headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Analyte::Creatinina => "Creatinina",
            Analyte::Ureia => "Ureia",
            Analyte::Bicarbonato => "Bicarbonato",
            Analyte::Sodio => "Sódio",
            Analyte::Potassio => "Potássio",
            Analyte::Magnesio => "Magnésio",
            Analyte::Calcio => "Cálcio",
            Analyte::CalcioIonico => "Cálcio Iônico",
            Analyte::Fosforo => "Fósforo",
            Analyte::Hemoglobina => "Hemoglobina",
            Analyte::Plaquetas => "Plaquetas",
            Analyte::ProteinaCReativa => "Proteína C Reativa",
        }
    }

    /// Consolidation rule for this analyte. Ionic calcium is folded into
    /// `Calcio` before aggregation, so its policy is never consulted.
    pub fn policy(&self) -> AggregationPolicy {
        match self {
            Analyte::Bicarbonato | Analyte::Hemoglobina | Analyte::Plaquetas => {
                AggregationPolicy::Last
            }
            _ => AggregationPolicy::Max,
        }
    }

    /// Destination column letter on a census worksheet, `None` for the
    /// extraction-only ionic calcium.
    pub fn destination_column(&self) -> Option<char> {
        Analyte::OUTPUT
            .iter()
            .position(|analyte| analyte == self)
            .map(|index| (b'H' + index as u8) as char)
    }
}

impl fmt::Display for Analyte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_panel_excludes_ionic_calcium() {
        assert!(!Analyte::OUTPUT.contains(&Analyte::CalcioIonico));
        assert!(Analyte::ALL.contains(&Analyte::CalcioIonico));
        assert_eq!(Analyte::OUTPUT.len(), Analyte::ALL.len() - 1);
    }

    #[test]
    fn last_policy_covers_exactly_three_analytes() {
        let last: Vec<Analyte> = Analyte::OUTPUT
            .iter()
            .copied()
            .filter(|analyte| analyte.policy() == AggregationPolicy::Last)
            .collect();
        assert_eq!(
            last,
            vec![Analyte::Bicarbonato, Analyte::Hemoglobina, Analyte::Plaquetas]
        );
    }

    #[test]
    fn destination_columns_span_h_through_r() {
        assert_eq!(Analyte::Creatinina.destination_column(), Some('H'));
        assert_eq!(Analyte::ProteinaCReativa.destination_column(), Some('R'));
        assert_eq!(Analyte::CalcioIonico.destination_column(), None);
    }
}
