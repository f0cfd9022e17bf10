//! Search patterns for the census lab panel.
//!
//! One hand-tuned pattern per analyte, kept in a single table so the calcium
//! disambiguation stays reviewable in one place. Patterns are case-insensitive
//! and let `.` cross newlines, because the report layout puts labels and
//! result values on separate lines.

use std::sync::LazyLock;

use regex::Regex;

use censo_model::Analyte;

/// A compiled analyte matcher.
pub(crate) struct AnalytePattern {
    pub(crate) analyte: Analyte,
    regex: Regex,
    /// Checked anchored at each candidate match position; a hit rejects the
    /// position and the scan resumes past it. Stands in for negative
    /// lookahead, which the regex engine does not support: the generic
    /// calcium label must not swallow "CÁLCIO IÔNICO".
    guard: Option<Regex>,
}

impl AnalytePattern {
    /// First captured value in `text` at a position the guard allows.
    pub(crate) fn first_value(&self, text: &str) -> Option<String> {
        let mut at = 0;
        while let Some(caps) = self.regex.captures_at(text, at) {
            let whole = caps.get(0)?;
            if let Some(guard) = &self.guard {
                if guard.is_match(&text[whole.start()..]) {
                    let step = text[whole.start()..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
                    at = whole.start() + step;
                    continue;
                }
            }
            return caps.get(1).map(|group| group.as_str().to_string());
        }
        None
    }
}

fn pattern(analyte: Analyte, re: &str) -> AnalytePattern {
    AnalytePattern {
        analyte,
        regex: Regex::new(re).unwrap(),
        guard: None,
    }
}

/// The panel's search patterns, in extraction order.
pub(crate) static ANALYTE_PATTERNS: LazyLock<Vec<AnalytePattern>> = LazyLock::new(|| {
    vec![
        pattern(Analyte::Creatinina, r"(?is)CREATININA.*?\n.*?([\d,\.]+)"),
        pattern(Analyte::Ureia, r"(?is)UREIA.*?\n.*?([\d,\.]+)"),
        pattern(Analyte::Bicarbonato, r"(?is)BICARBONATO.*?\n.*?([\d,\.]+)"),
        pattern(Analyte::Sodio, r"(?is)S[ÓO]DIO.*?\n.*?([\d,\.]+)"),
        pattern(Analyte::Potassio, r"(?is)POT[ÁA]SSIO.*?\n.*?([\d,\.]+)"),
        pattern(
            Analyte::Magnesio,
            r"(?is)MAGN[ÉE]SIO.*?RESULTADO\s*:? *([\d,\.]+)",
        ),
        AnalytePattern {
            analyte: Analyte::Calcio,
            regex: Regex::new(r"(?is)C[ÁA]LCIO\s*.*?RESULTADO\s*:? *([\d,\.]+)").unwrap(),
            guard: Some(Regex::new(r"(?is)\AC[ÁA]LCIO\s*(?:IONICO|I[ÔO]NICO)").unwrap()),
        },
        pattern(
            Analyte::CalcioIonico,
            r"(?is)C[ÁA]LCIO I[ÔO]NICO.*?RESULTADO\s*:? *([\d,\.]+)",
        ),
        pattern(Analyte::Fosforo, r"(?is)F[ÓO]SFORO.*?\n.*?([\d,\.]+)"),
        pattern(Analyte::Hemoglobina, r"(?is)HEMOGLOBINA\s*:\s*([\d,\.]+)"),
        pattern(Analyte::Plaquetas, r"(?is)PLAQUETAS.*?:\s*([\d,\.]+)"),
        pattern(
            Analyte::ProteinaCReativa,
            r"(?is)PROTE[ÍI]NA C REATIVA.*?([\d,\.]+)",
        ),
    ]
});
