//! Numeric reading of extracted value strings.

/// Finite numeric reading of an extracted value: the leading run of digits
/// and periods, parsed as `f64`. Trailing text (units the pattern captured
/// around, the total-calcium marker) is ignored. Returns `None` for empty,
/// non-numeric, or non-finite readings, so a value that cannot be compared
/// can never masquerade as zero.
pub fn read_leading_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(trimmed.len());
    let token = &trimmed[..end];
    if token.is_empty() {
        return None;
    }
    let parsed: f64 = token.parse().ok()?;
    parsed.is_finite().then_some(parsed)
}
