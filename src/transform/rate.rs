/// Parse an approval rate written with a comma decimal separator ("87,3").
///
/// Anything that is not a number in `[0, 100]` after the separator swap
/// (blank cells, "-", "ND", thousands-grouped text, NaN) yields `None`.
pub fn parse_localized_rate(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let v: f64 = s.replace(',', ".").parse().ok()?;
    (v.is_finite() && (0.0..=100.0).contains(&v)).then_some(v)
}
