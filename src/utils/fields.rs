//! Field normalisation shared by the stores and the export transform.

/// Trim a free-text value; empty, whitespace-only and the literal `NAN`
/// (any case) collapse to the empty string.
pub fn clean_blank(value: &str, upper: bool) -> String {
    let s = value.trim();
    if s.eq_ignore_ascii_case("nan") {
        return String::new();
    }
    if upper {
        s.to_uppercase()
    } else {
        s.to_string()
    }
}

/// Canonical job area: all-digit values are zero-padded to three digits,
/// everything else passes through trimmed.
///
/// `"7"` → `"007"`, `"12"` → `"012"`, `"A7"` → `"A7"`, `"1234"` → `"1234"`.
pub fn pad_job_area(value: &str) -> String {
    let s = value.trim();
    if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
        // strip leading zeros first so "0007" and "7" agree
        let digits = s.trim_start_matches('0');
        let digits = if digits.is_empty() { "0" } else { digits };
        format!("{:0>3}", digits)
    } else {
        s.to_string()
    }
}

/// Hours are never negative and never NaN/infinite.
pub fn coerce_hours(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse an hours cell; anything unparseable is `0.0`.
pub fn parse_hours(raw: &str) -> f64 {
    let s = clean_blank(raw, false);
    s.parse::<f64>().map(coerce_hours).unwrap_or(0.0)
}

/// Parse an optional hours cell: blank is `None`, garbage is `Some(0.0)`.
pub fn parse_optional_hours(raw: &str) -> Option<f64> {
    let s = clean_blank(raw, false);
    if s.is_empty() {
        None
    } else {
        Some(parse_hours(&s))
    }
}
