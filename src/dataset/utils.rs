/// Header names arrive as `"SalesValue "` or `"date,"` in some exports.
pub fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .trim()
        .trim_end_matches(',')
        .trim_end()
        .to_string()
}

/// Lenient numeric parse: anything that is not a number becomes `None`.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let s = s
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s);
    s.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Render a float the way it reads in the source file, without a trailing `.0`.
pub fn format_number(v: f64) -> String {
    format!("{}", v)
}

/// Strip a trailing `.0` from numeric-looking strings (`"2023.0"` -> `"2023"`).
pub fn display_value(raw: &str) -> String {
    match raw.strip_suffix(".0") {
        Some(head) if raw.parse::<f64>().is_ok() => head.to_string(),
        _ => raw.to_string(),
    }
}
