//! Numeric normalization utilities.

use georisk_common::{is_missing_token, parse_f64};

/// Parses an explicit case count. Missing tokens and non-numbers yield `None`.
pub fn parse_count(value: &str) -> Option<f64> {
    if is_missing_token(value) {
        return None;
    }
    parse_f64(value)
}

/// Parses a formatted money amount such as `$1.250.000`, `950,5` or `1.250,50`.
///
/// Everything except digits, `,`, `.` and `-` is removed. When both `.` and
/// `,` appear, `.` groups thousands and `,` is the decimal point. Otherwise
/// `,` is read as the decimal point, and more than one `.` means the dots
/// group thousands. A single `.` is always decimal, so `950.000` is 950.
pub fn parse_amount(value: &str) -> Option<f64> {
    let kept: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    let cleaned = if kept.contains(',') && kept.contains('.') {
        kept.replace('.', "").replace(',', ".")
    } else {
        let decimal = kept.replace(',', ".");
        if decimal.matches('.').count() > 1 {
            decimal.replace('.', "")
        } else {
            decimal
        }
    };
    parse_f64(&cleaned)
}
