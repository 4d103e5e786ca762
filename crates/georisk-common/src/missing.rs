//! Detection of textual placeholders for missing values.

/// Placeholder tokens written by upstream tooling for absent values.
///
/// `na` is what `<NA>` becomes once punctuation is stripped, so both forms
/// are listed to keep presence checks stable under text normalization.
pub const MISSING_TOKENS: [&str; 4] = ["nan", "none", "<na>", "na"];

/// Returns true if the value is empty or a missing-value placeholder.
///
/// Comparison is case-insensitive and ignores surrounding whitespace.
///
/// # Examples
///
/// ```
/// use georisk_common::is_missing_token;
///
/// assert!(is_missing_token(""));
/// assert!(is_missing_token("  NaN "));
/// assert!(is_missing_token("<NA>"));
/// assert!(!is_missing_token("MEDELLIN"));
/// ```
pub fn is_missing_token(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || MISSING_TOKENS
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
}
