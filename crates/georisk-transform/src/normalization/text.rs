//! Geographic text canonicalization.

use polars::prelude::*;
use unicode_normalization::UnicodeNormalization;

use georisk_common::column_values;

/// Canonicalizes a geographic value to uppercase ASCII.
///
/// Diacritics are removed by compatibility decomposition, anything other
/// than ASCII letters, digits and spaces is dropped and the result is
/// trimmed. The function is idempotent.
///
/// # Examples
///
/// ```
/// use georisk_transform::normalize_geo_text;
///
/// assert_eq!(normalize_geo_text(" Itagüí "), "ITAGUI");
/// assert_eq!(normalize_geo_text("La Candelaria (Centro)"), "LA CANDELARIA CENTRO");
/// ```
pub fn normalize_geo_text(value: &str) -> String {
    let cleaned: String = value
        .to_uppercase()
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .map(|c| c.to_ascii_uppercase())
        .collect();
    cleaned.trim().to_string()
}

/// Returns a copy of `df` with every listed column normalized.
///
/// Columns missing from the frame are skipped. Null cells become empty
/// strings.
pub fn normalize_geo_columns(df: &DataFrame, columns: &[String]) -> PolarsResult<DataFrame> {
    let mut out = df.clone();
    for name in columns {
        let Some(values) = column_values(df, name) else {
            continue;
        };
        let normalized: Vec<String> = values.iter().map(|v| normalize_geo_text(v)).collect();
        out.with_column(Series::new(name.as_str().into(), normalized))?;
    }
    Ok(out)
}
