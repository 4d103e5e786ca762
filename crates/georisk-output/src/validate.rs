//! Sanity report over an exported delimited file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

use georisk_common::{column_names, column_values, is_missing_token, parse_f64};
use georisk_ingest::read_source_csv;

use crate::error::Result;

/// Columns reported in the null-count ranking.
const NULL_RANKING_LIMIT: usize = 10;

/// Summary of an exported unified dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    /// Count per risk level label, most frequent first. `None` if the file
    /// has no `risk_level` column.
    pub level_distribution: Option<Vec<(String, usize)>>,
    /// Columns with the most empty cells, most first.
    pub null_counts: Vec<(String, usize)>,
    /// Mean of every rent column over its non-empty cells.
    pub rent_means: Vec<(String, Option<f64>)>,
    /// Column/value pairs of the first row with a zone key.
    pub first_record: Option<Vec<(String, String)>>,
    pub warnings: Vec<String>,
}

fn is_null(value: &str) -> bool {
    is_missing_token(value)
}

/// Counts sorted by count descending, then by name.
fn ranked(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Re-reads an exported file and summarizes it.
pub fn validate_output(path: &Path) -> Result<ValidationReport> {
    let df = read_source_csv(path)?;
    let names = column_names(&df);
    let mut warnings = Vec::new();

    let level_distribution = match column_values(&df, "risk_level") {
        Some(levels) => {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for level in levels {
                *counts.entry(level).or_insert(0) += 1;
            }
            Some(ranked(counts))
        }
        None => {
            warn!(path = %path.display(), "risk_level column not found");
            warnings.push("risk_level column not found".to_string());
            None
        }
    };

    let mut nulls: HashMap<String, usize> = HashMap::new();
    let mut rent_means = Vec::new();
    let mut columns: Vec<(String, Vec<String>)> = Vec::with_capacity(names.len());
    for name in &names {
        let values = column_values(&df, name).unwrap_or_default();
        nulls.insert(name.clone(), values.iter().filter(|v| is_null(v)).count());
        if name.starts_with("rent_") {
            let parsed: Vec<f64> = values.iter().filter_map(|v| parse_f64(v)).collect();
            let mean = (!parsed.is_empty()).then(|| parsed.iter().sum::<f64>() / parsed.len() as f64);
            rent_means.push((name.clone(), mean));
        }
        columns.push((name.clone(), values));
    }
    let mut null_counts = ranked(nulls);
    null_counts.truncate(NULL_RANKING_LIMIT);

    let first_record = columns
        .iter()
        .find(|(name, _)| name == "zone_key")
        .and_then(|(_, keys)| keys.iter().position(|key| !is_null(key)))
        .map(|row| {
            columns
                .iter()
                .map(|(name, values)| (name.clone(), values[row].clone()))
                .collect()
        });

    Ok(ValidationReport {
        path: path.to_path_buf(),
        rows: df.height(),
        columns: df.width(),
        level_distribution,
        null_counts,
        rent_means,
        first_record,
        warnings,
    })
}
