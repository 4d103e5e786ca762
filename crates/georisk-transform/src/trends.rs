//! Most frequent value of descriptive incident columns.

use std::collections::HashMap;
use std::fmt;

use polars::prelude::DataFrame;
use serde::Serialize;

use georisk_common::column_values;
use georisk_model::{SemanticColumnMap, SemanticRole};

/// Values that mean "not recorded" when they top a column.
const PLACEHOLDERS: [&str; 4] = ["no", "ninguna", "nan", "sin dato"];

/// Descriptive roles summarized for incident data, in report order.
pub const TREND_ROLES: [SemanticRole; 7] = [
    SemanticRole::Sex,
    SemanticRole::Conduct,
    SemanticRole::Modality,
    SemanticRole::Weapon,
    SemanticRole::Transport,
    SemanticRole::Asset,
    SemanticRole::Office,
];

/// Dominant value of one descriptive column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Trend {
    Value(String),
    /// The most frequent value is a placeholder.
    NotSpecified { next: Option<String> },
    /// Column detected but without values.
    NoData,
    /// Role not detected.
    NotFound,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.write_str(value),
            Self::NotSpecified { next: Some(next) } => {
                write!(f, "Not specified (next most frequent: {next})")
            }
            Self::NotSpecified { next: None } => f.write_str("Not specified"),
            Self::NoData => f.write_str("no data"),
            Self::NotFound => f.write_str("column not found"),
        }
    }
}

fn is_placeholder(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    PLACEHOLDERS.contains(&lower.as_str())
}

/// Non-blank values ranked by count, ties in order of first appearance.
pub fn rank_values(values: &[String]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, value) in values.iter().enumerate() {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        counts.entry(value).or_insert((0, idx)).0 += 1;
    }
    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(value, (count, first))| (value, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .map(|(value, count, _)| (value.to_string(), count))
        .collect()
}

/// Trend of one column's values.
pub fn trend_of(values: &[String]) -> Trend {
    let ranked = rank_values(values);
    match ranked.first() {
        None => Trend::NoData,
        Some((top, _)) if is_placeholder(top) => Trend::NotSpecified {
            next: ranked.get(1).map(|(value, _)| value.clone()),
        },
        Some((top, _)) => Trend::Value(top.clone()),
    }
}

/// Trends for every descriptive role of a dataset.
pub fn categorical_trends(df: &DataFrame, columns: &SemanticColumnMap) -> Vec<(SemanticRole, Trend)> {
    TREND_ROLES
        .into_iter()
        .map(|role| {
            let trend = match columns.get(role).and_then(|name| column_values(df, name)) {
                Some(values) => trend_of(&values),
                None => Trend::NotFound,
            };
            (role, trend)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ties_go_to_first_appearance() {
        let values = strings(&["Hombre", "Mujer", "Mujer", "Hombre", ""]);
        assert_eq!(trend_of(&values), Trend::Value("Hombre".to_string()));
    }

    #[test]
    fn placeholder_reports_runner_up() {
        let values = strings(&["No", "Arma blanca", "No"]);
        assert_eq!(
            trend_of(&values).to_string(),
            "Not specified (next most frequent: Arma blanca)"
        );
        let values = strings(&["Sin dato", "Sin dato", "Cuchillo"]);
        assert_eq!(
            trend_of(&values),
            Trend::NotSpecified {
                next: Some("Cuchillo".to_string())
            }
        );
    }

    #[test]
    fn empty_and_missing_columns() {
        assert_eq!(trend_of(&strings(&["", " "])), Trend::NoData);

        let df = polars::df! { "sexo" => ["", ""] }.unwrap();
        let map = SemanticColumnMap::new("robberies")
            .with_columns(SemanticRole::Sex, vec!["sexo".to_string()]);
        let trends = categorical_trends(&df, &map);
        assert_eq!(trends[0], (SemanticRole::Sex, Trend::NoData));
        assert_eq!(trends[1], (SemanticRole::Conduct, Trend::NotFound));
        assert_eq!(trends[1].1.to_string(), "column not found");
    }
}
