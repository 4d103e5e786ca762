use std::collections::BTreeMap;

use tracing::debug;

use georisk_model::{DwellingType, RentAggregate, SemanticRole, ZoneKey};
use georisk_transform::parse_amount;

use super::RentTable;
use crate::prepare::PreparedSource;
use crate::stats::SourceStats;

/// Value columns averaged for a dwelling type: the type keyword plus
/// `promedio` or `precio`. Range columns are not averaged.
fn value_columns(columns: &[String], dwelling: DwellingType) -> Vec<&str> {
    columns
        .iter()
        .filter(|name| {
            let lower = name.to_lowercase();
            lower.contains(dwelling.column_keyword())
                && (lower.contains("promedio") || lower.contains("precio"))
        })
        .map(String::as_str)
        .collect()
}

/// Mean rent per zone and dwelling type over every parseable value.
pub(super) fn process(source: &PreparedSource, stats: &mut SourceStats) -> RentTable {
    let rent_columns = source.columns.get_all(SemanticRole::RentValue);
    let mut sums: BTreeMap<(ZoneKey, DwellingType), (f64, usize)> = BTreeMap::new();
    let mut zones: BTreeMap<ZoneKey, RentAggregate> = BTreeMap::new();

    for key in &source.zone_keys {
        zones
            .entry(key.clone())
            .or_insert_with(|| RentAggregate::new(key.clone()));
    }

    for dwelling in DwellingType::ALL {
        let columns = value_columns(rent_columns, dwelling);
        debug!(
            dataset = source.name(),
            dwelling = dwelling.as_str(),
            columns = ?columns,
            "rent value columns"
        );
        for name in columns {
            let Some(values) = source.column(name) else {
                continue;
            };
            for (key, raw) in source.zone_keys.iter().zip(&values) {
                if raw.trim().is_empty() {
                    continue;
                }
                match parse_amount(raw) {
                    Some(amount) => {
                        let entry = sums.entry((key.clone(), dwelling)).or_insert((0.0, 0));
                        entry.0 += amount;
                        entry.1 += 1;
                    }
                    None => stats.invalid_measure_rows += 1,
                }
            }
        }
    }

    for ((key, dwelling), (sum, count)) in sums {
        if let Some(zone) = zones.get_mut(&key) {
            zone.set_value(dwelling, Some(sum / count as f64));
        }
    }
    zones
}
