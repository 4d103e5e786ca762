use tracing::{debug, warn};

use georisk_model::{AggregateTable, PipelineOptions, SemanticRole, SourceKind};
use georisk_transform::{Aggregator, PeriodPolicy, normalize_geo_text, parse_count, parse_year_month};

use super::{merge_stats, observation};
use crate::error::Result;
use crate::prepare::PreparedSource;
use crate::stats::SourceStats;

/// Row mask for the department filter, `None` when every row is kept.
fn department_mask(source: &PreparedSource, filter: &str) -> Result<Option<Vec<bool>>> {
    let wanted = normalize_geo_text(filter);
    if wanted.is_empty() {
        return Ok(None);
    }
    if !source.columns.contains(SemanticRole::Department) {
        warn!(
            dataset = source.name(),
            department = %wanted,
            "department filter ignored: no department column"
        );
        return Ok(None);
    }
    let departments = source.role_values(SemanticRole::Department)?;
    Ok(Some(
        departments
            .iter()
            .map(|dept| dept.contains(wanted.as_str()))
            .collect(),
    ))
}

/// Explicit case counts grouped by month.
pub(super) fn process(
    source: &PreparedSource,
    options: &PipelineOptions,
    stats: &mut SourceStats,
) -> Result<AggregateTable> {
    let dates = source.role_values(SemanticRole::Date)?;
    let counts = source.role_values(SemanticRole::CaseCount)?;
    let mask = match options.department_filter.as_deref() {
        Some(filter) => department_mask(source, filter)?,
        None => None,
    };

    let mut observations = Vec::with_capacity(source.row_count());
    for (idx, key) in source.zone_keys.iter().enumerate() {
        if mask.as_ref().is_some_and(|keep| !keep[idx]) {
            stats.filtered_rows += 1;
            continue;
        }
        let Some(measure) = parse_count(&counts[idx]) else {
            stats.invalid_measure_rows += 1;
            continue;
        };
        observations.push(observation(
            key,
            parse_year_month(&dates[idx], options.police_day_order),
            measure,
        ));
    }
    if stats.invalid_measure_rows > 0 {
        debug!(
            dataset = source.name(),
            rows = stats.invalid_measure_rows,
            "rows with unparseable case count skipped"
        );
    }

    let (table, aggregate) =
        Aggregator::new(SourceKind::Police, PeriodPolicy::CountUndated).aggregate(observations);
    merge_stats(stats, aggregate);
    stats.dropped_rows += stats.filtered_rows + stats.invalid_measure_rows;
    Ok(table)
}
