use georisk_model::{AggregateTable, SemanticRole, SourceKind};
use georisk_transform::{Aggregator, PeriodPolicy, parse_count, parse_year};

use super::{merge_stats, observation};
use crate::error::Result;
use crate::prepare::PreparedSource;
use crate::stats::SourceStats;

/// Case counts grouped by year. Rows without a year are dropped.
pub(super) fn process(source: &PreparedSource, stats: &mut SourceStats) -> Result<AggregateTable> {
    let years = source.role_values(SemanticRole::Year)?;
    let counts = source.role_values(SemanticRole::CaseCount)?;

    let mut observations = Vec::with_capacity(source.row_count());
    for ((key, year), count) in source.zone_keys.iter().zip(&years).zip(&counts) {
        let Some(measure) = parse_count(count) else {
            stats.invalid_measure_rows += 1;
            continue;
        };
        observations.push(observation(key, parse_year(year), measure));
    }

    let (table, aggregate) =
        Aggregator::new(SourceKind::Communes, PeriodPolicy::RequirePeriod).aggregate(observations);
    merge_stats(stats, aggregate);
    stats.dropped_rows += stats.invalid_measure_rows;
    Ok(table)
}
