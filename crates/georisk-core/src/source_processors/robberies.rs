use georisk_model::{AggregateTable, PipelineOptions, SemanticRole, SourceKind};
use georisk_transform::{Aggregator, PeriodPolicy, parse_year_month};

use super::{merge_stats, observation};
use crate::error::Result;
use crate::prepare::PreparedSource;
use crate::stats::SourceStats;

/// One incident per row, grouped by month.
pub(super) fn process(
    source: &PreparedSource,
    options: &PipelineOptions,
    stats: &mut SourceStats,
) -> Result<AggregateTable> {
    let dates = source.role_values(SemanticRole::Date)?;
    let observations = source
        .zone_keys
        .iter()
        .zip(&dates)
        .map(|(key, date)| {
            observation(
                key,
                parse_year_month(date, options.robberies_day_order),
                1.0,
            )
        });

    let (table, aggregate) =
        Aggregator::new(SourceKind::Robberies, PeriodPolicy::CountUndated).aggregate(observations);
    merge_stats(stats, aggregate);
    Ok(table)
}
