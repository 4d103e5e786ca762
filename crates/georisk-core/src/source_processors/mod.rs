//! Source-specific aggregation.
//!
//! Each source turns its prepared rows into per-zone values its own way:
//!
//! | Source | Period | Measure | Undated rows |
//! |--------|--------|---------|--------------|
//! | robberies | month (day-first) | 1 per row | counted in total |
//! | police | month (month-first) | case count | counted in total |
//! | communes | year | case count | dropped |
//! | rent | none | amount per dwelling type | n/a |

mod communes;
mod police;
mod rent;
mod robberies;

use std::collections::BTreeMap;

use georisk_model::{AggregateTable, PipelineOptions, RentAggregate, SourceKind, ZoneKey};
use georisk_transform::{AggregateStats, Observation};

use crate::error::Result;
use crate::prepare::PreparedSource;
use crate::stats::SourceStats;

/// Rent averages keyed by zone.
pub type RentTable = BTreeMap<ZoneKey, RentAggregate>;

/// Per-zone output of one source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutput {
    Zones(AggregateTable),
    Rent(RentTable),
}

impl SourceOutput {
    pub fn zone_count(&self) -> usize {
        match self {
            Self::Zones(table) => table.len(),
            Self::Rent(table) => table.len(),
        }
    }
}

/// Aggregates a prepared source according to its kind.
pub fn process_source(
    source: &PreparedSource,
    options: &PipelineOptions,
) -> Result<(SourceOutput, SourceStats)> {
    let mut stats = SourceStats::new(source.kind, source.row_count());
    stats.tiers = source.tiers.clone();
    let output = match source.kind {
        SourceKind::Robberies => SourceOutput::Zones(robberies::process(source, options, &mut stats)?),
        SourceKind::Police => SourceOutput::Zones(police::process(source, options, &mut stats)?),
        SourceKind::Communes => SourceOutput::Zones(communes::process(source, &mut stats)?),
        SourceKind::Rent => SourceOutput::Rent(rent::process(source, &mut stats)),
    };
    stats.zones = output.zone_count();
    Ok((output, stats))
}

fn observation<P>(zone_key: &ZoneKey, period: Option<P>, measure: f64) -> Observation<P> {
    Observation {
        zone_key: zone_key.clone(),
        period,
        measure,
    }
}

fn merge_stats(stats: &mut SourceStats, aggregate: AggregateStats) {
    stats.undated_rows += aggregate.undated;
    stats.dropped_rows += aggregate.dropped;
}
