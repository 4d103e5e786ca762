//! Per-source processing counters.

use std::collections::BTreeMap;

use serde::Serialize;

use georisk_model::{SourceKind, ZoneTier};

/// Counts of what happened to one source's rows.
///
/// Row-level problems (unparseable dates, counts or amounts) are recovered
/// locally and only surface here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceStats {
    pub source: SourceKind,
    /// Rows in the input table.
    pub rows: usize,
    /// Rows removed by the department filter.
    pub filtered_rows: usize,
    /// Rows whose date or year could not be parsed.
    pub undated_rows: usize,
    /// Rows (or rent cells) whose measure could not be parsed.
    pub invalid_measure_rows: usize,
    /// Rows excluded from every aggregate.
    pub dropped_rows: usize,
    /// Distinct zones produced.
    pub zones: usize,
    /// Rows per zone key tier.
    pub tiers: BTreeMap<ZoneTier, usize>,
}

impl SourceStats {
    pub fn new(source: SourceKind, rows: usize) -> Self {
        Self {
            source,
            rows,
            filtered_rows: 0,
            undated_rows: 0,
            invalid_measure_rows: 0,
            dropped_rows: 0,
            zones: 0,
            tiers: BTreeMap::new(),
        }
    }
}
