//! Per-zone aggregation over time periods.
//!
//! The same aggregator serves every crime source. Each source supplies its
//! own observations: a zone key, an optional period (month or year) and a
//! measure (an explicit case count, or 1 per incident row).

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use georisk_model::{AggregateTable, SourceKind, ZoneAggregate, ZoneKey};

/// What happens to rows whose period could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PeriodPolicy {
    /// Undated rows still count toward the zone total.
    CountUndated,
    /// Undated rows are excluded from total and average.
    RequirePeriod,
}

/// One row ready for aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation<P> {
    pub zone_key: ZoneKey,
    pub period: Option<P>,
    pub measure: f64,
}

/// Row counters collected while aggregating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateStats {
    /// Observations received.
    pub rows: usize,
    /// Observations without a period.
    pub undated: usize,
    /// Observations dropped entirely because the policy requires a period.
    pub dropped: usize,
}

#[derive(Debug)]
struct ZoneAccumulator<P> {
    total: f64,
    per_period: BTreeMap<P, f64>,
}

impl<P> Default for ZoneAccumulator<P> {
    fn default() -> Self {
        Self {
            total: 0.0,
            per_period: BTreeMap::new(),
        }
    }
}

/// Groups observations by zone and period.
///
/// For each zone, `total` is the sum of every counted measure and `average`
/// is the mean of the per-period sums over the periods actually observed
/// for that zone. A zone seen in a single period has `average == total` of
/// that period; a zone with no dated rows has no average.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    source: SourceKind,
    policy: PeriodPolicy,
}

impl Aggregator {
    pub fn new(source: SourceKind, policy: PeriodPolicy) -> Self {
        Self { source, policy }
    }

    pub fn aggregate<P, I>(&self, observations: I) -> (AggregateTable, AggregateStats)
    where
        P: Ord,
        I: IntoIterator<Item = Observation<P>>,
    {
        let mut stats = AggregateStats::default();
        let mut zones: BTreeMap<ZoneKey, ZoneAccumulator<P>> = BTreeMap::new();

        for observation in observations {
            stats.rows += 1;
            match observation.period {
                Some(period) => {
                    let zone = zones.entry(observation.zone_key).or_default();
                    zone.total += observation.measure;
                    *zone.per_period.entry(period).or_insert(0.0) += observation.measure;
                }
                None => {
                    stats.undated += 1;
                    match self.policy {
                        PeriodPolicy::CountUndated => {
                            zones.entry(observation.zone_key).or_default().total +=
                                observation.measure;
                        }
                        PeriodPolicy::RequirePeriod => stats.dropped += 1,
                    }
                }
            }
        }

        let table = zones
            .into_iter()
            .map(|(zone_key, acc)| {
                let periods = acc.per_period.len();
                let average = (periods > 0)
                    .then(|| acc.per_period.values().sum::<f64>() / periods as f64);
                ZoneAggregate {
                    zone_key,
                    source: self.source,
                    average,
                    total: acc.total,
                    periods,
                }
            })
            .collect::<AggregateTable>();
        debug!(
            dataset = self.source.as_str(),
            rows = stats.rows,
            zones = table.len(),
            undated = stats.undated,
            dropped = stats.dropped,
            "observations aggregated"
        );
        (table, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(key: &str, period: Option<u32>, measure: f64) -> Observation<u32> {
        Observation {
            zone_key: ZoneKey::new(key),
            period,
            measure,
        }
    }

    #[test]
    fn average_over_observed_periods_only() {
        let aggregator = Aggregator::new(SourceKind::Robberies, PeriodPolicy::CountUndated);
        let (table, stats) = aggregator.aggregate(vec![
            obs("A|B", Some(1), 1.0),
            obs("A|B", Some(1), 1.0),
            obs("A|B", Some(7), 1.0),
            obs("A|B", None, 1.0),
        ]);
        let zone = table.get(&ZoneKey::new("A|B")).unwrap();
        assert_eq!(zone.total, 4.0);
        assert_eq!(zone.periods, 2);
        assert_eq!(zone.average, Some(1.5));
        assert_eq!(stats.undated, 1);
        assert_eq!(stats.dropped, 0);
    }

    #[test]
    fn single_period_average_equals_total() {
        let aggregator = Aggregator::new(SourceKind::Police, PeriodPolicy::CountUndated);
        let (table, _) = aggregator.aggregate(vec![obs("X|Y", Some(3), 4.0), obs("X|Y", Some(3), 2.0)]);
        let zone = table.get(&ZoneKey::new("X|Y")).unwrap();
        assert_eq!(zone.average, Some(zone.total));
    }

    #[test]
    fn undated_only_zone_has_no_average() {
        let aggregator = Aggregator::new(SourceKind::Police, PeriodPolicy::CountUndated);
        let (table, _) = aggregator.aggregate(vec![obs("X|Y", None, 5.0)]);
        let zone = table.get(&ZoneKey::new("X|Y")).unwrap();
        assert_eq!(zone.total, 5.0);
        assert_eq!(zone.average, None);
    }

    #[test]
    fn required_period_drops_undated_rows() {
        let aggregator = Aggregator::new(SourceKind::Communes, PeriodPolicy::RequirePeriod);
        let (table, stats) = aggregator.aggregate(vec![
            obs("||COM_1", Some(2019), 10.0),
            obs("||COM_1", None, 3.0),
            obs("||COM_2", None, 8.0),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&ZoneKey::new("||COM_1")).unwrap().total, 10.0);
        assert_eq!(stats.dropped, 2);
    }
}
