//! Cross-source join, risk index and quantile-based tiers.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};

use georisk_model::{
    AggregateTable, DwellingType, RiskLevel, SourceKind, UnifiedZoneRecord, ZoneKey,
};

use crate::source_processors::{RentTable, SourceOutput};

/// Per-zone outputs of every supplied source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneTables {
    pub robberies: Option<AggregateTable>,
    pub police: Option<AggregateTable>,
    pub communes: Option<AggregateTable>,
    pub rent: Option<RentTable>,
}

impl ZoneTables {
    /// Stores a source output in its slot.
    pub fn insert(&mut self, kind: SourceKind, output: SourceOutput) {
        match (kind, output) {
            (SourceKind::Robberies, SourceOutput::Zones(table)) => self.robberies = Some(table),
            (SourceKind::Police, SourceOutput::Zones(table)) => self.police = Some(table),
            (SourceKind::Communes, SourceOutput::Zones(table)) => self.communes = Some(table),
            (SourceKind::Rent, SourceOutput::Rent(table)) => self.rent = Some(table),
            (kind, _) => warn!(dataset = kind.as_str(), "unexpected output shape, ignored"),
        }
    }

    /// Zones of the crime tables: the union of robberies and police keys.
    pub fn crime_zones(&self) -> BTreeSet<ZoneKey> {
        self.robberies
            .iter()
            .chain(self.police.iter())
            .flat_map(|table| table.zones.keys().cloned())
            .collect()
    }
}

/// Measure the risk index is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceMeasure {
    RobberiesMonthlyAvg,
    PoliceMonthlyAvg,
}

impl ReferenceMeasure {
    /// Candidates in priority order.
    pub const PRIORITY: [ReferenceMeasure; 2] = [
        ReferenceMeasure::RobberiesMonthlyAvg,
        ReferenceMeasure::PoliceMonthlyAvg,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            Self::RobberiesMonthlyAvg => "robberies_monthly_avg",
            Self::PoliceMonthlyAvg => "police_monthly_avg",
        }
    }

    fn table<'a>(&self, tables: &'a ZoneTables) -> Option<&'a AggregateTable> {
        match self {
            Self::RobberiesMonthlyAvg => tables.robberies.as_ref(),
            Self::PoliceMonthlyAvg => tables.police.as_ref(),
        }
    }

    fn value(&self, record: &UnifiedZoneRecord) -> Option<f64> {
        match self {
            Self::RobberiesMonthlyAvg => record.robberies_monthly_avg,
            Self::PoliceMonthlyAvg => record.police_monthly_avg,
        }
    }

    /// The first candidate whose table was supplied and holds at least one average.
    pub fn select(tables: &ZoneTables) -> Option<Self> {
        Self::PRIORITY.into_iter().find(|measure| {
            measure
                .table(tables)
                .is_some_and(|table| table.zones.values().any(|agg| agg.average.is_some()))
        })
    }
}

/// Linear-interpolated percentile of sorted values, `p` in `[0, 1]`.
///
/// Matches the default quantile method of common dataframe libraries:
/// rank `p * (n - 1)` interpolated between its neighbours.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    if upper >= sorted.len() {
        sorted[sorted.len() - 1]
    } else {
        sorted[lower] + (sorted[upper] - sorted[lower]) * frac
    }
}

/// Tier boundaries of one run, computed once from every non-null index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskThresholds {
    pub p20: f64,
    pub p40: f64,
    pub p60: f64,
    pub p80: f64,
}

impl RiskThresholds {
    /// `None` when there are no values.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            p20: percentile(&sorted, 0.2),
            p40: percentile(&sorted, 0.4),
            p60: percentile(&sorted, 0.6),
            p80: percentile(&sorted, 0.8),
        })
    }

    /// Tier of an index by `<=` comparison against each boundary.
    pub fn classify(&self, index: Option<f64>) -> RiskLevel {
        match index {
            None => RiskLevel::NoData,
            Some(v) if v <= self.p20 => RiskLevel::Diamond,
            Some(v) if v <= self.p40 => RiskLevel::Gold,
            Some(v) if v <= self.p60 => RiskLevel::Silver,
            Some(v) if v <= self.p80 => RiskLevel::Bronze,
            Some(_) => RiskLevel::Copper,
        }
    }
}

/// Result of classifying the joined zones.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Records in ascending zone key order.
    pub records: Vec<UnifiedZoneRecord>,
    pub reference: Option<ReferenceMeasure>,
    pub thresholds: Option<RiskThresholds>,
}

/// Joins the source tables and assigns risk labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskClassifier;

impl RiskClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Outer-joins the crime tables, then left-joins communes and rent.
    pub fn join(&self, tables: &ZoneTables) -> Vec<UnifiedZoneRecord> {
        tables
            .crime_zones()
            .into_iter()
            .map(|key| {
                let mut record = UnifiedZoneRecord::empty(key.clone());
                if let Some(agg) = tables.robberies.as_ref().and_then(|t| t.get(&key)) {
                    record.robberies_monthly_avg = agg.average;
                    record.robberies_total = Some(agg.total);
                }
                if let Some(agg) = tables.police.as_ref().and_then(|t| t.get(&key)) {
                    record.police_monthly_avg = agg.average;
                    record.police_total = Some(agg.total);
                }
                if let Some(agg) = tables.communes.as_ref().and_then(|t| t.get(&key)) {
                    record.commune_yearly_avg = agg.average;
                    record.commune_total = Some(agg.total);
                }
                if let Some(rent) = tables.rent.as_ref().and_then(|t| t.get(&key)) {
                    record.rent_avg_apartment = rent.value(DwellingType::Apartment);
                    record.rent_avg_house = rent.value(DwellingType::House);
                    record.rent_avg_commercial = rent.value(DwellingType::Commercial);
                }
                record
            })
            .collect()
    }

    /// Joins, computes the risk index and labels every record.
    ///
    /// Without any reference measure the index is 0 for every record.
    /// Otherwise a record whose own reference value is null keeps a null
    /// index and is labelled "no data".
    pub fn classify(&self, tables: &ZoneTables) -> Classification {
        let mut records = self.join(tables);
        let reference = ReferenceMeasure::select(tables);

        match reference {
            None => {
                warn!("no reference measure available, risk index set to 0");
                for record in &mut records {
                    record.risk_index = Some(0.0);
                }
            }
            Some(measure) => {
                // Overflowed sums are left out of the maximum and saturate at 1.
                let max = records
                    .iter()
                    .filter_map(|r| measure.value(r))
                    .filter(|v| v.is_finite())
                    .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))));
                for record in &mut records {
                    record.risk_index = measure
                        .value(record)
                        .filter(|v| !v.is_nan())
                        .map(|v| match max {
                            Some(max) if max > 0.0 => (v / max).clamp(0.0, 1.0),
                            _ => 0.0,
                        });
                }
            }
        }

        let indices: Vec<f64> = records.iter().filter_map(|r| r.risk_index).collect();
        let thresholds = RiskThresholds::from_values(&indices);
        for record in &mut records {
            record.risk_level = match &thresholds {
                Some(t) => t.classify(record.risk_index),
                None => RiskLevel::NoData,
            };
            record.alert_level = record.risk_level.alert();
        }
        debug!(
            zones = records.len(),
            reference = reference.as_ref().map(ReferenceMeasure::column),
            thresholds = ?thresholds,
            "zones classified"
        );

        Classification {
            records,
            reference,
            thresholds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use georisk_model::{AlertLevel, RentAggregate, ZoneAggregate};

    fn table(source: SourceKind, rows: &[(&str, Option<f64>, f64)]) -> AggregateTable {
        rows.iter()
            .map(|(key, average, total)| ZoneAggregate {
                zone_key: ZoneKey::new(*key),
                source,
                average: *average,
                total: *total,
                periods: usize::from(average.is_some()),
            })
            .collect()
    }

    #[test]
    fn percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 0.5), 3.0);
        assert!((percentile(&sorted, 0.2) - 1.8).abs() < 1e-12);
        assert_eq!(percentile(&[7.0], 0.8), 7.0);
    }

    #[test]
    fn thresholds_classify_by_le() {
        let t = RiskThresholds::from_values(&[0.0, 0.25, 0.5, 0.75, 1.0]).unwrap();
        assert_eq!(t.classify(Some(0.1)), RiskLevel::Diamond);
        assert_eq!(t.classify(Some(t.p40)), RiskLevel::Gold);
        assert_eq!(t.classify(Some(1.0)), RiskLevel::Copper);
        assert_eq!(t.classify(None), RiskLevel::NoData);
        assert!(RiskThresholds::from_values(&[]).is_none());
    }

    #[test]
    fn crime_tables_outer_join_and_rent_left_joins() {
        let mut tables = ZoneTables {
            robberies: Some(table(SourceKind::Robberies, &[("A|B|BAR_X", Some(2.0), 4.0)])),
            police: Some(table(SourceKind::Police, &[("A|B", Some(10.0), 30.0)])),
            ..ZoneTables::default()
        };
        let mut rent = RentTable::new();
        for key in ["A|B", "A|C"] {
            let mut aggregate = RentAggregate::new(ZoneKey::new(key));
            aggregate.set_value(DwellingType::Apartment, Some(1_000_000.0));
            rent.insert(ZoneKey::new(key), aggregate);
        }
        tables.rent = Some(rent);

        let records = RiskClassifier::new().join(&tables);
        let keys: Vec<&str> = records.iter().map(|r| r.zone_key.as_str()).collect();
        assert_eq!(keys, vec!["A|B", "A|B|BAR_X"]);
        assert_eq!(records[0].police_total, Some(30.0));
        assert_eq!(records[0].robberies_total, None);
        assert_eq!(records[0].rent_avg_apartment, Some(1_000_000.0));
        assert_eq!(records[1].rent_avg_apartment, None);
    }

    #[test]
    fn null_reference_row_is_no_data() {
        let tables = ZoneTables {
            robberies: Some(table(
                SourceKind::Robberies,
                &[("A|B", Some(4.0), 8.0), ("A|C", Some(2.0), 2.0)],
            )),
            police: Some(table(SourceKind::Police, &[("A|D", Some(9.0), 9.0)])),
            ..ZoneTables::default()
        };
        let result = RiskClassifier::new().classify(&tables);
        assert_eq!(result.reference, Some(ReferenceMeasure::RobberiesMonthlyAvg));
        let by_key = |k: &str| result.records.iter().find(|r| r.zone_key.as_str() == k).unwrap();
        assert_eq!(by_key("A|B").risk_index, Some(1.0));
        assert_eq!(by_key("A|C").risk_index, Some(0.5));
        assert_eq!(by_key("A|D").risk_index, None);
        assert_eq!(by_key("A|D").risk_level, RiskLevel::NoData);
        assert_eq!(by_key("A|D").alert_level, AlertLevel::NoData);
    }

    #[test]
    fn missing_reference_degrades_to_zero() {
        let tables = ZoneTables {
            police: Some(table(SourceKind::Police, &[("A|B", None, 3.0), ("A|C", None, 1.0)])),
            ..ZoneTables::default()
        };
        let result = RiskClassifier::new().classify(&tables);
        assert_eq!(result.reference, None);
        for record in &result.records {
            assert_eq!(record.risk_index, Some(0.0));
            assert_eq!(record.risk_level, RiskLevel::Diamond);
            assert_eq!(record.alert_level, AlertLevel::Safe);
        }
    }

    #[test]
    fn falls_back_to_police_average() {
        let tables = ZoneTables {
            robberies: Some(table(SourceKind::Robberies, &[("A|B", None, 1.0)])),
            police: Some(table(SourceKind::Police, &[("A|B", Some(5.0), 5.0)])),
            ..ZoneTables::default()
        };
        let result = RiskClassifier::new().classify(&tables);
        assert_eq!(result.reference, Some(ReferenceMeasure::PoliceMonthlyAvg));
        assert_eq!(result.records[0].risk_index, Some(1.0));
    }

    #[test]
    fn zero_maximum_gives_zero_index() {
        let tables = ZoneTables {
            police: Some(table(SourceKind::Police, &[("A|B", Some(0.0), 0.0)])),
            ..ZoneTables::default()
        };
        let result = RiskClassifier::new().classify(&tables);
        assert_eq!(result.records[0].risk_index, Some(0.0));
    }

    #[test]
    fn overflowed_average_saturates_index() {
        let tables = ZoneTables {
            robberies: Some(table(
                SourceKind::Robberies,
                &[
                    ("A|B", Some(f64::INFINITY), 1.0),
                    ("A|C", Some(2.0), 2.0),
                    ("A|D", Some(1.0), 1.0),
                ],
            )),
            ..ZoneTables::default()
        };
        let result = RiskClassifier::new().classify(&tables);
        let indices: Vec<Option<f64>> = result.records.iter().map(|r| r.risk_index).collect();
        assert_eq!(indices, vec![Some(1.0), Some(1.0), Some(0.5)]);
        let thresholds = result.thresholds.unwrap();
        assert!(thresholds.p80.is_finite());
        assert_eq!(result.records[2].risk_level, RiskLevel::Diamond);
    }
}
