//! Per-zone aggregates produced for each source.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::zone::ZoneKey;

/// The four independently sourced input datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// One row per robbery incident.
    Robberies,
    /// National police theft report with an explicit case count.
    Police,
    /// Consolidated cases per commune and year.
    Communes,
    /// Rent prices per zone and dwelling type.
    Rent,
}

impl SourceKind {
    pub const ALL: [SourceKind; 4] = [
        SourceKind::Robberies,
        SourceKind::Police,
        SourceKind::Communes,
        SourceKind::Rent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Robberies => "robberies",
            Self::Police => "police",
            Self::Communes => "communes",
            Self::Rent => "rent",
        }
    }

    /// Default cleaned file name for this source inside a data directory.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Robberies => "robos_medellin_limpio.csv",
            Self::Police => "hurto_policia_limpio.csv",
            Self::Communes => "criminalidad_comunas_limpio.csv",
            Self::Rent => "arriendos_limpio.csv",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated measure for one zone from one crime source.
///
/// `average` is the mean of per-period sums over the periods actually
/// observed for the zone; it is `None` when no row of the zone had a
/// parseable period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneAggregate {
    pub zone_key: ZoneKey,
    pub source: SourceKind,
    pub average: Option<f64>,
    pub total: f64,
    /// Number of distinct periods observed for the zone.
    pub periods: usize,
}

/// All zone aggregates of one source, keyed and ordered by zone.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregateTable {
    pub zones: BTreeMap<ZoneKey, ZoneAggregate>,
}

impl AggregateTable {
    pub fn get(&self, key: &ZoneKey) -> Option<&ZoneAggregate> {
        self.zones.get(key)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl FromIterator<ZoneAggregate> for AggregateTable {
    fn from_iter<T: IntoIterator<Item = ZoneAggregate>>(iter: T) -> Self {
        Self {
            zones: iter
                .into_iter()
                .map(|agg| (agg.zone_key.clone(), agg))
                .collect(),
        }
    }
}

/// Dwelling types with a rent average in the unified output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DwellingType {
    Apartment,
    House,
    Commercial,
}

impl DwellingType {
    pub const ALL: [DwellingType; 3] = [
        DwellingType::Apartment,
        DwellingType::House,
        DwellingType::Commercial,
    ];

    /// Keyword identifying value columns of this dwelling type.
    pub fn column_keyword(&self) -> &'static str {
        match self {
            Self::Apartment => "apartamento",
            Self::House => "casa",
            Self::Commercial => "local",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::House => "house",
            Self::Commercial => "commercial",
        }
    }
}

/// Average rent per dwelling type for one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentAggregate {
    pub zone_key: ZoneKey,
    pub apartment: Option<f64>,
    pub house: Option<f64>,
    pub commercial: Option<f64>,
}

impl RentAggregate {
    /// A zone with no rent value for any dwelling type.
    pub fn new(zone_key: ZoneKey) -> Self {
        Self {
            zone_key,
            apartment: None,
            house: None,
            commercial: None,
        }
    }

    pub fn value(&self, dwelling: DwellingType) -> Option<f64> {
        match dwelling {
            DwellingType::Apartment => self.apartment,
            DwellingType::House => self.house,
            DwellingType::Commercial => self.commercial,
        }
    }

    pub fn set_value(&mut self, dwelling: DwellingType, value: Option<f64>) {
        match dwelling {
            DwellingType::Apartment => self.apartment = value,
            DwellingType::House => self.house = value,
            DwellingType::Commercial => self.commercial = value,
        }
    }
}
