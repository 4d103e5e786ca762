//! The unified per-zone record and its risk labels.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::zone::ZoneKey;

/// Ordinal risk tier derived from quantile thresholds of the risk index.
///
/// Tier 1 (`Diamond`) is the lowest risk, tier 5 (`Copper`) the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "diamond")]
    Diamond,
    #[serde(rename = "gold")]
    Gold,
    #[serde(rename = "silver")]
    Silver,
    #[serde(rename = "bronze")]
    Bronze,
    #[serde(rename = "copper")]
    Copper,
    #[serde(rename = "no data")]
    NoData,
}

impl RiskLevel {
    /// Tiers in ascending risk order.
    pub const TIERS: [RiskLevel; 5] = [
        RiskLevel::Diamond,
        RiskLevel::Gold,
        RiskLevel::Silver,
        RiskLevel::Bronze,
        RiskLevel::Copper,
    ];

    /// 1-based tier number, `None` for [`RiskLevel::NoData`].
    pub fn tier(&self) -> Option<u8> {
        match self {
            Self::Diamond => Some(1),
            Self::Gold => Some(2),
            Self::Silver => Some(3),
            Self::Bronze => Some(4),
            Self::Copper => Some(5),
            Self::NoData => None,
        }
    }

    /// Coarse alert rollup of the tier.
    pub fn alert(&self) -> AlertLevel {
        match self {
            Self::Copper | Self::Bronze => AlertLevel::High,
            Self::Silver => AlertLevel::Medium,
            Self::Gold | Self::Diamond => AlertLevel::Safe,
            Self::NoData => AlertLevel::NoData,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diamond => "diamond",
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Bronze => "bronze",
            Self::Copper => "copper",
            Self::NoData => "no data",
        }
    }

    /// Parses the exported label back into a level.
    pub fn parse(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        Self::TIERS
            .into_iter()
            .chain(std::iter::once(Self::NoData))
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-valued alert rollup of the risk tier, plus "no data".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertLevel {
    #[serde(rename = "safe")]
    Safe,
    #[serde(rename = "medium alert")]
    Medium,
    #[serde(rename = "high alert")]
    High,
    #[serde(rename = "no data")]
    NoData,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Medium => "medium alert",
            Self::High => "high alert",
            Self::NoData => "no data",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final per-zone entity: merged source fields plus the risk classification.
///
/// Any source field may be `None` when the zone is missing from that
/// source. Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedZoneRecord {
    pub zone_key: ZoneKey,
    pub robberies_monthly_avg: Option<f64>,
    pub robberies_total: Option<f64>,
    pub police_monthly_avg: Option<f64>,
    pub police_total: Option<f64>,
    pub commune_yearly_avg: Option<f64>,
    pub commune_total: Option<f64>,
    pub rent_avg_apartment: Option<f64>,
    pub rent_avg_house: Option<f64>,
    pub rent_avg_commercial: Option<f64>,
    pub risk_index: Option<f64>,
    pub risk_level: RiskLevel,
    pub alert_level: AlertLevel,
}

impl UnifiedZoneRecord {
    /// Export column names, in field order.
    pub const COLUMNS: [&'static str; 13] = [
        "zone_key",
        "robberies_monthly_avg",
        "robberies_total",
        "police_monthly_avg",
        "police_total",
        "commune_yearly_avg",
        "commune_total",
        "rent_avg_apartment",
        "rent_avg_house",
        "rent_avg_commercial",
        "risk_index",
        "risk_level",
        "alert_level",
    ];

    /// A record with only the key set and no classification yet.
    pub fn empty(zone_key: ZoneKey) -> Self {
        Self {
            zone_key,
            robberies_monthly_avg: None,
            robberies_total: None,
            police_monthly_avg: None,
            police_total: None,
            commune_yearly_avg: None,
            commune_total: None,
            rent_avg_apartment: None,
            rent_avg_house: None,
            rent_avg_commercial: None,
            risk_index: None,
            risk_level: RiskLevel::NoData,
            alert_level: AlertLevel::NoData,
        }
    }
}
