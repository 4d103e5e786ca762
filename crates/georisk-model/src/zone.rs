//! Canonical spatial keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel key for rows without any usable geographic field.
pub const NO_INFO_KEY: &str = "SIN_INFO";

/// Granularity tier a [`ZoneKey`] was built from, finest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneTier {
    Commune,
    Neighborhood,
    Sector,
    Municipality,
    NoInfo,
}

impl ZoneTier {
    /// Tiers in resolution priority order.
    pub const PRIORITY: [ZoneTier; 5] = [
        ZoneTier::Commune,
        ZoneTier::Neighborhood,
        ZoneTier::Sector,
        ZoneTier::Municipality,
        ZoneTier::NoInfo,
    ];

    /// Key segment prefix for sub-municipal tiers.
    pub fn segment_prefix(&self) -> Option<&'static str> {
        match self {
            Self::Commune => Some("COM_"),
            Self::Neighborhood => Some("BAR_"),
            Self::Sector => Some("SEC_"),
            Self::Municipality | Self::NoInfo => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commune => "commune",
            Self::Neighborhood => "neighborhood",
            Self::Sector => "sector",
            Self::Municipality => "municipality",
            Self::NoInfo => "no_info",
        }
    }
}

/// Canonical hierarchical zone identifier used to join sources.
///
/// One of five forms:
/// `DEPT|MUNI|COM_X`, `DEPT|MUNI|BAR_X`, `DEPT|MUNI|SEC_X`, `DEPT|MUNI`
/// or the sentinel [`NO_INFO_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneKey(String);

impl ZoneKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The sentinel key for rows with no geographic information.
    pub fn no_info() -> Self {
        Self(NO_INFO_KEY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_no_info(&self) -> bool {
        self.0 == NO_INFO_KEY
    }

    /// Infers the tier from the key's shape.
    pub fn tier(&self) -> ZoneTier {
        if self.is_no_info() {
            return ZoneTier::NoInfo;
        }
        let last = self.0.rsplit('|').next().unwrap_or_default();
        ZoneTier::PRIORITY
            .into_iter()
            .find(|tier| {
                tier.segment_prefix()
                    .is_some_and(|prefix| last.starts_with(prefix))
                    && self.0.matches('|').count() == 2
            })
            .unwrap_or(ZoneTier::Municipality)
    }
}

impl fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
