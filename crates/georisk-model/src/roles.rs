//! Semantic column roles and the per-dataset role map.
//!
//! Source datasets name their columns however they like. A [`SemanticRole`]
//! is the abstract purpose of a column ("which column holds the commune")
//! and a [`SemanticColumnMap`] records which actual column fills each role
//! for one dataset.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Abstract column purpose, independent of the literal column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticRole {
    Department,
    Municipality,
    Commune,
    Sector,
    Neighborhood,
    Date,
    Year,
    CaseCount,
    Office,
    Conduct,
    Modality,
    Asset,
    Weapon,
    Transport,
    Sex,
    /// Multi-column role: every rent price or range column.
    RentValue,
}

impl SemanticRole {
    /// All roles in declaration order.
    pub const ALL: [SemanticRole; 16] = [
        SemanticRole::Department,
        SemanticRole::Municipality,
        SemanticRole::Commune,
        SemanticRole::Sector,
        SemanticRole::Neighborhood,
        SemanticRole::Date,
        SemanticRole::Year,
        SemanticRole::CaseCount,
        SemanticRole::Office,
        SemanticRole::Conduct,
        SemanticRole::Modality,
        SemanticRole::Asset,
        SemanticRole::Weapon,
        SemanticRole::Transport,
        SemanticRole::Sex,
        SemanticRole::RentValue,
    ];

    /// Stable snake_case identifier used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Municipality => "municipality",
            Self::Commune => "commune",
            Self::Sector => "sector",
            Self::Neighborhood => "neighborhood",
            Self::Date => "date",
            Self::Year => "year",
            Self::CaseCount => "case_count",
            Self::Office => "office",
            Self::Conduct => "conduct",
            Self::Modality => "modality",
            Self::Asset => "asset",
            Self::Weapon => "weapon",
            Self::Transport => "transport",
            Self::Sex => "sex",
            Self::RentValue => "rent_value",
        }
    }

    /// Returns true for the five geographic roles that feed the zone key.
    pub fn is_geo(&self) -> bool {
        matches!(
            self,
            Self::Department
                | Self::Municipality
                | Self::Commune
                | Self::Sector
                | Self::Neighborhood
        )
    }

    /// Returns true if the role collects every matching column instead of the first.
    pub fn is_multi_column(&self) -> bool {
        matches!(self, Self::RentValue)
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from semantic role to the column(s) detected for one dataset.
///
/// Built once per dataset by the column detector and read-only afterwards.
/// Single-column roles hold at most one entry; multi-column roles hold every
/// matching column in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticColumnMap {
    dataset: String,
    columns: BTreeMap<SemanticRole, Vec<String>>,
}

impl SemanticColumnMap {
    /// Creates an empty map for the named dataset.
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            columns: BTreeMap::new(),
        }
    }

    /// Records the detected columns for a role. Empty inputs are ignored.
    pub fn with_columns(mut self, role: SemanticRole, columns: Vec<String>) -> Self {
        if !columns.is_empty() {
            self.columns.insert(role, columns);
        }
        self
    }

    /// Name of the dataset this map was built for.
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// The first (or only) column detected for a role.
    pub fn get(&self, role: SemanticRole) -> Option<&str> {
        self.columns
            .get(&role)
            .and_then(|cols| cols.first())
            .map(String::as_str)
    }

    /// Every column detected for a role, empty if undetected.
    pub fn get_all(&self, role: SemanticRole) -> &[String] {
        self.columns.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, role: SemanticRole) -> bool {
        self.columns.contains_key(&role)
    }

    /// Iterates detected roles with their first column.
    pub fn iter(&self) -> impl Iterator<Item = (SemanticRole, &str)> {
        self.columns
            .iter()
            .filter_map(|(role, cols)| cols.first().map(|c| (*role, c.as_str())))
    }

    /// Number of detected roles.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
