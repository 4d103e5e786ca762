//! Normalization and zone keying of a detected source.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;

use georisk_common::{column_names, column_values};
use georisk_ingest::SourceDataset;
use georisk_map::geo_columns;
use georisk_model::{SemanticColumnMap, SemanticRole, SourceKind, ZoneKey, ZoneTier};
use georisk_transform::{ZoneKeyBuilder, normalize_geo_columns};

use crate::error::{PipelineError, Result};

/// A source with normalized geo columns and one zone key per row.
#[derive(Debug, Clone)]
pub struct PreparedSource {
    pub kind: SourceKind,
    pub columns: SemanticColumnMap,
    /// Copy of the input table with geo columns normalized.
    pub frame: DataFrame,
    pub zone_keys: Vec<ZoneKey>,
    pub tiers: BTreeMap<ZoneTier, usize>,
}

impl PreparedSource {
    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn row_count(&self) -> usize {
        self.frame.height()
    }

    /// Text values of the column detected for a role.
    pub fn role_values(&self, role: SemanticRole) -> Result<Vec<String>> {
        self.columns
            .get(role)
            .and_then(|name| column_values(&self.frame, name))
            .ok_or_else(|| PipelineError::ColumnUnavailable {
                dataset: self.name().to_string(),
                role,
            })
    }

    /// Text values of a column by name, `None` if absent.
    pub fn column(&self, name: &str) -> Option<Vec<String>> {
        column_values(&self.frame, name)
    }
}

/// Normalizes the geo columns of a dataset and builds its zone keys.
///
/// The input table is left untouched.
pub fn prepare_source(dataset: &SourceDataset, columns: SemanticColumnMap) -> Result<PreparedSource> {
    let geo = geo_columns(&column_names(&dataset.frame));
    let frame = normalize_geo_columns(&dataset.frame, &geo).map_err(|source| {
        PipelineError::Frame {
            dataset: dataset.name().to_string(),
            source,
        }
    })?;

    let mut tiers: BTreeMap<ZoneTier, usize> = BTreeMap::new();
    let zone_keys = ZoneKeyBuilder::new()
        .build_keys(&frame, &columns)
        .into_iter()
        .map(|(key, tier)| {
            *tiers.entry(tier).or_insert(0) += 1;
            key
        })
        .collect();

    Ok(PreparedSource {
        kind: dataset.kind,
        columns,
        frame,
        zone_keys,
        tiers,
    })
}
