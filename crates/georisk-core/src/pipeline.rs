//! Pipeline orchestration.
//!
//! Stages run in order: every dataset is detected first, so a missing
//! mandatory column aborts the run before any aggregation. Each dataset is
//! then normalized, keyed and aggregated on its own; classification waits
//! for all of them.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{info, info_span};

use georisk_common::column_names;
use georisk_ingest::SourceDataset;
use georisk_map::{DetectionProfile, detect_columns};
use georisk_model::{
    PipelineOptions, RiskLevel, SemanticColumnMap, SemanticRole, SourceKind, UnifiedZoneRecord,
};
use georisk_transform::{Trend, categorical_trends};

use crate::error::{PipelineError, Result};
use crate::prepare::{PreparedSource, prepare_source};
use crate::risk::{ReferenceMeasure, RiskClassifier, RiskThresholds, ZoneTables};
use crate::source_processors::process_source;
use crate::stats::SourceStats;

/// What was detected and counted for one source.
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub columns: SemanticColumnMap,
    pub stats: SourceStats,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Unified records in ascending zone key order.
    pub records: Vec<UnifiedZoneRecord>,
    pub sources: Vec<SourceReport>,
    /// Dominant descriptive values of the robberies source, if supplied.
    pub trends: Vec<(SemanticRole, Trend)>,
    pub reference: Option<ReferenceMeasure>,
    pub thresholds: Option<RiskThresholds>,
}

impl PipelineReport {
    /// Record count per risk level.
    pub fn level_counts(&self) -> BTreeMap<RiskLevel, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.risk_level).or_insert(0) += 1;
        }
        counts
    }

    pub fn source(&self, kind: SourceKind) -> Option<&SourceReport> {
        self.sources.iter().find(|s| s.stats.source == kind)
    }
}

fn index_by_kind(datasets: Vec<SourceDataset>) -> Result<BTreeMap<SourceKind, SourceDataset>> {
    let mut by_kind = BTreeMap::new();
    for dataset in datasets {
        let kind = dataset.kind;
        if by_kind.insert(kind, dataset).is_some() {
            return Err(PipelineError::DuplicateSource {
                dataset: kind.as_str().to_string(),
            });
        }
    }
    Ok(by_kind)
}

/// Runs detection, keying, aggregation and classification over the
/// supplied sources. Sources that are not supplied contribute nothing.
///
/// # Errors
///
/// Fails if a mandatory column is missing in any dataset, a source is
/// supplied twice, or a table operation fails.
pub fn run_pipeline(datasets: Vec<SourceDataset>, options: &PipelineOptions) -> Result<PipelineReport> {
    let datasets = index_by_kind(datasets)?;

    let mut detected: Vec<(&SourceDataset, SemanticColumnMap)> = Vec::with_capacity(datasets.len());
    for (kind, dataset) in &datasets {
        let columns = info_span!("detect", dataset = kind.as_str()).in_scope(|| {
            let start = Instant::now();
            let profile = DetectionProfile::for_source(*kind);
            let columns = detect_columns(&column_names(&dataset.frame), &profile)?;
            info!(
                dataset = kind.as_str(),
                roles = columns.len(),
                duration_ms = start.elapsed().as_millis(),
                "columns detected"
            );
            Ok::<_, PipelineError>(columns)
        })?;
        detected.push((dataset, columns));
    }

    let mut prepared: Vec<PreparedSource> = Vec::with_capacity(detected.len());
    for (dataset, columns) in detected {
        let source = info_span!("normalize", dataset = dataset.name()).in_scope(|| {
            let start = Instant::now();
            let source = prepare_source(dataset, columns)?;
            info!(
                dataset = source.name(),
                rows = source.row_count(),
                tiers = ?source.tiers,
                duration_ms = start.elapsed().as_millis(),
                "zone keys built"
            );
            Ok::<_, PipelineError>(source)
        })?;
        prepared.push(source);
    }

    let mut tables = ZoneTables::default();
    let mut sources = Vec::with_capacity(prepared.len());
    let mut trends = Vec::new();
    for source in &prepared {
        let (output, stats) = info_span!("aggregate", dataset = source.name()).in_scope(|| {
            let start = Instant::now();
            let (output, stats) = process_source(source, options)?;
            info!(
                dataset = source.name(),
                rows = stats.rows,
                zones = stats.zones,
                undated_rows = stats.undated_rows,
                dropped_rows = stats.dropped_rows,
                duration_ms = start.elapsed().as_millis(),
                "source aggregated"
            );
            Ok::<_, PipelineError>((output, stats))
        })?;
        if source.kind == SourceKind::Robberies {
            trends = categorical_trends(&source.frame, &source.columns);
        }
        tables.insert(source.kind, output);
        sources.push(SourceReport {
            columns: source.columns.clone(),
            stats,
        });
    }

    let classification = info_span!("classify").in_scope(|| {
        let start = Instant::now();
        let classification = RiskClassifier::new().classify(&tables);
        info!(
            zones = classification.records.len(),
            reference = classification.reference.as_ref().map(ReferenceMeasure::column),
            duration_ms = start.elapsed().as_millis(),
            "risk classified"
        );
        classification
    });

    Ok(PipelineReport {
        records: classification.records,
        sources,
        trends,
        reference: classification.reference,
        thresholds: classification.thresholds,
    })
}
