//! Zone risk pipeline core.
//!
//! Takes the loaded source tables through column detection, geo
//! normalization, zone keying and per-source aggregation, then joins the
//! per-zone tables and classifies each zone by risk.

pub mod error;
pub mod pipeline;
pub mod prepare;
pub mod risk;
pub mod source_processors;
pub mod stats;

pub use error::{PipelineError, Result};
pub use pipeline::{PipelineReport, SourceReport, run_pipeline};
pub use prepare::{PreparedSource, prepare_source};
pub use risk::{
    Classification, ReferenceMeasure, RiskClassifier, RiskThresholds, ZoneTables, percentile,
};
pub use source_processors::{RentTable, SourceOutput, process_source};
pub use stats::SourceStats;
