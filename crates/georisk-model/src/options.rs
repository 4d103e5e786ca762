//! Configuration options for a pipeline run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How ambiguous numeric dates such as `01/02/2020` are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DayOrder {
    /// `01/02/2020` is the 1st of February.
    DayFirst,
    /// `01/02/2020` is the 2nd of January.
    #[default]
    MonthFirst,
}

/// Options controlling how sources are processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Keep only police rows whose department contains this text
    /// (compared after geo normalization, e.g. "ANTIOQUIA").
    pub department_filter: Option<String>,

    /// Date order for the robberies source (incident dates are day-first).
    pub robberies_day_order: DayOrder,

    /// Date order for the police source.
    pub police_day_order: DayOrder,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            department_filter: None,
            robberies_day_order: DayOrder::DayFirst,
            police_day_order: DayOrder::MonthFirst,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_department_filter(mut self, department: Option<String>) -> Self {
        self.department_filter = department.filter(|d| !d.trim().is_empty());
        self
    }
}

/// Where the unified dataset is written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Delimited text export (UTF-8, header row).
    pub csv_path: Option<PathBuf>,
    /// JSON array export.
    pub json_path: Option<PathBuf>,
}

impl OutputOptions {
    pub fn is_empty(&self) -> bool {
        self.csv_path.is_none() && self.json_path.is_none()
    }
}
