//! Error types for column detection.

use georisk_model::SemanticRole;
use thiserror::Error;

/// Errors from column detection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectionError {
    /// A role declared mandatory for the dataset matched no column.
    #[error("dataset '{dataset}': mandatory column for role '{role}' not found (columns: {columns})")]
    MandatoryColumnMissing {
        dataset: String,
        role: SemanticRole,
        /// Comma-separated column names that were searched.
        columns: String,
    },
}

impl DetectionError {
    /// The role that could not be detected.
    pub fn role(&self) -> SemanticRole {
        match self {
            Self::MandatoryColumnMissing { role, .. } => *role,
        }
    }

    /// The dataset the detection ran against.
    pub fn dataset(&self) -> &str {
        match self {
            Self::MandatoryColumnMissing { dataset, .. } => dataset,
        }
    }
}
