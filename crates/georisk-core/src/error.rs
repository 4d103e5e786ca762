//! Pipeline error type.

use polars::prelude::PolarsError;
use thiserror::Error;

use georisk_map::DetectionError;
use georisk_model::SemanticRole;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A mandatory role could not be detected.
    #[error(transparent)]
    Detection(#[from] DetectionError),

    /// The same source was supplied twice.
    #[error("dataset '{dataset}' supplied more than once")]
    DuplicateSource { dataset: String },

    /// A detected column could not be read back from the table.
    #[error("dataset '{dataset}': column for role '{role}' is not readable")]
    ColumnUnavailable { dataset: String, role: SemanticRole },

    /// A DataFrame operation failed.
    #[error("dataset '{dataset}': {source}")]
    Frame {
        dataset: String,
        #[source]
        source: PolarsError,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
