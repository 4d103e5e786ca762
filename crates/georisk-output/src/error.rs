//! Error types for export and validation.

use std::path::PathBuf;
use thiserror::Error;

use georisk_ingest::IngestError;

/// Errors that can occur while writing or re-reading outputs.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create or write a file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Delimited serialization or deserialization failed.
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// JSON serialization failed.
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The exported file could not be loaded for validation.
    #[error(transparent)]
    Read(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, OutputError>;
