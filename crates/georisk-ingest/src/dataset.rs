//! Loaded source datasets and data-directory discovery.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::{info, warn};

use georisk_model::SourceKind;

use crate::error::{IngestError, Result};
use crate::reader::read_source_csv;

/// One fully materialized input table tagged with its source.
#[derive(Debug, Clone)]
pub struct SourceDataset {
    pub kind: SourceKind,
    pub frame: DataFrame,
    /// File the table was read from, if any.
    pub origin: Option<PathBuf>,
}

impl SourceDataset {
    /// Wraps an in-memory table.
    pub fn new(kind: SourceKind, frame: DataFrame) -> Self {
        Self {
            kind,
            frame,
            origin: None,
        }
    }

    /// Dataset name used in logs and errors.
    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn row_count(&self) -> usize {
        self.frame.height()
    }
}

/// Reads one source file.
pub fn load_source(kind: SourceKind, path: &Path) -> Result<SourceDataset> {
    let frame = read_source_csv(path)?;
    info!(
        dataset = kind.as_str(),
        path = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "source loaded"
    );
    Ok(SourceDataset {
        kind,
        frame,
        origin: Some(path.to_path_buf()),
    })
}

/// Locates the default-named source files inside a data directory.
///
/// Sources whose file is absent are skipped with a warning.
pub fn discover_sources(dir: &Path) -> Result<BTreeMap<SourceKind, PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let mut found = BTreeMap::new();
    for kind in SourceKind::ALL {
        let path = dir.join(kind.default_file_name());
        if path.is_file() {
            found.insert(kind, path);
        } else {
            warn!(
                dataset = kind.as_str(),
                path = %path.display(),
                "source file not found, skipping"
            );
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_sources_skips_missing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("arriendos_limpio.csv"), "sector\nA\n").unwrap();
        std::fs::write(dir.path().join("hurto_policia_limpio.csv"), "municipio\nB\n").unwrap();

        let found = discover_sources(dir.path()).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.contains_key(&SourceKind::Rent));
        assert!(found.contains_key(&SourceKind::Police));
        assert!(!found.contains_key(&SourceKind::Robberies));
    }

    #[test]
    fn test_discover_sources_missing_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            discover_sources(&missing),
            Err(IngestError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_load_source_records_origin() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("robos.csv");
        std::fs::write(&path, "fecha_hecho,barrio\n01/02/2020,LAURELES\n").unwrap();
        let dataset = load_source(SourceKind::Robberies, &path).unwrap();
        assert_eq!(dataset.name(), "robberies");
        assert_eq!(dataset.row_count(), 1);
        assert_eq!(dataset.origin.as_deref(), Some(path.as_path()));
    }
}
