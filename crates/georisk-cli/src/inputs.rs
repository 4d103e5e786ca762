//! Resolution of source and output paths from a data directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::warn;

use georisk_ingest::discover_sources;
use georisk_model::{OutputOptions, SourceKind};

/// Default unified CSV file name inside the data directory.
pub const DEFAULT_CSV_NAME: &str = "data_final.csv";
/// Default unified JSON file name inside the data directory.
pub const DEFAULT_JSON_NAME: &str = "data_final.json";

/// Picks the file for each source.
///
/// Explicit overrides must exist. Other sources come from their default
/// file names inside `data_dir`; absent defaults are skipped. A missing
/// data directory is only an error when no override was given.
pub fn resolve_sources(
    data_dir: &Path,
    overrides: &[(SourceKind, PathBuf)],
) -> Result<BTreeMap<SourceKind, PathBuf>> {
    for (kind, path) in overrides {
        if !path.is_file() {
            bail!("{kind} file not found: {}", path.display());
        }
    }

    let mut sources = if overrides.len() == SourceKind::ALL.len() {
        BTreeMap::new()
    } else if data_dir.is_dir() || overrides.is_empty() {
        discover_sources(data_dir)
            .with_context(|| format!("scan data directory {}", data_dir.display()))?
    } else {
        warn!(
            path = %data_dir.display(),
            "data directory not found, using explicit sources only"
        );
        BTreeMap::new()
    };

    for (kind, path) in overrides {
        sources.insert(*kind, path.clone());
    }

    if sources.is_empty() {
        bail!("no source files found in {}", data_dir.display());
    }
    Ok(sources)
}

/// Output paths, defaulting into the data directory.
pub fn resolve_outputs(
    data_dir: &Path,
    out_csv: Option<&Path>,
    out_json: Option<&Path>,
) -> OutputOptions {
    OutputOptions {
        csv_path: Some(
            out_csv
                .map(Path::to_path_buf)
                .unwrap_or_else(|| data_dir.join(DEFAULT_CSV_NAME)),
        ),
        json_path: Some(
            out_json
                .map(Path::to_path_buf)
                .unwrap_or_else(|| data_dir.join(DEFAULT_JSON_NAME)),
        ),
    }
}
