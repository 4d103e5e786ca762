//! Writing and re-reading the unified dataset.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use georisk_model::{OutputOptions, UnifiedZoneRecord};

use crate::error::{OutputError, Result};

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> OutputError + '_ {
    move |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    Ok(())
}

/// Writes records as comma-delimited UTF-8 text with a header row.
///
/// Null fields are written as empty cells.
pub fn write_csv(records: &[UnifiedZoneRecord], path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(io_error(path))?;
    let csv_error = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    if records.is_empty() {
        writer
            .write_record(UnifiedZoneRecord::COLUMNS)
            .map_err(csv_error)?;
    }
    for record in records {
        writer.serialize(record).map_err(csv_error)?;
    }
    writer.flush().map_err(io_error(path))?;
    info!(path = %path.display(), records = records.len(), "csv written");
    Ok(())
}

/// Writes records as a pretty-printed JSON array.
pub fn write_json(records: &[UnifiedZoneRecord], path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(io_error(path))?;
    writer.flush().map_err(io_error(path))?;
    info!(path = %path.display(), records = records.len(), "json written");
    Ok(())
}

/// Writes every configured output and returns the paths written.
pub fn write_outputs(records: &[UnifiedZoneRecord], options: &OutputOptions) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    if let Some(path) = &options.csv_path {
        write_csv(records, path)?;
        written.push(path.clone());
    }
    if let Some(path) = &options.json_path {
        write_json(records, path)?;
        written.push(path.clone());
    }
    Ok(written)
}

/// Reads a file written by [`write_csv`] back into records.
///
/// A leading UTF-8 byte order mark is ignored.
pub fn read_unified_csv(path: &Path) -> Result<Vec<UnifiedZoneRecord>> {
    let mut text = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut text))
        .map_err(io_error(path))?;
    let body = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    reader
        .deserialize()
        .collect::<std::result::Result<Vec<UnifiedZoneRecord>, _>>()
        .map_err(|source| OutputError::Csv {
            path: path.to_path_buf(),
            source,
        })
}
