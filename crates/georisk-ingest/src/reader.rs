//! CSV reading with delimiter sniffing and header normalization.
//!
//! Every column is loaded as text. Headers are trimmed and lowercased so
//! column detection can match role keywords as plain substrings.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::DataFrame;

use georisk_common::string_frame;

use crate::error::{IngestError, Result};

/// Delimiters tried in priority order when sniffing the header line.
const DELIMITER_PRIORITY: [u8; 3] = [b';', b'\t', b','];

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Rejects UTF-16 files, which the text pipeline cannot read.
///
/// A UTF-8 BOM is accepted and stripped from the first header.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = open(path)?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Picks the delimiter from the header line: `;`, then tab, then `,`.
pub fn sniff_delimiter(header_line: &str) -> u8 {
    DELIMITER_PRIORITY
        .into_iter()
        .find(|delim| header_line.as_bytes().contains(delim))
        .unwrap_or(b',')
}

fn read_header_line(path: &Path) -> Result<String> {
    let reader = BufReader::new(open(path)?);
    let mut lines = reader.lines();
    match lines.next() {
        Some(line) => {
            let line = line.map_err(|e| IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(line.strip_prefix('\u{feff}').unwrap_or(&line).to_string())
        }
        None => Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        }),
    }
}

/// Lowercases and trims a raw header, collapsing inner whitespace.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Suffixes repeated header names (`col`, `col.1`, `col.2`) so every column is addressable.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    headers
        .into_iter()
        .enumerate()
        .map(|(idx, header)| {
            let header = if header.is_empty() {
                format!("column_{}", idx + 1)
            } else {
                header
            };
            let count = seen.entry(header.clone()).or_insert(0);
            let name = if *count == 0 {
                header
            } else {
                format!("{header}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

/// Reads a delimited file into a DataFrame of text columns.
///
/// Blank rows are skipped, short rows are padded with empty values and
/// extra trailing cells are dropped.
///
/// # Errors
///
/// Returns an error if the file is missing, UTF-16 encoded, empty, or not
/// parseable as delimited text.
pub fn read_source_csv(path: &Path) -> Result<DataFrame> {
    validate_encoding(path)?;
    let delimiter = sniff_delimiter(&read_header_line(path)?);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(open(path)?);

    let raw_headers = reader
        .headers()
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    if raw_headers.iter().all(|h| h.trim().trim_matches('\u{feff}').is_empty()) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let headers = dedupe_headers(raw_headers.iter().map(normalize_header).collect());

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    let mut skipped_blank = 0usize;
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            skipped_blank += 1;
            continue;
        }
        for (idx, column) in columns.iter_mut().enumerate() {
            column.push(record.get(idx).map(normalize_cell).unwrap_or_default());
        }
    }

    let df = string_frame(headers.into_iter().zip(columns).collect())?;
    tracing::debug!(
        path = %path.display(),
        delimiter = %char::from(delimiter).escape_default(),
        rows = df.height(),
        columns = df.width(),
        skipped_blank,
        "read source csv"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use georisk_common::{column_names, column_values};

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_sniff_delimiter_priority() {
        assert_eq!(sniff_delimiter("a;b,c"), b';');
        assert_eq!(sniff_delimiter("a\tb,c"), b'\t');
        assert_eq!(sniff_delimiter("a,b"), b',');
        assert_eq!(sniff_delimiter("single"), b',');
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Fecha   Hecho "), "fecha hecho");
        assert_eq!(normalize_header("\u{feff}Municipio"), "municipio");
    }

    #[test]
    fn test_read_semicolon_file_with_bom() {
        let file = create_temp_csv("\u{feff}Departamento;MUNICIPIO;Cantidad\nANTIOQUIA;Bello;2\n\n;;\nANTIOQUIA;Itagüí;1\n");
        let df = read_source_csv(file.path()).unwrap();
        assert_eq!(column_names(&df), vec!["departamento", "municipio", "cantidad"]);
        assert_eq!(df.height(), 2);
        assert_eq!(
            column_values(&df, "municipio").unwrap(),
            vec!["Bello".to_string(), "Itagüí".to_string()]
        );
    }

    #[test]
    fn test_short_rows_are_padded() {
        let file = create_temp_csv("barrio,fecha,sexo\nLAURELES,2020-01-02\n");
        let df = read_source_csv(file.path()).unwrap();
        assert_eq!(column_values(&df, "sexo").unwrap(), vec![String::new()]);
    }

    #[test]
    fn test_duplicate_headers_are_suffixed() {
        let file = create_temp_csv("comuna,comuna,\n1,2,3\n");
        let df = read_source_csv(file.path()).unwrap();
        assert_eq!(column_names(&df), vec!["comuna", "comuna.1", "column_3"]);
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let file = create_temp_csv("");
        assert!(matches!(
            read_source_csv(file.path()),
            Err(IngestError::EmptyCsv { .. })
        ));
    }

    #[test]
    fn test_utf16_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, b'a', 0]).unwrap();
        assert!(matches!(
            read_source_csv(file.path()),
            Err(IngestError::UnsupportedEncoding { .. })
        ));
    }
}
