//! Source loading for the georisk pipeline.
//!
//! Upstream glue that turns the four cleaned source files into in-memory
//! tables: delimiter sniffing (`;`, tab, `,`), BOM stripping, lowercased
//! headers, and every value loaded as text.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use georisk_ingest::{discover_sources, load_source};
//!
//! let found = discover_sources(Path::new("data"))?;
//! for (kind, path) in &found {
//!     let dataset = load_source(*kind, path)?;
//!     println!("{}: {} rows", dataset.name(), dataset.row_count());
//! }
//! ```

mod dataset;
mod error;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::{normalize_header, read_source_csv, sniff_delimiter, validate_encoding};

// === Datasets ===
pub use dataset::{SourceDataset, discover_sources, load_source};
