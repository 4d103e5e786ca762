//! Output generation for the unified zone dataset.
//!
//! Records are exported as comma-delimited text and as a JSON array. An
//! exported delimited file can be re-read into records or summarized with
//! [`validate_output`].

mod error;
mod export;
mod validate;

pub use error::{OutputError, Result};
pub use export::{ensure_parent_dir, read_unified_csv, write_csv, write_json, write_outputs};
pub use validate::{ValidationReport, validate_output};
