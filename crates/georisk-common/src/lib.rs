//! Shared utilities for georisk crates.
//!
//! This crate provides common utilities used across the workspace,
//! including Polars DataFrame helpers and missing-value detection.

pub mod missing;
pub mod frame;

// Re-export commonly used functions at crate root for convenience
pub use missing::{MISSING_TOKENS, is_missing_token};
pub use frame::{any_to_string, column_names, column_values, format_numeric, parse_f64, string_frame};
