//! Normalization of raw source values.
//!
//! - **text**: geographic free text to canonical uppercase ASCII
//! - **datetime**: date, month and year parsing with per-source day order
//! - **numeric**: case counts and formatted rent amounts

pub mod datetime;
pub mod numeric;
pub mod text;

pub use datetime::{YearMonth, parse_date, parse_year, parse_year_month};
pub use numeric::{parse_amount, parse_count};
pub use text::{normalize_geo_columns, normalize_geo_text};
