//! Row-level transformation for the zone risk pipeline.
//!
//! This crate provides the steps applied to each source after its columns
//! have been detected:
//!
//! - **normalization**: geo text canonicalization, date and amount parsing
//! - **zone_key**: one canonical [`ZoneKey`](georisk_model::ZoneKey) per row
//! - **aggregate**: per-zone totals and per-period averages
//! - **trends**: most frequent descriptive values for the run report

pub mod aggregate;
pub mod normalization;
pub mod trends;
pub mod zone_key;

pub use aggregate::{AggregateStats, Aggregator, Observation, PeriodPolicy};
pub use normalization::{
    YearMonth, normalize_geo_columns, normalize_geo_text, parse_amount, parse_count, parse_date,
    parse_year, parse_year_month,
};
pub use trends::{TREND_ROLES, Trend, categorical_trends, rank_values, trend_of};
pub use zone_key::{GeoFields, ZoneKeyBuilder};
