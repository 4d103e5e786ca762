//! CLI library components for the georisk pipeline.

pub mod inputs;
pub mod logging;
