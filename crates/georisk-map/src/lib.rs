//! Heuristic column detection.
//!
//! Source schemas are not fixed; each dataset's columns are matched against
//! an ordered keyword rule table to find the column filling each
//! [`SemanticRole`](georisk_model::SemanticRole). A [`DetectionProfile`]
//! lists the roles wanted for a source and which of them must be present.

mod detector;
mod error;
mod profile;
mod rules;

pub use detector::{ColumnDetector, detect_columns, geo_columns};
pub use error::DetectionError;
pub use profile::{DetectionProfile, RoleRequirement};
pub use rules::{GEO_KEYWORDS, KeywordPattern, ROLE_RULES, RoleRule, rule_for};
