//! Column detection against the rule table.

use tracing::debug;

use georisk_model::{SemanticColumnMap, SemanticRole};

use crate::error::DetectionError;
use crate::profile::DetectionProfile;
use crate::rules::{GEO_KEYWORDS, ROLE_RULES, RoleRule};

/// Resolves semantic roles to actual column names.
///
/// Matching is case-insensitive substring search; the returned names keep
/// the column's original spelling. For single-column roles the first
/// matching column in dataset order wins.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDetector {
    rules: &'static [RoleRule],
}

impl Default for ColumnDetector {
    fn default() -> Self {
        Self { rules: ROLE_RULES }
    }
}

impl ColumnDetector {
    pub fn new() -> Self {
        Self::default()
    }

    fn rule(&self, role: SemanticRole) -> Option<&RoleRule> {
        self.rules.iter().find(|rule| rule.role == role)
    }

    /// First column matching the role, if any.
    pub fn find_column(&self, columns: &[String], role: SemanticRole) -> Option<String> {
        let rule = self.rule(role)?;
        columns
            .iter()
            .find(|column| rule.matches(&column.to_lowercase()))
            .cloned()
    }

    /// Every column matching the role, in dataset order.
    pub fn find_all_columns(&self, columns: &[String], role: SemanticRole) -> Vec<String> {
        let Some(rule) = self.rule(role) else {
            return Vec::new();
        };
        columns
            .iter()
            .filter(|column| rule.matches(&column.to_lowercase()))
            .cloned()
            .collect()
    }

    /// Builds the role map for a dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DetectionError::MandatoryColumnMissing`] for the first
    /// mandatory role (in profile order) that matches no column.
    pub fn detect(
        &self,
        columns: &[String],
        profile: &DetectionProfile,
    ) -> Result<SemanticColumnMap, DetectionError> {
        let mut map = SemanticColumnMap::new(profile.dataset.clone());
        for requirement in &profile.requirements {
            let role = requirement.role;
            let found = if role.is_multi_column() {
                self.find_all_columns(columns, role)
            } else {
                self.find_column(columns, role).into_iter().collect()
            };

            if found.is_empty() {
                if requirement.mandatory {
                    return Err(DetectionError::MandatoryColumnMissing {
                        dataset: profile.dataset.clone(),
                        role,
                        columns: columns.join(", "),
                    });
                }
                debug!(dataset = %profile.dataset, role = %role, "optional role not detected");
                continue;
            }

            debug!(
                dataset = %profile.dataset,
                role = %role,
                columns = ?found,
                "role detected"
            );
            map = map.with_columns(role, found);
        }
        Ok(map)
    }
}

/// Columns holding geographic text, in dataset order.
pub fn geo_columns(columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .filter(|column| {
            let lower = column.to_lowercase();
            GEO_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
        })
        .cloned()
        .collect()
}

/// Detects a dataset's columns with the default rule table.
pub fn detect_columns(
    columns: &[String],
    profile: &DetectionProfile,
) -> Result<SemanticColumnMap, DetectionError> {
    ColumnDetector::new().detect(columns, profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_match_wins_and_keeps_original_name() {
        let columns = cols(&["Fecha_Hecho", "fecha_registro", "Barrio"]);
        let detector = ColumnDetector::new();
        assert_eq!(
            detector.find_column(&columns, SemanticRole::Date).as_deref(),
            Some("Fecha_Hecho")
        );
        assert_eq!(
            detector
                .find_column(&columns, SemanticRole::Neighborhood)
                .as_deref(),
            Some("Barrio")
        );
    }

    #[test]
    fn accented_year_keyword_matches() {
        let columns = cols(&["comuna", "Año", "casos"]);
        let detector = ColumnDetector::new();
        assert_eq!(
            detector.find_column(&columns, SemanticRole::Year).as_deref(),
            Some("Año")
        );
    }

    #[test]
    fn geo_columns_include_codes() {
        let columns = cols(&["codigo_dane", "municipio", "fecha", "cantidad"]);
        assert_eq!(geo_columns(&columns), cols(&["codigo_dane", "municipio"]));
    }
}
