//! Zone key construction.
//!
//! Each row gets exactly one [`ZoneKey`]. The finest available geographic
//! field wins, in the fixed order commune, neighborhood, sector,
//! municipality; department and municipality are carried as a context
//! prefix. Rows without any of these fall back to [`NO_INFO_KEY`].
//!
//! [`NO_INFO_KEY`]: georisk_model::NO_INFO_KEY

use polars::prelude::DataFrame;

use georisk_common::{column_values, is_missing_token};
use georisk_model::{SemanticColumnMap, SemanticRole, ZoneKey, ZoneTier};

use crate::normalization::normalize_geo_text;

/// Raw geographic fields of one row. Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoFields {
    pub department: String,
    pub municipality: String,
    pub commune: String,
    pub neighborhood: String,
    pub sector: String,
}

impl GeoFields {
    fn field(&self, role: SemanticRole) -> &str {
        match role {
            SemanticRole::Department => &self.department,
            SemanticRole::Municipality => &self.municipality,
            SemanticRole::Commune => &self.commune,
            SemanticRole::Neighborhood => &self.neighborhood,
            SemanticRole::Sector => &self.sector,
            _ => "",
        }
    }

    fn field_mut(&mut self, role: SemanticRole) -> Option<&mut String> {
        match role {
            SemanticRole::Department => Some(&mut self.department),
            SemanticRole::Municipality => Some(&mut self.municipality),
            SemanticRole::Commune => Some(&mut self.commune),
            SemanticRole::Neighborhood => Some(&mut self.neighborhood),
            SemanticRole::Sector => Some(&mut self.sector),
            _ => None,
        }
    }
}

/// A field normalized and checked for presence.
fn present(raw: &str) -> Option<String> {
    let normalized = normalize_geo_text(raw);
    if is_missing_token(&normalized) {
        None
    } else {
        Some(normalized)
    }
}

/// Sub-municipal tiers in priority order, each with the role it reads.
const SEGMENT_TIERS: [(ZoneTier, SemanticRole); 3] = [
    (ZoneTier::Commune, SemanticRole::Commune),
    (ZoneTier::Neighborhood, SemanticRole::Neighborhood),
    (ZoneTier::Sector, SemanticRole::Sector),
];

/// Builds zone keys from geographic fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneKeyBuilder;

impl ZoneKeyBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Builds the key for one row and reports the tier it resolved to.
    ///
    /// Fields are normalized before the presence check, so building from
    /// already-normalized fields gives the same key.
    pub fn build(&self, fields: &GeoFields) -> (ZoneKey, ZoneTier) {
        let department = present(&fields.department).unwrap_or_default();
        let municipality = present(&fields.municipality);

        for (tier, role) in SEGMENT_TIERS {
            if let Some(value) = present(fields.field(role)) {
                let prefix = tier.segment_prefix().unwrap_or_default();
                let municipality = municipality.as_deref().unwrap_or_default();
                let key = format!("{department}|{municipality}|{prefix}{value}");
                return (ZoneKey::new(key), tier);
            }
        }

        match municipality {
            Some(municipality) => (
                ZoneKey::new(format!("{department}|{municipality}")),
                ZoneTier::Municipality,
            ),
            None => (ZoneKey::no_info(), ZoneTier::NoInfo),
        }
    }

    /// Builds one key per row of a dataset from its detected geo columns.
    pub fn build_keys(&self, df: &DataFrame, columns: &SemanticColumnMap) -> Vec<(ZoneKey, ZoneTier)> {
        let mut rows = vec![GeoFields::default(); df.height()];
        for role in SemanticRole::ALL.into_iter().filter(SemanticRole::is_geo) {
            let Some(values) = columns.get(role).and_then(|name| column_values(df, name)) else {
                continue;
            };
            for (row, value) in rows.iter_mut().zip(values) {
                if let Some(slot) = row.field_mut(role) {
                    *slot = value;
                }
            }
        }
        rows.iter().map(|row| self.build(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(dept: &str, muni: &str, com: &str, bar: &str, sec: &str) -> GeoFields {
        GeoFields {
            department: dept.to_string(),
            municipality: muni.to_string(),
            commune: com.to_string(),
            neighborhood: bar.to_string(),
            sector: sec.to_string(),
        }
    }

    #[test]
    fn commune_wins_over_everything() {
        let (key, tier) = ZoneKeyBuilder.build(&fields("Antioquia", "Medellín", "14", "Poblado", "3"));
        assert_eq!(key.as_str(), "ANTIOQUIA|MEDELLIN|COM_14");
        assert_eq!(tier, ZoneTier::Commune);
    }

    #[test]
    fn missing_tokens_are_absent() {
        let (key, tier) = ZoneKeyBuilder.build(&fields("nan", "Bello", "<NA>", "None", ""));
        assert_eq!(key.as_str(), "|BELLO");
        assert_eq!(tier, ZoneTier::Municipality);
    }

    #[test]
    fn segment_without_context_keeps_separators() {
        let (key, _) = ZoneKeyBuilder.build(&fields("", "", "", "", "Sector 5"));
        assert_eq!(key.as_str(), "||SEC_SECTOR 5");
    }

    #[test]
    fn nothing_present_is_no_info() {
        let (key, tier) = ZoneKeyBuilder.build(&GeoFields::default());
        assert!(key.is_no_info());
        assert_eq!(tier, ZoneTier::NoInfo);
    }

    #[test]
    fn build_keys_reads_detected_columns() {
        let df = polars::df! {
            "departamento" => ["ANTIOQUIA", "ANTIOQUIA"],
            "municipio" => ["ITAGUI", ""],
            "barrio" => ["", "LAURELES"],
        }
        .unwrap();
        let map = SemanticColumnMap::new("robberies")
            .with_columns(SemanticRole::Department, vec!["departamento".to_string()])
            .with_columns(SemanticRole::Municipality, vec!["municipio".to_string()])
            .with_columns(SemanticRole::Neighborhood, vec!["barrio".to_string()]);
        let keys: Vec<String> = ZoneKeyBuilder
            .build_keys(&df, &map)
            .into_iter()
            .map(|(key, _)| key.to_string())
            .collect();
        assert_eq!(keys, vec!["ANTIOQUIA|ITAGUI", "ANTIOQUIA||BAR_LAURELES"]);
    }
}
