//! Ordered role → keyword rule table.
//!
//! Each role lists one or more keyword patterns. A column matches a pattern
//! when its lowercased name contains the keyword and does not contain the
//! pattern's exclusion keyword. Rules are data, evaluated in a fixed order,
//! so detection is deterministic for a given column list.

use georisk_model::SemanticRole;

/// A keyword that identifies a role, with an optional disambiguating exclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordPattern {
    pub keyword: &'static str,
    pub excluded: Option<&'static str>,
}

impl KeywordPattern {
    pub const fn new(keyword: &'static str) -> Self {
        Self {
            keyword,
            excluded: None,
        }
    }

    pub const fn excluding(keyword: &'static str, excluded: &'static str) -> Self {
        Self {
            keyword,
            excluded: Some(excluded),
        }
    }

    /// Matches an already-lowercased column name.
    pub fn matches(&self, column_lower: &str) -> bool {
        column_lower.contains(self.keyword)
            && !self
                .excluded
                .is_some_and(|excluded| column_lower.contains(excluded))
    }
}

/// Detection rule for one semantic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRule {
    pub role: SemanticRole,
    pub patterns: &'static [KeywordPattern],
}

impl RoleRule {
    /// True if any pattern matches the lowercased column name.
    pub fn matches(&self, column_lower: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(column_lower))
    }
}

/// The default rule table, one entry per role.
pub const ROLE_RULES: &[RoleRule] = &[
    RoleRule {
        role: SemanticRole::Department,
        patterns: &[KeywordPattern::new("departamento")],
    },
    RoleRule {
        role: SemanticRole::Municipality,
        patterns: &[KeywordPattern::new("municipio")],
    },
    RoleRule {
        role: SemanticRole::Commune,
        patterns: &[KeywordPattern::new("comuna")],
    },
    RoleRule {
        role: SemanticRole::Sector,
        patterns: &[KeywordPattern::new("sector")],
    },
    RoleRule {
        role: SemanticRole::Neighborhood,
        patterns: &[KeywordPattern::new("barrio")],
    },
    RoleRule {
        role: SemanticRole::Date,
        patterns: &[KeywordPattern::new("fecha")],
    },
    RoleRule {
        role: SemanticRole::Year,
        patterns: &[
            KeywordPattern::new("año"),
            KeywordPattern::new("anio"),
            KeywordPattern::new("fecha"),
        ],
    },
    RoleRule {
        role: SemanticRole::CaseCount,
        patterns: &[KeywordPattern::new("cantidad"), KeywordPattern::new("caso")],
    },
    RoleRule {
        role: SemanticRole::Office,
        patterns: &[KeywordPattern::new("sede")],
    },
    RoleRule {
        role: SemanticRole::Conduct,
        patterns: &[KeywordPattern::new("conducta")],
    },
    RoleRule {
        role: SemanticRole::Modality,
        patterns: &[KeywordPattern::new("modalidad")],
    },
    RoleRule {
        role: SemanticRole::Asset,
        patterns: &[KeywordPattern::excluding("bien", "categoria")],
    },
    RoleRule {
        role: SemanticRole::Weapon,
        patterns: &[
            KeywordPattern::new("arma"),
            KeywordPattern::excluding("medio", "transporte"),
        ],
    },
    RoleRule {
        role: SemanticRole::Transport,
        patterns: &[KeywordPattern::new("transporte")],
    },
    RoleRule {
        role: SemanticRole::Sex,
        patterns: &[KeywordPattern::new("sexo")],
    },
    RoleRule {
        role: SemanticRole::RentValue,
        patterns: &[
            KeywordPattern::new("promedio"),
            KeywordPattern::new("rango"),
            KeywordPattern::new("precio"),
        ],
    },
];

/// Keywords marking a column as geographic text subject to normalization.
pub const GEO_KEYWORDS: [&str; 6] = [
    "departamento",
    "municipio",
    "comuna",
    "sector",
    "barrio",
    "codigo",
];

/// Looks up the rule for a role in the default table.
pub fn rule_for(role: SemanticRole) -> Option<&'static RoleRule> {
    ROLE_RULES.iter().find(|rule| rule.role == role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_a_rule() {
        for role in SemanticRole::ALL {
            assert!(rule_for(role).is_some(), "no rule for {role}");
        }
    }

    #[test]
    fn asset_excludes_category_columns() {
        let rule = rule_for(SemanticRole::Asset).unwrap();
        assert!(rule.matches("bien"));
        assert!(!rule.matches("categoria_bien"));
    }

    #[test]
    fn weapon_exclusion_only_applies_to_medio() {
        let rule = rule_for(SemanticRole::Weapon).unwrap();
        assert!(rule.matches("arma_medio"));
        assert!(rule.matches("medio_agresion"));
        assert!(!rule.matches("medio_transporte"));
        assert!(rule.matches("arma_o_medio_transporte"));
    }
}
