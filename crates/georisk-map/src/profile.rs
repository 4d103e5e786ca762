//! Which roles each source needs, and which of them are mandatory.

use serde::Serialize;

use georisk_model::{SemanticRole, SourceKind};

/// A role searched for in one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleRequirement {
    pub role: SemanticRole,
    pub mandatory: bool,
}

/// The set of roles detected for one source.
///
/// Mandatory roles abort detection when no column matches; optional roles
/// are simply left out of the resulting map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionProfile {
    pub dataset: String,
    pub requirements: Vec<RoleRequirement>,
}

const GEO_ROLES: [SemanticRole; 5] = [
    SemanticRole::Department,
    SemanticRole::Municipality,
    SemanticRole::Commune,
    SemanticRole::Sector,
    SemanticRole::Neighborhood,
];

const DESCRIPTIVE_ROLES: [SemanticRole; 7] = [
    SemanticRole::Office,
    SemanticRole::Conduct,
    SemanticRole::Modality,
    SemanticRole::Asset,
    SemanticRole::Weapon,
    SemanticRole::Transport,
    SemanticRole::Sex,
];

impl DetectionProfile {
    /// A profile with every listed role optional.
    pub fn new(dataset: impl Into<String>, roles: &[SemanticRole]) -> Self {
        Self {
            dataset: dataset.into(),
            requirements: roles
                .iter()
                .map(|&role| RoleRequirement {
                    role,
                    mandatory: false,
                })
                .collect(),
        }
    }

    /// Marks roles as mandatory, adding them if not yet listed.
    pub fn require(mut self, roles: &[SemanticRole]) -> Self {
        for &role in roles {
            match self.requirements.iter_mut().find(|r| r.role == role) {
                Some(existing) => existing.mandatory = true,
                None => self.requirements.push(RoleRequirement {
                    role,
                    mandatory: true,
                }),
            }
        }
        self
    }

    /// Default profile for a source.
    pub fn for_source(kind: SourceKind) -> Self {
        let name = kind.as_str();
        match kind {
            SourceKind::Robberies => {
                let roles: Vec<SemanticRole> = GEO_ROLES
                    .into_iter()
                    .chain([SemanticRole::Date])
                    .chain(DESCRIPTIVE_ROLES)
                    .collect();
                Self::new(name, &roles).require(&[SemanticRole::Date])
            }
            SourceKind::Police => {
                let roles: Vec<SemanticRole> = GEO_ROLES
                    .into_iter()
                    .chain([SemanticRole::Date, SemanticRole::CaseCount])
                    .chain(DESCRIPTIVE_ROLES)
                    .collect();
                Self::new(name, &roles).require(&[
                    SemanticRole::Municipality,
                    SemanticRole::Date,
                    SemanticRole::CaseCount,
                ])
            }
            SourceKind::Communes => {
                let roles: Vec<SemanticRole> = GEO_ROLES
                    .into_iter()
                    .chain([SemanticRole::Year, SemanticRole::CaseCount])
                    .collect();
                Self::new(name, &roles).require(&[
                    SemanticRole::Commune,
                    SemanticRole::CaseCount,
                    SemanticRole::Year,
                ])
            }
            SourceKind::Rent => {
                let roles: Vec<SemanticRole> = GEO_ROLES
                    .into_iter()
                    .chain([SemanticRole::RentValue])
                    .collect();
                Self::new(name, &roles)
            }
        }
    }

    pub fn mandatory_roles(&self) -> impl Iterator<Item = SemanticRole> + '_ {
        self.requirements
            .iter()
            .filter(|r| r.mandatory)
            .map(|r| r.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn police_requires_municipality_date_and_count() {
        let profile = DetectionProfile::for_source(SourceKind::Police);
        let mandatory: Vec<_> = profile.mandatory_roles().collect();
        assert_eq!(
            mandatory,
            vec![
                SemanticRole::Municipality,
                SemanticRole::Date,
                SemanticRole::CaseCount
            ]
        );
    }

    #[test]
    fn rent_has_no_mandatory_roles() {
        let profile = DetectionProfile::for_source(SourceKind::Rent);
        assert_eq!(profile.mandatory_roles().count(), 0);
        assert!(
            profile
                .requirements
                .iter()
                .any(|r| r.role == SemanticRole::RentValue)
        );
    }

    #[test]
    fn require_adds_unlisted_roles() {
        let profile = DetectionProfile::new("custom", &[SemanticRole::Sector])
            .require(&[SemanticRole::Sector, SemanticRole::Year]);
        assert_eq!(profile.requirements.len(), 2);
        assert!(profile.requirements.iter().all(|r| r.mandatory));
    }
}
