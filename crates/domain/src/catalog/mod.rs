//! The static form catalog and the rule tables that accompany it.
//!
//! Forms are loaded once from JSON. Tags are parsed into enumerations at load
//! time, so a form with an unknown sense, damage type, or special ability
//! fails here rather than rendering as stray text later.

mod buffs;
mod effects;
mod form_changes;
mod natural;

use std::collections::HashSet;

use crate::entities::FormDefinition;
use crate::error::DomainError;
use crate::shapeshift::SpellKind;

pub use buffs::{BuffDefinition, BuffKind, SizeRule};
pub use effects::{
    EffectDetail, SaveTemplate, SpecialEffectTable, StandardEffects, SPECIAL_SAVE_DC,
};
pub use form_changes::{form_changes, polymorph_base_adjustment};
pub use natural::{attack_icon, natural_attack, NaturalAttack, DEFAULT_ATTACK_ICON};

const BUILTIN_FORMS: &str = include_str!("../../data/forms.json");

/// Read-only registry of form definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    forms: Vec<FormDefinition>,
}

impl Catalog {
    /// Validate and wrap a list of forms.
    pub fn new(forms: Vec<FormDefinition>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        for form in &forms {
            if form.name.trim().is_empty() {
                return Err(DomainError::validation("Form name cannot be empty"));
            }
            if !seen.insert(form.name.to_lowercase()) {
                return Err(DomainError::constraint(format!(
                    "Duplicate form in catalog: {}",
                    form.name
                )));
            }
            for attack in form.attacks.iter().chain(&form.special_attacks) {
                if attack.count == 0 {
                    return Err(DomainError::validation(format!(
                        "{} attack {} has a count of zero",
                        form.name, attack.name
                    )));
                }
            }
        }
        Ok(Self { forms })
    }

    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let forms: Vec<FormDefinition> = serde_json::from_str(json)
            .map_err(|e| DomainError::parse(format!("Invalid form catalog: {}", e)))?;
        Self::new(forms)
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, DomainError> {
        Self::from_json(BUILTIN_FORMS)
    }

    pub fn forms(&self) -> &[FormDefinition] {
        &self.forms
    }

    pub fn get(&self, name: &str) -> Option<&FormDefinition> {
        self.forms
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Forms `kind` can assume at `level`, sorted by name.
    pub fn filter(&self, kind: SpellKind, level: u8) -> Result<Vec<&FormDefinition>, DomainError> {
        let level = kind.validate_level(level)?;
        let mut forms: Vec<&FormDefinition> = self
            .forms
            .iter()
            .filter(|f| kind.allows_form(level, f.family, f.size))
            .collect();
        forms.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(forms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::SizeCategory;

    fn names(forms: &[&FormDefinition]) -> Vec<String> {
        forms.iter().map(|f| f.name.clone()).collect()
    }

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.forms().len() > 30);
        assert!(catalog.get("wolf").is_some());
    }

    #[test]
    fn beast_shape_one_offers_small_and_medium_animals() {
        let catalog = Catalog::builtin().unwrap();
        let forms = catalog.filter(SpellKind::BeastShape, 1).unwrap();
        assert_eq!(names(&forms), vec!["Eagle", "Octopus", "Wolf"]);
    }

    #[test]
    fn elemental_body_widens_with_level() {
        let catalog = Catalog::builtin().unwrap();
        let one = catalog.filter(SpellKind::ElementalBody, 1).unwrap();
        assert_eq!(one.len(), 4);
        assert!(one.iter().all(|f| f.size == SizeCategory::Small));
        let four = catalog.filter(SpellKind::ElementalBody, 4).unwrap();
        assert_eq!(four.len(), 16);
    }

    #[test]
    fn filter_is_a_superset_at_higher_levels() {
        let catalog = Catalog::builtin().unwrap();
        for kind in SpellKind::ALL {
            for level in 1..kind.max_level() {
                let lower = names(&catalog.filter(kind, level).unwrap());
                let higher = names(&catalog.filter(kind, level + 1).unwrap());
                assert!(lower.iter().all(|n| higher.contains(n)), "{kind} L{level}");
            }
        }
    }

    #[test]
    fn rejects_unknown_special_tags() {
        let json = r#"[{"name":"Laser Cat","family":"animal","size":"tiny","special":["laserEyes"]}]"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
    }

    #[test]
    fn rejects_duplicate_names() {
        let json = r#"[{"name":"Wolf","family":"animal","size":"med"},{"name":"wolf","family":"animal","size":"med"}]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(DomainError::Constraint(_))
        ));
    }

    #[test]
    fn invalid_level_is_rejected() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.filter(SpellKind::PlantShape, 4).is_err());
    }
}
