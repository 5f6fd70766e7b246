//! Abstract attack descriptors as written in the form catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{Ability, DamageType, SpecialTag};

/// How an attack resolves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackType {
    #[default]
    Melee,
    Ranged,
    Save,
    Maneuver,
}

impl AttackType {
    /// Action type code written on generated attack actions.
    pub fn action_code(self) -> &'static str {
        match self {
            Self::Melee => "mwak",
            Self::Ranged => "rwak",
            Self::Save => "save",
            Self::Maneuver => "mcman",
        }
    }
}

/// Fixed bonus damage that is not multiplied on a critical hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusDamage {
    pub formula: String,
    pub damage_type: DamageType,
}

impl fmt::Display for BonusDamage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.formula, self.damage_type)
    }
}

fn default_count() -> u8 {
    1
}

fn default_crit_range() -> u8 {
    20
}

fn default_crit_multiplier() -> u8 {
    2
}

/// One natural or special attack of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackDescriptor {
    pub name: String,
    #[serde(default)]
    pub attack_type: AttackType,
    #[serde(default)]
    pub dice_count: u8,
    /// Zero means the attack deals only its [`BonusDamage`].
    #[serde(default)]
    pub dice_size: u8,
    #[serde(default = "default_count")]
    pub count: u8,
    #[serde(default = "default_crit_range")]
    pub crit_range: u8,
    #[serde(default = "default_crit_multiplier")]
    pub crit_multiplier: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub special: Vec<SpecialTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_crit: Option<BonusDamage>,
    /// Explicit primary flag; otherwise inferred from the natural attack table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub damage_types: Vec<DamageType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_ability: Option<Ability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_mult: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increment: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<u8>,
}

impl AttackDescriptor {
    pub fn new(name: impl Into<String>, dice_count: u8, dice_size: u8) -> Self {
        Self {
            name: name.into(),
            attack_type: AttackType::Melee,
            dice_count,
            dice_size,
            count: 1,
            crit_range: 20,
            crit_multiplier: 2,
            special: Vec::new(),
            non_crit: None,
            primary: None,
            damage_types: Vec::new(),
            attack_ability: None,
            damage_mult: None,
            range: None,
            increment: None,
            charges: None,
        }
    }

    pub fn has_scaling_die(&self) -> bool {
        self.dice_size != 0
    }

    /// "1d6", or `None` for fixed-damage attacks.
    pub fn dice_expression(&self) -> Option<String> {
        self.has_scaling_die()
            .then(|| format!("{}d{}", self.dice_count, self.dice_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_defaults_apply() {
        let attack: AttackDescriptor =
            serde_json::from_str(r#"{"name":"Bite","diceCount":1,"diceSize":6,"special":["trip"]}"#)
                .unwrap();
        assert_eq!(attack.count, 1);
        assert_eq!(attack.crit_range, 20);
        assert_eq!(attack.crit_multiplier, 2);
        assert_eq!(attack.attack_type, AttackType::Melee);
        assert_eq!(attack.special.len(), 1);
        assert_eq!(attack.dice_expression().as_deref(), Some("1d6"));
    }

    #[test]
    fn zero_die_size_has_no_dice_expression() {
        let attack = AttackDescriptor::new("Burn", 0, 0);
        assert!(!attack.has_scaling_die());
        assert_eq!(attack.dice_expression(), None);
    }
}
