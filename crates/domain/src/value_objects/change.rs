//! Change records: atomic stat modifiers carried by a buff container.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Ability;

/// What a change modifies.
///
/// Serialized as the sub-target key ("str", "nac", "carryStr", "carryMult").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChangeTarget {
    Ability(Ability),
    NaturalArmor,
    CarryStrength,
    CarryMultiplier,
}

impl ChangeTarget {
    /// Broad category, e.g. "ability" or "ac".
    pub fn category(self) -> &'static str {
        match self {
            Self::Ability(_) => "ability",
            Self::NaturalArmor => "ac",
            Self::CarryStrength | Self::CarryMultiplier => "misc",
        }
    }

    pub fn sub_target(self) -> &'static str {
        match self {
            Self::Ability(ability) => ability.as_str(),
            Self::NaturalArmor => "nac",
            Self::CarryStrength => "carryStr",
            Self::CarryMultiplier => "carryMult",
        }
    }

    pub fn is_capacity_term(self) -> bool {
        matches!(self, Self::CarryStrength | Self::CarryMultiplier)
    }
}

impl FromStr for ChangeTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nac" => Ok(Self::NaturalArmor),
            "carryStr" => Ok(Self::CarryStrength),
            "carryMult" => Ok(Self::CarryMultiplier),
            other => other
                .parse::<Ability>()
                .map(Self::Ability)
                .map_err(|_| DomainError::parse(format!("Unknown change target: {}", s))),
        }
    }
}

impl TryFrom<String> for ChangeTarget {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChangeTarget> for String {
    fn from(target: ChangeTarget) -> Self {
        target.sub_target().to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOperator {
    #[default]
    Add,
    Set,
}

/// Bonus type. Same-typed bonuses would not stack in play; the engine only sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierType {
    #[default]
    Untyped,
    Size,
    Enhancement,
    Base,
}

impl ModifierType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Untyped => "untyped",
            Self::Size => "size",
            Self::Enhancement => "enhancement",
            Self::Base => "base",
        }
    }
}

/// One atomic stat modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    pub sub_target: ChangeTarget,
    #[serde(default)]
    pub operator: ChangeOperator,
    #[serde(default)]
    pub modifier: ModifierType,
    #[serde(default)]
    pub priority: i32,
    pub formula: String,
    pub value: f64,
}

impl ChangeRecord {
    /// Additive change whose formula is the rendered value.
    pub fn add(target: ChangeTarget, value: f64, modifier: ModifierType) -> Self {
        Self {
            sub_target: target,
            operator: ChangeOperator::Add,
            modifier,
            priority: 0,
            formula: format_number(value),
            value,
        }
    }

    pub fn ability(ability: Ability, value: i32) -> Self {
        Self::add(
            ChangeTarget::Ability(ability),
            f64::from(value),
            ModifierType::Size,
        )
    }

    pub fn natural_armor(value: i32) -> Self {
        Self::add(ChangeTarget::NaturalArmor, f64::from(value), ModifierType::Size)
    }

    pub fn with_modifier(mut self, modifier: ModifierType) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn target(&self) -> ChangeTarget {
        self.sub_target
    }

    pub fn is_capacity_term(&self) -> bool {
        self.sub_target.is_capacity_term()
    }

    /// Signed additive contribution to `target`, zero for other targets and `Set` changes.
    pub fn additive_for(&self, target: ChangeTarget) -> f64 {
        if self.sub_target == target && self.operator == ChangeOperator::Add {
            self.value
        } else {
            0.0
        }
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.value >= 0.0 { "+" } else { "" };
        write!(f, "{}{} {}", sign, self.formula, self.sub_target.sub_target())
    }
}

/// Renders a change value the way formulas are written: integers without
/// a fraction, other values with at most four decimals.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let text = format!("{:.4}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Sum of additive changes to `target`.
pub fn total_for(changes: &[ChangeRecord], target: ChangeTarget) -> f64 {
    changes.iter().map(|c| c.additive_for(target)).sum()
}
