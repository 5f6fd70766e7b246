//! The size-changing buffs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::{
    Ability, ChangeRecord, DamageReduction, DrBypass, ModifierType, SizeCategory,
};

/// How a buff moves the character along the size scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeRule {
    Step(i32),
    Set(SizeCategory),
}

impl SizeRule {
    pub fn apply(self, current: SizeCategory) -> SizeCategory {
        match self {
            Self::Step(steps) => current.stepped(steps),
            Self::Set(size) => size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuffKind {
    EnlargePerson,
    ReducePerson,
    AnimalGrowth,
    LegendaryProportions,
    FrightfulAspect,
}

impl BuffKind {
    pub const ALL: [BuffKind; 5] = [
        Self::EnlargePerson,
        Self::ReducePerson,
        Self::AnimalGrowth,
        Self::LegendaryProportions,
        Self::FrightfulAspect,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::EnlargePerson => "Enlarge Person",
            Self::ReducePerson => "Reduce Person",
            Self::AnimalGrowth => "Animal Growth",
            Self::LegendaryProportions => "Legendary Proportions",
            Self::FrightfulAspect => "Frightful Aspect",
        }
    }

    pub fn definition(self) -> BuffDefinition {
        let size = ChangeRecord::ability;
        let armor = |value| ChangeRecord::natural_armor(value).with_modifier(ModifierType::Enhancement);
        match self {
            Self::EnlargePerson => BuffDefinition {
                kind: self,
                icon: "icons/magic/control/silhouette-grow-shrink-blue.webp",
                size_rule: SizeRule::Step(1),
                changes: vec![size(Ability::Str, 2), size(Ability::Dex, -2)],
                damage_reduction: None,
                grants_spell_resistance: false,
            },
            Self::ReducePerson => BuffDefinition {
                kind: self,
                icon: "icons/magic/control/silhouette-grow-shrink-tan.webp",
                size_rule: SizeRule::Step(-1),
                changes: vec![size(Ability::Dex, 2), size(Ability::Str, -2)],
                damage_reduction: None,
                grants_spell_resistance: false,
            },
            Self::AnimalGrowth => BuffDefinition {
                kind: self,
                icon: "icons/creatures/mammals/wolf-howl-moon-gray.webp",
                size_rule: SizeRule::Step(1),
                changes: vec![
                    size(Ability::Str, 4),
                    size(Ability::Con, 4),
                    size(Ability::Dex, -2),
                    armor(2),
                ],
                damage_reduction: Some(DamageReduction::new(10, vec![DrBypass::Magic])),
                grants_spell_resistance: false,
            },
            Self::LegendaryProportions => BuffDefinition {
                kind: self,
                icon: "icons/magic/earth/strike-body-stone-crumble.webp",
                size_rule: SizeRule::Step(1),
                changes: vec![size(Ability::Str, 6), size(Ability::Con, 4), armor(6)],
                damage_reduction: Some(DamageReduction::new(10, vec![DrBypass::Adamantine])),
                grants_spell_resistance: false,
            },
            Self::FrightfulAspect => BuffDefinition {
                kind: self,
                icon: "icons/magic/death/skull-horned-goat-pentagram-red.webp",
                size_rule: SizeRule::Set(SizeCategory::Large),
                changes: vec![size(Ability::Str, 6), size(Ability::Con, 4), armor(6)],
                damage_reduction: Some(DamageReduction::new(10, vec![DrBypass::Magic])),
                grants_spell_resistance: true,
            },
        }
    }
}

impl fmt::Display for BuffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for BuffKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.display_name()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_lowercase()
                    == key
            })
            .ok_or_else(|| DomainError::parse(format!("Unknown buff: {}", s)))
    }
}

/// A buff's fixed effect.
#[derive(Debug, Clone, PartialEq)]
pub struct BuffDefinition {
    pub kind: BuffKind,
    pub icon: &'static str,
    pub size_rule: SizeRule,
    pub changes: Vec<ChangeRecord>,
    /// Appended to the character's damage reduction.
    pub damage_reduction: Option<DamageReduction>,
    /// Spell resistance 10 + half caster level.
    pub grants_spell_resistance: bool,
}

impl BuffDefinition {
    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }

    /// Spell resistance granted at `caster_level`, if any.
    pub fn spell_resistance(&self, caster_level: u8) -> Option<i32> {
        self.grants_spell_resistance
            .then(|| 10 + i32::from(caster_level) / 2)
    }
}
