//! Form definitions: the creature shapes a polymorph effect can assume.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{
    AttackDescriptor, DamageReduction, DamageType, EnergyResistance, Regeneration, Sense,
    SizeCategory, SpecialTag, SpeedSet,
};

/// Creature family; decides which spells can reach a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormFamily {
    Animal,
    MagicalBeast,
    AirElemental,
    EarthElemental,
    FireElemental,
    WaterElemental,
    Plant,
}

impl FormFamily {
    pub fn is_elemental(self) -> bool {
        matches!(
            self,
            Self::AirElemental | Self::EarthElemental | Self::FireElemental | Self::WaterElemental
        )
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Animal => "Animal",
            Self::MagicalBeast => "Magical Beast",
            Self::AirElemental => "Air Elemental",
            Self::EarthElemental => "Earth Elemental",
            Self::FireElemental => "Fire Elemental",
            Self::WaterElemental => "Water Elemental",
            Self::Plant => "Plant",
        }
    }
}

impl fmt::Display for FormFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A named shape with its complete, ungated attribute set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    pub name: String,
    pub family: FormFamily,
    pub size: SizeCategory,
    #[serde(default)]
    pub speed: SpeedSet,
    #[serde(default)]
    pub attacks: Vec<AttackDescriptor>,
    #[serde(default)]
    pub special_attacks: Vec<AttackDescriptor>,
    #[serde(default)]
    pub senses: Vec<Sense>,
    #[serde(default)]
    pub special: Vec<SpecialTag>,
    #[serde(default)]
    pub energy_resistances: Vec<EnergyResistance>,
    #[serde(default)]
    pub vulnerabilities: Vec<DamageType>,
    #[serde(default)]
    pub damage_immunities: Vec<DamageType>,
    #[serde(default)]
    pub damage_reduction: Vec<DamageReduction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regeneration: Option<Regeneration>,
}

impl FormDefinition {
    pub fn new(name: impl Into<String>, family: FormFamily, size: SizeCategory) -> Self {
        Self {
            name: name.into(),
            family,
            size,
            speed: SpeedSet::default(),
            attacks: Vec::new(),
            special_attacks: Vec::new(),
            senses: Vec::new(),
            special: Vec::new(),
            energy_resistances: Vec::new(),
            vulnerabilities: Vec::new(),
            damage_immunities: Vec::new(),
            damage_reduction: Vec::new(),
            regeneration: None,
        }
    }
}
