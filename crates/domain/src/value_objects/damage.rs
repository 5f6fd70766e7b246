//! Damage types, energy resistance, damage reduction, and regeneration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// A damage classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Bludgeoning,
    Piercing,
    Slashing,
    Acid,
    Cold,
    Electric,
    Fire,
    Sonic,
    Force,
    Negative,
    Positive,
    Bleed,
    Poison,
    Precision,
}

impl DamageType {
    /// The five elemental energies.
    pub const ENERGY: [DamageType; 5] = [
        Self::Acid,
        Self::Cold,
        Self::Electric,
        Self::Fire,
        Self::Sonic,
    ];

    pub fn is_energy(self) -> bool {
        Self::ENERGY.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bludgeoning => "bludgeoning",
            Self::Piercing => "piercing",
            Self::Slashing => "slashing",
            Self::Acid => "acid",
            Self::Cold => "cold",
            Self::Electric => "electric",
            Self::Fire => "fire",
            Self::Sonic => "sonic",
            Self::Force => "force",
            Self::Negative => "negative",
            Self::Positive => "positive",
            Self::Bleed => "bleed",
            Self::Poison => "poison",
            Self::Precision => "precision",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Bludgeoning => "Bludgeoning",
            Self::Piercing => "Piercing",
            Self::Slashing => "Slashing",
            Self::Acid => "Acid",
            Self::Cold => "Cold",
            Self::Electric => "Electricity",
            Self::Fire => "Fire",
            Self::Sonic => "Sonic",
            Self::Force => "Force",
            Self::Negative => "Negative Energy",
            Self::Positive => "Positive Energy",
            Self::Bleed => "Bleed",
            Self::Poison => "Poison",
            Self::Precision => "Precision",
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for DamageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let all = [
            Self::Bludgeoning,
            Self::Piercing,
            Self::Slashing,
            Self::Acid,
            Self::Cold,
            Self::Electric,
            Self::Fire,
            Self::Sonic,
            Self::Force,
            Self::Negative,
            Self::Positive,
            Self::Bleed,
            Self::Poison,
            Self::Precision,
        ];
        all.into_iter()
            .find(|t| t.as_str() == lowered || t.display_name().to_lowercase() == lowered)
            .ok_or_else(|| DomainError::parse(format!("Unknown damage type: {}", s)))
    }
}

/// Resistance to one energy type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyResistance {
    pub damage_type: DamageType,
    pub amount: u16,
}

impl EnergyResistance {
    pub fn new(damage_type: DamageType, amount: u16) -> Self {
        Self {
            damage_type,
            amount,
        }
    }
}

impl fmt::Display for EnergyResistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.damage_type, self.amount)
    }
}

/// What overcomes a damage reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrBypass {
    Adamantine,
    ColdIron,
    Silver,
    Magic,
    Good,
    Evil,
    Lawful,
    Chaotic,
    Bludgeoning,
    Piercing,
    Slashing,
}

impl DrBypass {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Adamantine => "adamantine",
            Self::ColdIron => "cold iron",
            Self::Silver => "silver",
            Self::Magic => "magic",
            Self::Good => "good",
            Self::Evil => "evil",
            Self::Lawful => "lawful",
            Self::Chaotic => "chaotic",
            Self::Bludgeoning => "bludgeoning",
            Self::Piercing => "piercing",
            Self::Slashing => "slashing",
        }
    }
}

/// How several bypass materials combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrOperator {
    #[default]
    Or,
    And,
}

/// Damage reduction, e.g. "10/magic" or "5/-".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageReduction {
    pub amount: u16,
    /// Empty means nothing bypasses it ("-").
    #[serde(default)]
    pub bypass: Vec<DrBypass>,
    #[serde(default)]
    pub operator: DrOperator,
}

impl DamageReduction {
    pub fn new(amount: u16, bypass: Vec<DrBypass>) -> Self {
        Self {
            amount,
            bypass,
            operator: DrOperator::Or,
        }
    }
}

impl fmt::Display for DamageReduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bypass.is_empty() {
            return write!(f, "{}/-", self.amount);
        }
        let joiner = match self.operator {
            DrOperator::Or => " or ",
            DrOperator::And => " and ",
        };
        let names: Vec<&str> = self.bypass.iter().map(|b| b.display_name()).collect();
        write!(f, "{}/{}", self.amount, names.join(joiner))
    }
}

/// Regeneration suppressed by the listed damage types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Regeneration {
    pub amount: u16,
    #[serde(default)]
    pub counters: Vec<DamageType>,
}

impl fmt::Display for Regeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.counters.is_empty() {
            return write!(f, "{}", self.amount);
        }
        let names: Vec<&str> = self.counters.iter().map(|c| c.display_name()).collect();
        write!(f, "{} ({})", self.amount, names.join(" or "))
    }
}
