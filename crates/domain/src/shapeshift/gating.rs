//! Per-spell, per-level gating tables.
//!
//! Each polymorph spell kind exposes more of a form as its level rises. The
//! tables here are consulted once by the resolver; no spell kind overrides
//! resolution logic of its own.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::FormFamily;
use crate::error::DomainError;
use crate::value_objects::{Sense, SenseKind, SizeCategory, SpecialKind, SpecialTag, SpeedCaps};

/// A polymorph spell family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpellKind {
    BeastShape,
    ElementalBody,
    PlantShape,
}

impl SpellKind {
    pub const ALL: [SpellKind; 3] = [Self::BeastShape, Self::ElementalBody, Self::PlantShape];

    pub fn max_level(self) -> u8 {
        match self {
            Self::BeastShape | Self::ElementalBody => 4,
            Self::PlantShape => 3,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::BeastShape => "Beast Shape",
            Self::ElementalBody => "Elemental Body",
            Self::PlantShape => "Plant Shape",
        }
    }

    pub fn validate_level(self, level: u8) -> Result<u8, DomainError> {
        if (1..=self.max_level()).contains(&level) {
            Ok(level)
        } else {
            Err(DomainError::validation(format!(
                "{} level must be 1-{}, got {}",
                self.display_name(),
                self.max_level(),
                level
            )))
        }
    }

    /// Whether a form of `family` and `size` can be assumed at `level`.
    pub fn allows_form(self, level: u8, family: FormFamily, size: SizeCategory) -> bool {
        use SizeCategory::*;
        let within = |lo: SizeCategory, hi: SizeCategory| (lo..=hi).contains(&size);
        match (self, family) {
            (Self::BeastShape, FormFamily::Animal) => match level {
                1 => within(Small, Medium),
                2 => within(Tiny, Large),
                3 | 4 => within(Diminutive, Huge),
                _ => false,
            },
            (Self::BeastShape, FormFamily::MagicalBeast) => match level {
                3 => within(Small, Medium),
                4 => within(Tiny, Large),
                _ => false,
            },
            (Self::ElementalBody, family) if family.is_elemental() => match level {
                1 => size == Small,
                2 => within(Small, Medium),
                3 => within(Small, Large),
                4 => within(Small, Huge),
                _ => false,
            },
            (Self::PlantShape, FormFamily::Plant) => match level {
                1 => within(Small, Medium),
                2 => within(Small, Large),
                3 => within(Small, Huge),
                _ => false,
            },
            _ => false,
        }
    }

    /// Speed caps, senses, and special tags permitted at `level`.
    pub fn gate(self, level: u8) -> Result<LevelGate, DomainError> {
        let level = self.validate_level(level)?;
        let gate = match self {
            Self::BeastShape => beast_shape_gate(level),
            Self::ElementalBody => elemental_body_gate(level),
            Self::PlantShape => plant_shape_gate(level),
        };
        Ok(gate)
    }

    pub fn thresholds(self) -> CategoryThresholds {
        match self {
            Self::BeastShape => CategoryThresholds {
                energy_resistance: Some(4),
                vulnerabilities: Some(4),
                damage_immunities: None,
                damage_reduction: None,
                regeneration: None,
            },
            Self::ElementalBody => CategoryThresholds {
                energy_resistance: Some(1),
                vulnerabilities: Some(1),
                damage_immunities: Some(3),
                damage_reduction: Some(4),
                regeneration: None,
            },
            Self::PlantShape => CategoryThresholds {
                energy_resistance: Some(2),
                vulnerabilities: Some(1),
                damage_immunities: None,
                damage_reduction: Some(3),
                regeneration: Some(3),
            },
        }
    }

    pub fn energy_policy(self) -> EnergyPolicy {
        match self {
            Self::BeastShape | Self::PlantShape => EnergyPolicy {
                elemental_only: true,
                fold_immunities: true,
                resistance_cap: Some(FOLDED_RESISTANCE),
            },
            Self::ElementalBody => EnergyPolicy::default(),
        }
    }
}

impl fmt::Display for SpellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for SpellKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "beastshape" => Ok(Self::BeastShape),
            "elementalbody" => Ok(Self::ElementalBody),
            "plantshape" => Ok(Self::PlantShape),
            _ => Err(DomainError::parse(format!("Unknown spell kind: {}", s))),
        }
    }
}

/// Resistance granted for each folded energy immunity.
pub const FOLDED_RESISTANCE: u16 = 20;

/// What one spell level lets through.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelGate {
    pub level: u8,
    pub speed_caps: SpeedCaps,
    /// Allowed senses; ranged entries carry the maximum range.
    pub senses: Vec<Sense>,
    pub specials: Vec<SpecialKind>,
}

impl LevelGate {
    /// The sense as permitted here: `None` if not allowed, clamped if too strong.
    pub fn allow_sense(&self, sense: &Sense) -> Option<Sense> {
        let allowed = self.senses.iter().find(|s| s.kind == sense.kind)?;
        if sense.kind.is_ranged() {
            Some(sense.clamped(allowed.range))
        } else {
            Some(*sense)
        }
    }

    pub fn allows_tag(&self, tag: &SpecialTag) -> bool {
        self.specials.contains(&tag.kind)
    }
}

/// Minimum level per resistance-like category; `None` means never exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryThresholds {
    pub energy_resistance: Option<u8>,
    pub vulnerabilities: Option<u8>,
    pub damage_immunities: Option<u8>,
    pub damage_reduction: Option<u8>,
    pub regeneration: Option<u8>,
}

/// Whether a category with `threshold` is exposed at `level`.
pub fn unlocked(threshold: Option<u8>, level: u8) -> bool {
    threshold.is_some_and(|min| level >= min)
}

/// How energy resistances and immunities are reshaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnergyPolicy {
    /// Keep only acid, cold, electricity, fire, and sonic.
    pub elemental_only: bool,
    /// Turn energy immunities into resistance [`FOLDED_RESISTANCE`].
    pub fold_immunities: bool,
    pub resistance_cap: Option<u16>,
}

fn caps(burrow: Option<u16>, climb: Option<u16>, swim: Option<u16>, fly: Option<u16>) -> SpeedCaps {
    SpeedCaps {
        burrow,
        climb,
        swim,
        fly,
    }
}

fn beast_shape_gate(level: u8) -> LevelGate {
    use SpecialKind::*;

    let speed_caps = match level {
        1 => caps(Some(0), Some(30), Some(30), Some(30)),
        2 => caps(Some(0), Some(60), Some(60), Some(60)),
        3 => caps(Some(30), Some(90), Some(90), Some(90)),
        _ => caps(Some(60), Some(90), Some(120), Some(120)),
    };

    let mut senses = vec![
        Sense::unranged(SenseKind::LowLight),
        Sense::new(SenseKind::Darkvision, if level >= 4 { 90 } else { 60 }),
        Sense::unranged(SenseKind::Scent),
    ];
    if level >= 3 {
        senses.push(Sense::new(SenseKind::Blindsense, if level >= 4 { 60 } else { 30 }));
        senses.push(Sense::new(SenseKind::Tremorsense, 60));
    }

    let mut specials = Vec::new();
    if level >= 2 {
        specials.extend([Grab, Pounce, Trip]);
    }
    if level >= 3 {
        specials.extend([Constrict, Ferocity, Jet, Poison, Rake, Trample, Web]);
    }
    if level >= 4 {
        specials.extend([BreathWeapon, Rend, Roar, Spikes]);
    }

    LevelGate {
        level,
        speed_caps,
        senses,
        specials,
    }
}

fn elemental_body_gate(level: u8) -> LevelGate {
    use SpecialKind::*;

    let cap = if level >= 4 { 120 } else { 60 };
    LevelGate {
        level,
        speed_caps: caps(None, None, Some(cap), Some(cap)),
        senses: vec![Sense::new(SenseKind::Darkvision, 60)],
        specials: vec![Burn, Drench, EarthGlide, Vortex, WaterBreathing, Whirlwind],
    }
}

fn plant_shape_gate(level: u8) -> LevelGate {
    use SpecialKind::*;

    let mut specials = vec![Constrict, Grab, Poison];
    if level >= 3 {
        specials.push(Trample);
    }
    LevelGate {
        level,
        speed_caps: SpeedCaps::default(),
        senses: vec![
            Sense::unranged(SenseKind::LowLight),
            Sense::new(SenseKind::Darkvision, 60),
        ],
        specials,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_levels_outside_range() {
        assert!(SpellKind::PlantShape.gate(4).is_err());
        assert!(SpellKind::BeastShape.gate(0).is_err());
        assert!(SpellKind::ElementalBody.gate(4).is_ok());
    }

    #[test]
    fn parses_spell_kind_names() {
        assert_eq!("beast-shape".parse::<SpellKind>().ok(), Some(SpellKind::BeastShape));
        assert_eq!("Elemental Body".parse::<SpellKind>().ok(), Some(SpellKind::ElementalBody));
        assert!("wild-shape".parse::<SpellKind>().is_err());
    }

    #[test]
    fn form_sizes_widen_with_level() {
        let kind = SpellKind::BeastShape;
        assert!(!kind.allows_form(1, FormFamily::Animal, SizeCategory::Large));
        assert!(kind.allows_form(2, FormFamily::Animal, SizeCategory::Large));
        assert!(!kind.allows_form(2, FormFamily::MagicalBeast, SizeCategory::Medium));
        assert!(kind.allows_form(3, FormFamily::MagicalBeast, SizeCategory::Medium));
        assert!(kind.allows_form(4, FormFamily::MagicalBeast, SizeCategory::Tiny));
        assert!(!kind.allows_form(4, FormFamily::Plant, SizeCategory::Medium));
        assert!(SpellKind::ElementalBody.allows_form(
            1,
            FormFamily::FireElemental,
            SizeCategory::Small
        ));
        assert!(!SpellKind::ElementalBody.allows_form(
            1,
            FormFamily::FireElemental,
            SizeCategory::Medium
        ));
    }

    #[test]
    fn senses_clamp_to_level_maximum() {
        let gate = SpellKind::BeastShape.gate(3).unwrap();
        let clamped = gate.allow_sense(&Sense::new(SenseKind::Blindsense, 40));
        assert_eq!(clamped, Some(Sense::new(SenseKind::Blindsense, 30)));
        assert_eq!(gate.allow_sense(&Sense::new(SenseKind::Blindsight, 30)), None);

        let gate = SpellKind::BeastShape.gate(2).unwrap();
        assert_eq!(gate.allow_sense(&Sense::new(SenseKind::Blindsense, 40)), None);
    }

    #[test]
    fn gated_sets_grow_monotonically() {
        for kind in SpellKind::ALL {
            for level in 1..kind.max_level() {
                let lower = kind.gate(level).unwrap();
                let higher = kind.gate(level + 1).unwrap();
                assert!(lower.specials.iter().all(|s| higher.specials.contains(s)));
                for sense in &lower.senses {
                    let allowed = higher.allow_sense(sense);
                    assert_eq!(allowed, Some(*sense), "{kind} L{level} {sense:?}");
                }
            }
        }
    }

    #[test]
    fn thresholds_unlock_categories() {
        let plant = SpellKind::PlantShape.thresholds();
        assert!(!unlocked(plant.energy_resistance, 1));
        assert!(unlocked(plant.energy_resistance, 2));
        assert!(!unlocked(plant.damage_reduction, 2));
        assert!(unlocked(plant.regeneration, 3));
        assert!(!unlocked(SpellKind::ElementalBody.thresholds().regeneration, 4));
    }
}
