//! Human-readable preview of a resolved form.
//!
//! The preview is for review before committing a transformation; nothing
//! downstream parses it. Section labels go through [`Localize`] with an
//! English fallback.

use crate::value_objects::{
    AttackDescriptor, ChangeRecord, ChangeTarget, DamageReduction, DamageType, EnergyResistance,
    Regeneration, Sense, SpecialTag, SpeedSet,
};

/// Symbolic-key string lookup.
pub trait Localize: Send + Sync {
    fn lookup(&self, key: &str) -> Option<String>;

    fn localize_or(&self, key: &str, fallback: &str) -> String {
        self.lookup(key).unwrap_or_else(|| fallback.to_string())
    }
}

/// No translations; every label falls back to English.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLabels;

impl Localize for EnglishLabels {
    fn lookup(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Preview section with its localization key and English label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewSection {
    BaseSizeAdjust,
    AbilityScores,
    Attacks,
    SpecialAttacks,
    Speeds,
    Senses,
    SpecialAbilities,
    EnergyResistances,
    Vulnerabilities,
    DamageImmunities,
    DamageReduction,
    Regeneration,
}

impl PreviewSection {
    pub fn key(self) -> &'static str {
        match self {
            Self::BaseSizeAdjust => "UI.BaseSizeAdjust",
            Self::AbilityScores => "UI.AbilityScores",
            Self::Attacks => "UI.Attacks",
            Self::SpecialAttacks => "UI.SpecialAttacks",
            Self::Speeds => "UI.Speeds",
            Self::Senses => "UI.Senses",
            Self::SpecialAbilities => "UI.SpecialAbilities",
            Self::EnergyResistances => "UI.EnergyResistances",
            Self::Vulnerabilities => "UI.Vulnerabilities",
            Self::DamageImmunities => "UI.DamageImmunities",
            Self::DamageReduction => "UI.DamageReduction",
            Self::Regeneration => "UI.Regeneration",
        }
    }

    pub fn english(self) -> &'static str {
        match self {
            Self::BaseSizeAdjust => "Base Size Adjust",
            Self::AbilityScores => "Ability Scores",
            Self::Attacks => "Attacks",
            Self::SpecialAttacks => "Special Attacks",
            Self::Speeds => "Speeds",
            Self::Senses => "Senses",
            Self::SpecialAbilities => "Special Abilities",
            Self::EnergyResistances => "Energy Resistances",
            Self::Vulnerabilities => "Vulnerabilities",
            Self::DamageImmunities => "Damage Immunities",
            Self::DamageReduction => "Damage Reduction",
            Self::Regeneration => "Regeneration",
        }
    }
}

fn none(labels: &dyn Localize) -> String {
    labels.localize_or("UI.None", "None")
}

fn join_or_none(parts: Vec<String>, labels: &dyn Localize) -> String {
    if parts.is_empty() {
        none(labels)
    } else {
        parts.join(", ")
    }
}

fn target_label(target: ChangeTarget, labels: &dyn Localize) -> String {
    match target {
        ChangeTarget::Ability(ability) => labels.localize_or(
            &format!("Abilities.{}", ability.as_str()),
            ability.display_name(),
        ),
        ChangeTarget::NaturalArmor => labels.localize_or("Changes.nac", "Natural Armor"),
        ChangeTarget::CarryStrength => labels.localize_or("Changes.carryStr", "Carry Strength"),
        ChangeTarget::CarryMultiplier => {
            labels.localize_or("Changes.carryMult", "Carry Multiplier")
        }
    }
}

/// "Strength +4, Dexterity -2, Natural Armor +4"
pub fn describe_changes(changes: &[ChangeRecord], labels: &dyn Localize) -> String {
    let parts = changes
        .iter()
        .map(|c| {
            let sign = if c.value >= 0.0 { "+" } else { "" };
            format!("{} {}{}", target_label(c.target(), labels), sign, c.formula)
        })
        .collect();
    join_or_none(parts, labels)
}

/// "2 Claw (1d6 plus Grab)", "Slam (1d4 plus 1d4 Fire)", "Spores (0 plus Poison)"
pub fn describe_attack(attack: &AttackDescriptor, labels: &dyn Localize) -> String {
    let plus = labels.localize_or("UI.Plus", "plus");
    let mut damage = attack.dice_expression().unwrap_or_default();
    if let Some(bonus) = &attack.non_crit {
        if !damage.is_empty() {
            damage.push_str(&format!(" {} ", plus));
        }
        damage.push_str(&bonus.to_string());
    }
    if damage.is_empty() {
        damage.push('0');
    }
    let specials: Vec<String> = attack.special.iter().map(SpecialTag::to_string).collect();
    let specials = if specials.is_empty() {
        String::new()
    } else {
        format!(" {} {}", plus, specials.join(", "))
    };
    let count = if attack.count > 1 {
        format!("{} ", attack.count)
    } else {
        String::new()
    };
    format!("{}{} ({}{})", count, attack.name, damage, specials)
}

pub fn describe_speeds(speeds: &SpeedSet, labels: &dyn Localize) -> String {
    let mut parts: Vec<String> = speeds
        .modes()
        .into_iter()
        .filter(|(mode, _)| *mode != crate::value_objects::MovementMode::Fly)
        .map(|(mode, speed)| format!("{} {} ft", mode.display_name(), speed))
        .collect();
    if let Some(fly) = speeds.fly {
        parts.push(format!("Fly {}", fly));
    }
    join_or_none(parts, labels)
}

/// All resolved categories, ready for rendering.
#[derive(Debug, Clone, Copy)]
pub struct PreviewInput<'a> {
    pub base_adjustment: &'a [ChangeRecord],
    pub changes: &'a [ChangeRecord],
    pub attacks: &'a [AttackDescriptor],
    pub special_attacks: &'a [AttackDescriptor],
    pub speeds: &'a SpeedSet,
    pub senses: &'a [Sense],
    pub special: &'a [SpecialTag],
    pub energy_resistances: &'a [EnergyResistance],
    pub vulnerabilities: &'a [DamageType],
    pub damage_immunities: &'a [DamageType],
    pub damage_reduction: &'a [DamageReduction],
    pub regeneration: Option<&'a Regeneration>,
}

fn display_all<T: ToString>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// One "Label: value" line per section. The base size adjustment appears only
/// when non-empty; every other section is always present.
pub fn render_preview(input: &PreviewInput<'_>, labels: &dyn Localize) -> String {
    let mut lines = Vec::new();
    let mut line = |section: PreviewSection, value: String| {
        lines.push(format!(
            "{}: {}",
            labels.localize_or(section.key(), section.english()),
            value
        ));
    };

    if !input.base_adjustment.is_empty() {
        line(
            PreviewSection::BaseSizeAdjust,
            describe_changes(input.base_adjustment, labels),
        );
    }
    line(
        PreviewSection::AbilityScores,
        describe_changes(input.changes, labels),
    );
    line(
        PreviewSection::Attacks,
        join_or_none(
            input.attacks.iter().map(|a| describe_attack(a, labels)).collect(),
            labels,
        ),
    );
    line(
        PreviewSection::SpecialAttacks,
        join_or_none(
            input
                .special_attacks
                .iter()
                .map(|a| describe_attack(a, labels))
                .collect(),
            labels,
        ),
    );
    line(PreviewSection::Speeds, describe_speeds(input.speeds, labels));
    line(
        PreviewSection::Senses,
        join_or_none(display_all(input.senses), labels),
    );
    line(
        PreviewSection::SpecialAbilities,
        join_or_none(display_all(input.special), labels),
    );
    line(
        PreviewSection::EnergyResistances,
        join_or_none(display_all(input.energy_resistances), labels),
    );
    line(
        PreviewSection::Vulnerabilities,
        join_or_none(display_all(input.vulnerabilities), labels),
    );
    line(
        PreviewSection::DamageImmunities,
        join_or_none(display_all(input.damage_immunities), labels),
    );
    line(
        PreviewSection::DamageReduction,
        join_or_none(display_all(input.damage_reduction), labels),
    );
    line(
        PreviewSection::Regeneration,
        input
            .regeneration
            .map_or_else(|| none(labels), ToString::to_string),
    );
    lines.join("\n")
}
