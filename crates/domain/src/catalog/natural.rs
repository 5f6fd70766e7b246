//! Defaults for natural attacks by name.

use crate::value_objects::DamageType;

/// Damage types, primary flag, and icon of a natural attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaturalAttack {
    pub name: &'static str,
    pub types: &'static [DamageType],
    pub primary: bool,
    pub icon: &'static str,
}

pub const DEFAULT_ATTACK_ICON: &str = "icons/creatures/abilities/paw-print.webp";

const NATURAL_ATTACKS: &[NaturalAttack] = &[
    NaturalAttack {
        name: "Bite",
        types: &[
            DamageType::Bludgeoning,
            DamageType::Piercing,
            DamageType::Slashing,
        ],
        primary: true,
        icon: "icons/creatures/abilities/mouth-teeth-sharp.webp",
    },
    NaturalAttack {
        name: "Claw",
        types: &[DamageType::Bludgeoning, DamageType::Slashing],
        primary: true,
        icon: "icons/creatures/claws/claw-bear-paw-swipe-red.webp",
    },
    NaturalAttack {
        name: "Gore",
        types: &[DamageType::Piercing],
        primary: true,
        icon: "icons/creatures/abilities/horn-curved.webp",
    },
    NaturalAttack {
        name: "Hoof",
        types: &[DamageType::Bludgeoning],
        primary: false,
        icon: "icons/creatures/abilities/hoof-print.webp",
    },
    NaturalAttack {
        name: "Tentacle",
        types: &[DamageType::Bludgeoning],
        primary: false,
        icon: "icons/creatures/tentacles/tentacle-suction-cups-pink.webp",
    },
    NaturalAttack {
        name: "Wing",
        types: &[DamageType::Bludgeoning],
        primary: false,
        icon: "icons/creatures/abilities/wing-batlike-white.webp",
    },
    NaturalAttack {
        name: "Pincers",
        types: &[DamageType::Bludgeoning],
        primary: false,
        icon: "icons/creatures/claws/pincer-crab-red.webp",
    },
    NaturalAttack {
        name: "Tail Slap",
        types: &[DamageType::Bludgeoning],
        primary: false,
        icon: "icons/creatures/abilities/tail-swipe-green.webp",
    },
    NaturalAttack {
        name: "Slam",
        types: &[DamageType::Bludgeoning],
        primary: true,
        icon: "icons/skills/melee/unarmed-punch-fist.webp",
    },
    NaturalAttack {
        name: "Sting",
        types: &[DamageType::Piercing],
        primary: true,
        icon: "icons/creatures/abilities/stinger-poison-green.webp",
    },
    NaturalAttack {
        name: "Talons",
        types: &[DamageType::Slashing],
        primary: true,
        icon: "icons/creatures/claws/claw-talons-yellow-red.webp",
    },
];

/// Natural attack entry whose name matches `name` ignoring case and a plural "s".
pub fn natural_attack(name: &str) -> Option<&'static NaturalAttack> {
    let trimmed = name.trim();
    NATURAL_ATTACKS.iter().find(|entry| {
        entry.name.eq_ignore_ascii_case(trimmed)
            || trimmed
                .strip_suffix('s')
                .is_some_and(|singular| entry.name.eq_ignore_ascii_case(singular))
    })
}

pub fn attack_icon(name: &str) -> &'static str {
    natural_attack(name).map_or(DEFAULT_ATTACK_ICON, |entry| entry.icon)
}
