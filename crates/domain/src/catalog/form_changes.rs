//! Ability and natural-armor changes granted by each (spell, family, size).

use crate::entities::FormFamily;
use crate::shapeshift::SpellKind;
use crate::value_objects::{Ability, ChangeRecord, ModifierType, SizeCategory};

/// (Str, Dex, Con, natural armor)
type Deltas = (i32, i32, i32, i32);

fn to_changes((str, dex, con, nac): Deltas, modifier: ModifierType) -> Vec<ChangeRecord> {
    let mut changes = Vec::new();
    for (ability, value) in [(Ability::Str, str), (Ability::Dex, dex), (Ability::Con, con)] {
        if value != 0 {
            changes.push(ChangeRecord::ability(ability, value).with_modifier(modifier));
        }
    }
    if nac != 0 {
        changes.push(ChangeRecord::natural_armor(nac).with_modifier(modifier));
    }
    changes
}

fn deltas(kind: SpellKind, family: FormFamily, size: SizeCategory) -> Deltas {
    use FormFamily::*;
    use SizeCategory::*;

    match (kind, family, size) {
        (SpellKind::BeastShape, Animal, Diminutive) => (-4, 6, 0, 1),
        (SpellKind::BeastShape, Animal, Tiny) => (-2, 4, 0, 1),
        (SpellKind::BeastShape, Animal, Small) => (0, 2, 0, 1),
        (SpellKind::BeastShape, Animal, Medium) => (2, 0, 0, 2),
        (SpellKind::BeastShape, Animal, Large) => (4, -2, 0, 4),
        (SpellKind::BeastShape, Animal, Huge) => (6, -4, 0, 6),
        (SpellKind::BeastShape, MagicalBeast, Tiny) => (-2, 8, 0, 3),
        (SpellKind::BeastShape, MagicalBeast, Small) => (0, 4, 0, 2),
        (SpellKind::BeastShape, MagicalBeast, Medium) => (4, 0, 0, 4),
        (SpellKind::BeastShape, MagicalBeast, Large) => (6, -2, 2, 6),

        (SpellKind::ElementalBody, AirElemental, Small) => (0, 2, 0, 2),
        (SpellKind::ElementalBody, AirElemental, Medium) => (0, 4, 0, 3),
        (SpellKind::ElementalBody, AirElemental, Large) => (2, 4, 0, 4),
        (SpellKind::ElementalBody, AirElemental, Huge) => (4, 6, 0, 4),
        (SpellKind::ElementalBody, EarthElemental, Small) => (2, 0, 0, 4),
        (SpellKind::ElementalBody, EarthElemental, Medium) => (4, 0, 0, 5),
        (SpellKind::ElementalBody, EarthElemental, Large) => (6, -2, 2, 6),
        (SpellKind::ElementalBody, EarthElemental, Huge) => (8, -2, 4, 6),
        (SpellKind::ElementalBody, FireElemental, Small) => (0, 2, 0, 2),
        (SpellKind::ElementalBody, FireElemental, Medium) => (0, 4, 0, 3),
        (SpellKind::ElementalBody, FireElemental, Large) => (0, 4, 2, 4),
        (SpellKind::ElementalBody, FireElemental, Huge) => (0, 6, 4, 4),
        (SpellKind::ElementalBody, WaterElemental, Small) => (0, 0, 2, 4),
        (SpellKind::ElementalBody, WaterElemental, Medium) => (0, 0, 4, 5),
        (SpellKind::ElementalBody, WaterElemental, Large) => (2, -2, 6, 6),
        (SpellKind::ElementalBody, WaterElemental, Huge) => (4, -2, 8, 6),

        (SpellKind::PlantShape, Plant, Small) => (0, 0, 2, 2),
        (SpellKind::PlantShape, Plant, Medium) => (2, 0, 2, 2),
        (SpellKind::PlantShape, Plant, Large) => (4, 0, 2, 4),
        (SpellKind::PlantShape, Plant, Huge) => (8, -2, 4, 6),

        _ => (0, 0, 0, 0),
    }
}

/// Size bonuses for assuming a form of `family` and `size` with `kind`.
///
/// Combinations the spell cannot reach yield no changes.
pub fn form_changes(kind: SpellKind, family: FormFamily, size: SizeCategory) -> Vec<ChangeRecord> {
    to_changes(deltas(kind, family, size), ModifierType::Size)
}

/// Correction that first brings a non-Medium caster to Medium-equivalent
/// physical scores. Small casters need none.
pub fn polymorph_base_adjustment(actor_size: SizeCategory) -> Vec<ChangeRecord> {
    use SizeCategory::*;

    let adjustment = match actor_size {
        Fine => (10, -8, 2, 0),
        Diminutive => (10, -6, 2, 0),
        Tiny => (8, -4, 2, 0),
        Small | Medium => (0, 0, 0, 0),
        Large => (-8, 2, -4, 0),
        Huge => (-16, 4, -8, 0),
        Gargantuan => (-24, 6, -12, 0),
        Colossal => (-32, 8, -16, 0),
    };
    to_changes(adjustment, ModifierType::Untyped)
}
