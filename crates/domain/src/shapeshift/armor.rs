//! Armor and shield rescaling across the tiny size threshold.

use crate::entities::{ArmorSnapshot, CharacterRecord, ItemPatch};
use crate::value_objects::SizeCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmorScale {
    Unchanged,
    Double,
    Halve,
}

impl ArmorScale {
    /// Only crossing the tiny threshold rescales; other size changes never do.
    pub fn between(current: SizeCategory, target: SizeCategory) -> Self {
        match (current.is_tiny_or_smaller(), target.is_tiny_or_smaller()) {
            (true, false) => Self::Double,
            (false, true) => Self::Halve,
            _ => Self::Unchanged,
        }
    }

    pub fn apply(self, armor: i32) -> i32 {
        match self {
            Self::Unchanged => armor,
            Self::Double => armor * 2,
            Self::Halve => armor.div_euclid(2),
        }
    }
}

/// Item patches and originals for every armor or shield `actor` carries.
///
/// Empty when the size change does not cross the threshold.
pub fn rescale_armor(
    actor: &CharacterRecord,
    target: SizeCategory,
) -> (Vec<ItemPatch>, Vec<ArmorSnapshot>) {
    let scale = ArmorScale::between(actor.size, target);
    if scale == ArmorScale::Unchanged {
        return (Vec::new(), Vec::new());
    }
    actor
        .armor_and_shields()
        .filter_map(|item| item.equipment().map(|e| (item.id, e.armor_value)))
        .map(|(id, armor)| {
            (
                ItemPatch::new(id).armor_value(scale.apply(armor)),
                ArmorSnapshot {
                    item_id: id,
                    original_armor_rating: armor,
                },
            )
        })
        .unzip()
}
