//! Domain entities - Core business objects with identity

mod character;
mod form;
mod item;
mod snapshot;

pub use character::{
    heavy_load, AbilityScores, CarrySettings, CharacterFlags, CharacterPatch, CharacterRecord,
    CharacterTraits, SnapshotWrite, TokenSettings, TraitPatch,
};
pub use form::{FormDefinition, FormFamily};
pub use item::{
    AttackAction, AttackCategory, AttackData, AttackPart, BuffData, CharacterItem, DamagePart,
    EquipmentData, EquipmentType, ItemKind, ItemPatch, RangeSpec, SaveSpec,
};
pub use snapshot::{ArmorSnapshot, EffectCategory, EffectSnapshot, SnapshotData};
