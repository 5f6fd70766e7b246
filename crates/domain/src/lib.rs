//! Domain model for size-changing buffs and polymorph transformations.
//!
//! Everything here is pure: reading a [`CharacterRecord`] and a
//! [`FormDefinition`] yields a [`TransformationPlan`]. Persistence and
//! orchestration live in the engine crate.

pub mod catalog;
pub mod entities;
pub mod error;
pub mod ids;
pub mod shapeshift;
pub mod value_objects;

pub use catalog::{BuffDefinition, BuffKind, Catalog, SpecialEffectTable, StandardEffects};
pub use entities::{
    heavy_load, AbilityScores, ArmorSnapshot, AttackAction, AttackCategory, AttackData, BuffData,
    CharacterItem, CharacterPatch, CharacterRecord, CharacterTraits, EffectCategory,
    EffectSnapshot, EquipmentData, EquipmentType, FormDefinition, FormFamily, ItemKind, ItemPatch,
    SnapshotData, SnapshotWrite, TokenSettings, TraitPatch,
};
pub use error::DomainError;
pub use ids::{CharacterId, ItemId};
pub use shapeshift::{
    plan_buff, plan_polymorph, rescale_armor, resolve_changes, EnglishLabels, Localize,
    ResolvedForm, SpellKind, TransformationPlan,
};
pub use value_objects::{new_size, ChangeRecord, ChangeTarget, SizeCategory};
