//! Value objects - Immutable objects defined by their attributes

mod ability;
mod attack;
mod change;
mod damage;
mod sense;
mod size;
mod special;
mod speed;

pub use ability::Ability;
pub use attack::{AttackDescriptor, AttackType, BonusDamage};
pub use change::{
    format_number, total_for, ChangeOperator, ChangeRecord, ChangeTarget, ModifierType,
};
pub use damage::{DamageReduction, DamageType, DrBypass, DrOperator, EnergyResistance, Regeneration};
pub use sense::{merge_senses, Sense, SenseKind};
pub use size::{new_size, SizeCategory};
pub use special::{SpecialKind, SpecialTag};
pub use speed::{FlySpeed, Maneuverability, MovementMode, SpeedCaps, SpeedSet};
