//! Shapeshifting rules: gating, capacity compensation, attack synthesis,
//! and planning of complete transformations.

mod armor;
mod attacks;
mod capacity;
mod gating;
mod plan;
mod preview;
mod resolver;

pub use armor::{rescale_armor, ArmorScale};
pub use attacks::{build_attack, AttackContext};
pub use capacity::{capacity_delta, strength_delta, with_capacity_compensation, CapacityDelta};
pub use gating::{
    unlocked, CategoryThresholds, EnergyPolicy, LevelGate, SpellKind, FOLDED_RESISTANCE,
};
pub use plan::{plan_buff, plan_polymorph, TransformationPlan};
pub use preview::{
    describe_attack, describe_changes, describe_speeds, render_preview, EnglishLabels, Localize,
    PreviewInput, PreviewSection,
};
pub use resolver::{resolve_changes, ResolvedForm};
