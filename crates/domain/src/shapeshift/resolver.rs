//! Level-gated change resolution.
//!
//! Takes a form definition, a spell kind and level, and the caster's size,
//! and produces exactly what the transformation will grant. A single pass over
//! the gating tables handles every spell kind.

use crate::catalog::{form_changes, polymorph_base_adjustment};
use crate::entities::{FormDefinition, FormFamily};
use crate::error::DomainError;
use crate::shapeshift::gating::{unlocked, EnergyPolicy, LevelGate, SpellKind, FOLDED_RESISTANCE};
use crate::shapeshift::preview::{render_preview, Localize, PreviewInput};
use crate::value_objects::{
    AttackDescriptor, ChangeRecord, DamageReduction, DamageType, EnergyResistance, Regeneration,
    Sense, SizeCategory, SpecialTag, SpeedSet,
};

/// A form after gating, ready for planning.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedForm {
    pub form_name: String,
    pub family: FormFamily,
    pub form_size: SizeCategory,
    pub kind: SpellKind,
    pub level: u8,
    /// Normalizes the caster to Medium before the form applies.
    pub base_adjustment: Vec<ChangeRecord>,
    pub changes: Vec<ChangeRecord>,
    pub attacks: Vec<AttackDescriptor>,
    pub special_attacks: Vec<AttackDescriptor>,
    pub speeds: SpeedSet,
    pub senses: Vec<Sense>,
    pub special: Vec<SpecialTag>,
    pub energy_resistances: Vec<EnergyResistance>,
    pub vulnerabilities: Vec<DamageType>,
    pub damage_immunities: Vec<DamageType>,
    pub damage_reduction: Vec<DamageReduction>,
    pub regeneration: Option<Regeneration>,
    pub preview_text: String,
}

impl ResolvedForm {
    /// Base adjustment followed by the form's own changes.
    pub fn all_changes(&self) -> Vec<ChangeRecord> {
        self.base_adjustment
            .iter()
            .chain(&self.changes)
            .cloned()
            .collect()
    }

    /// Whether the form grants a single attack roll in total.
    pub fn has_single_attack(&self) -> bool {
        matches!(self.attacks.as_slice(), [only] if only.count == 1)
    }
}

fn gate_attack(gate: &LevelGate, attack: &AttackDescriptor) -> AttackDescriptor {
    let mut attack = attack.clone();
    attack.special.retain(|tag| gate.allows_tag(tag));
    attack
}

fn energy_resistances(form: &FormDefinition, policy: EnergyPolicy) -> Vec<EnergyResistance> {
    let mut resistances: Vec<EnergyResistance> = form
        .energy_resistances
        .iter()
        .filter(|r| !policy.elemental_only || r.damage_type.is_energy())
        .copied()
        .collect();
    if policy.fold_immunities {
        for immunity in form.damage_immunities.iter().filter(|d| d.is_energy()) {
            match resistances.iter_mut().find(|r| r.damage_type == *immunity) {
                Some(existing) => existing.amount = existing.amount.max(FOLDED_RESISTANCE),
                None => resistances.push(EnergyResistance::new(*immunity, FOLDED_RESISTANCE)),
            }
        }
    }
    if let Some(cap) = policy.resistance_cap {
        for resistance in &mut resistances {
            resistance.amount = resistance.amount.min(cap);
        }
    }
    resistances
}

/// Resolve what `kind` at `level` grants from `form` to a caster of `actor_size`.
///
/// # Arguments
/// * `form` - The catalog form to assume
/// * `kind` - The spell family doing the gating
/// * `level` - Spell level, validated against the family's maximum
/// * `actor_size` - The caster's size before transforming
/// * `labels` - Localizer for the preview text
///
/// # Returns
/// * `Ok(ResolvedForm)` - The gated attributes and preview
/// * `Err(DomainError::Validation)` - If the level is out of range
pub fn resolve_changes(
    form: &FormDefinition,
    kind: SpellKind,
    level: u8,
    actor_size: SizeCategory,
    labels: &dyn Localize,
) -> Result<ResolvedForm, DomainError> {
    let gate = kind.gate(level)?;
    let thresholds = kind.thresholds();
    let policy = kind.energy_policy();

    let attacks: Vec<AttackDescriptor> = form
        .attacks
        .iter()
        .map(|a| gate_attack(&gate, a))
        .collect();
    let special_attacks: Vec<AttackDescriptor> = form
        .special_attacks
        .iter()
        .filter(|a| a.special.iter().all(|tag| gate.allows_tag(tag)))
        .cloned()
        .collect();
    let senses: Vec<Sense> = form
        .senses
        .iter()
        .filter_map(|s| gate.allow_sense(s))
        .collect();
    let special: Vec<SpecialTag> = form
        .special
        .iter()
        .filter(|tag| gate.allows_tag(tag))
        .cloned()
        .collect();

    let energy_resistances = if unlocked(thresholds.energy_resistance, level) {
        energy_resistances(form, policy)
    } else {
        Vec::new()
    };
    let vulnerabilities = if unlocked(thresholds.vulnerabilities, level) {
        form.vulnerabilities
            .iter()
            .filter(|d| !policy.elemental_only || d.is_energy())
            .copied()
            .collect()
    } else {
        Vec::new()
    };
    let damage_immunities = if unlocked(thresholds.damage_immunities, level) {
        form.damage_immunities.clone()
    } else {
        Vec::new()
    };
    let damage_reduction = if unlocked(thresholds.damage_reduction, level) {
        form.damage_reduction.clone()
    } else {
        Vec::new()
    };
    let regeneration = if unlocked(thresholds.regeneration, level) {
        form.regeneration.clone()
    } else {
        None
    };

    let base_adjustment = polymorph_base_adjustment(actor_size);
    let changes = form_changes(kind, form.family, form.size);
    let speeds = form.speed.capped(&gate.speed_caps);

    let preview_text = render_preview(
        &PreviewInput {
            base_adjustment: &base_adjustment,
            changes: &changes,
            attacks: &attacks,
            special_attacks: &special_attacks,
            speeds: &speeds,
            senses: &senses,
            special: &special,
            energy_resistances: &energy_resistances,
            vulnerabilities: &vulnerabilities,
            damage_immunities: &damage_immunities,
            damage_reduction: &damage_reduction,
            regeneration: regeneration.as_ref(),
        },
        labels,
    );

    Ok(ResolvedForm {
        form_name: form.name.clone(),
        family: form.family,
        form_size: form.size,
        kind,
        level,
        base_adjustment,
        changes,
        attacks,
        special_attacks,
        speeds,
        senses,
        special,
        energy_resistances,
        vulnerabilities,
        damage_immunities,
        damage_reduction,
        regeneration,
        preview_text,
    })
}
