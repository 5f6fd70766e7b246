//! Transformation plans: the full set of writes one transformation makes.
//!
//! Planning is pure. The engine turns a plan into persistence calls and the
//! snapshot that lets them be undone.

use crate::catalog::{BuffDefinition, SpecialEffectTable};
use crate::entities::{
    AttackCategory, BuffData, CharacterItem, CharacterRecord, EffectCategory, ItemKind, TraitPatch,
};
use crate::shapeshift::attacks::{build_attack, AttackContext};
use crate::shapeshift::capacity::with_capacity_compensation;
use crate::shapeshift::gating::SpellKind;
use crate::shapeshift::resolver::ResolvedForm;
use crate::value_objects::{
    merge_senses, ChangeRecord, DamageReduction, DamageType, EnergyResistance, SizeCategory,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TransformationPlan {
    /// Recorded on the snapshot, e.g. "Wild Shape".
    pub source: String,
    /// Name of the buff container.
    pub effect_name: String,
    pub category: EffectCategory,
    pub icon: String,
    /// Changes for a freshly created container, before capacity compensation.
    pub changes: Vec<ChangeRecord>,
    pub new_size: SizeCategory,
    pub trait_overrides: TraitPatch,
    pub token_image: Option<String>,
    pub attacks: Vec<CharacterItem>,
}

impl TransformationPlan {
    pub fn with_token_image(mut self, image: Option<String>) -> Self {
        self.token_image = image;
        self
    }

    /// The container's change list on `actor`, capacity terms recomputed.
    ///
    /// A same-named container already on the character keeps its own
    /// non-capacity changes.
    pub fn container_changes(&self, actor: &CharacterRecord) -> Vec<ChangeRecord> {
        let base = actor
            .find_buff(&self.effect_name)
            .and_then(CharacterItem::buff)
            .map_or_else(|| self.changes.clone(), |buff| buff.changes.clone());
        with_capacity_compensation(actor, self.new_size, base)
    }

    /// A new, active container holding `changes`.
    pub fn new_container(&self, changes: Vec<ChangeRecord>) -> CharacterItem {
        CharacterItem::new(
            self.effect_name.clone(),
            ItemKind::Buff(BuffData {
                active: true,
                changes,
            }),
        )
        .with_img(self.icon.clone())
    }
}

fn append_damage_reduction(current: &str, extra: &[DamageReduction]) -> Option<String> {
    if extra.is_empty() {
        return None;
    }
    let mut entries: Vec<String> = current
        .split(';')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect();
    entries.extend(extra.iter().map(ToString::to_string));
    Some(entries.join("; "))
}

fn merge_resistances(base: &[EnergyResistance], incoming: &[EnergyResistance]) -> Vec<EnergyResistance> {
    let mut merged = base.to_vec();
    for resistance in incoming {
        match merged
            .iter_mut()
            .find(|r| r.damage_type == resistance.damage_type)
        {
            Some(existing) => existing.amount = existing.amount.max(resistance.amount),
            None => merged.push(*resistance),
        }
    }
    merged
}

fn union(base: &[DamageType], incoming: &[DamageType]) -> Vec<DamageType> {
    let mut merged = base.to_vec();
    for damage_type in incoming {
        if !merged.contains(damage_type) {
            merged.push(*damage_type);
        }
    }
    merged
}

/// Plan a size-changing buff on `actor`.
pub fn plan_buff(
    actor: &CharacterRecord,
    buff: &BuffDefinition,
    caster_level: u8,
) -> TransformationPlan {
    let damage_reduction = buff
        .damage_reduction
        .as_ref()
        .and_then(|dr| append_damage_reduction(&actor.traits.damage_reduction, std::slice::from_ref(dr)));
    let spell_resistance = buff
        .spell_resistance(caster_level)
        .filter(|sr| actor.spell_resistance_total() < *sr)
        .map(|sr| sr.to_string());

    TransformationPlan {
        source: buff.name().to_string(),
        effect_name: buff.name().to_string(),
        category: EffectCategory::Buff,
        icon: buff.icon.to_string(),
        changes: buff.changes.clone(),
        new_size: buff.size_rule.apply(actor.size),
        trait_overrides: TraitPatch {
            damage_reduction,
            spell_resistance,
            ..Default::default()
        },
        token_image: None,
        attacks: Vec::new(),
    }
}

fn spell_icon(kind: SpellKind) -> &'static str {
    match kind {
        SpellKind::BeastShape => "icons/magic/nature/wolf-paw-glow-large-green.webp",
        SpellKind::ElementalBody => "icons/magic/fire/elemental-fire-humanoid.webp",
        SpellKind::PlantShape => "icons/magic/nature/tree-animated-strike.webp",
    }
}

/// Plan a polymorph into `resolved` on `actor`.
///
/// `source` names the effect ("Wild Shape"); it defaults to the spell name.
pub fn plan_polymorph(
    actor: &CharacterRecord,
    resolved: &ResolvedForm,
    source: Option<&str>,
    effects: &dyn SpecialEffectTable,
) -> TransformationPlan {
    let source = source.unwrap_or(resolved.kind.display_name()).to_string();
    let traits = &actor.traits;

    let natural = AttackContext {
        actor,
        form_size: resolved.form_size,
        effects,
        source_label: Some(source.as_str()),
        category: AttackCategory::Natural,
    };
    let special = AttackContext {
        category: AttackCategory::Misc,
        ..natural
    };
    let only = resolved.has_single_attack();
    let attacks = resolved
        .attacks
        .iter()
        .map(|a| build_attack(&natural, a, only))
        .chain(
            resolved
                .special_attacks
                .iter()
                .map(|a| build_attack(&special, a, false)),
        )
        .collect();

    let trait_overrides = TraitPatch {
        damage_reduction: append_damage_reduction(
            &traits.damage_reduction,
            &resolved.damage_reduction,
        ),
        spell_resistance: None,
        energy_resistances: Some(merge_resistances(
            &traits.energy_resistances,
            &resolved.energy_resistances,
        )),
        vulnerabilities: Some(union(&traits.vulnerabilities, &resolved.vulnerabilities)),
        damage_immunities: Some(union(
            &traits.damage_immunities,
            &resolved.damage_immunities,
        )),
        regeneration: resolved.regeneration.as_ref().map(ToString::to_string),
        senses: Some(merge_senses(&traits.senses, &resolved.senses)),
        speeds: Some(resolved.speeds.clone()),
    };

    TransformationPlan {
        effect_name: format!("{} ({})", source, resolved.form_name),
        source,
        category: EffectCategory::Polymorph,
        icon: spell_icon(resolved.kind).to_string(),
        changes: resolved.all_changes(),
        new_size: resolved.form_size,
        trait_overrides,
        token_image: None,
        attacks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BuffKind, Catalog, StandardEffects};
    use crate::entities::AbilityScores;
    use crate::shapeshift::preview::EnglishLabels;
    use crate::shapeshift::resolver::resolve_changes;
    use crate::value_objects::{total_for, Ability, ChangeTarget, Sense, SenseKind};

    fn hero() -> CharacterRecord {
        CharacterRecord::new(
            "Merisiel",
            SizeCategory::Medium,
            AbilityScores::default().with(Ability::Str, 14),
        )
    }

    #[test]
    fn enlarge_person_grows_one_step() {
        let plan = plan_buff(&hero(), &BuffKind::EnlargePerson.definition(), 5);
        assert_eq!(plan.new_size, SizeCategory::Large);
        assert_eq!(plan.effect_name, "Enlarge Person");
        assert!(plan.trait_overrides.is_empty());
        let changes = plan.container_changes(&hero());
        assert_eq!(total_for(&changes, ChangeTarget::CarryMultiplier), -0.5);
        assert_eq!(total_for(&changes, ChangeTarget::CarryStrength), -2.0);
    }

    #[test]
    fn buff_damage_reduction_is_appended() {
        let mut actor = hero();
        actor.traits.damage_reduction = "5/-".into();
        let plan = plan_buff(&actor, &BuffKind::AnimalGrowth.definition(), 7);
        assert_eq!(
            plan.trait_overrides.damage_reduction.as_deref(),
            Some("5/-; 10/magic")
        );
    }

    #[test]
    fn frightful_aspect_keeps_higher_existing_spell_resistance() {
        let def = BuffKind::FrightfulAspect.definition();
        let plan = plan_buff(&hero(), &def, 12);
        assert_eq!(plan.trait_overrides.spell_resistance.as_deref(), Some("16"));

        let mut actor = hero();
        actor.traits.spell_resistance = "20".into();
        assert_eq!(plan_buff(&actor, &def, 12).trait_overrides.spell_resistance, None);
    }

    #[test]
    fn existing_container_keeps_its_changes() {
        let def = BuffKind::EnlargePerson.definition();
        let custom = vec![ChangeRecord::ability(Ability::Str, 4)];
        let actor = hero().with_item(CharacterItem::new(
            "Enlarge Person",
            ItemKind::Buff(BuffData {
                active: false,
                changes: custom,
            }),
        ));
        let plan = plan_buff(&actor, &def, 5);
        let changes = plan.container_changes(&actor);
        assert_eq!(total_for(&changes, ChangeTarget::Ability(Ability::Str)), 4.0);
        assert_eq!(total_for(&changes, ChangeTarget::Ability(Ability::Dex)), 0.0);
        assert_eq!(total_for(&changes, ChangeTarget::CarryStrength), -4.0);
    }

    #[test]
    fn polymorph_plan_merges_traits_and_builds_attacks() {
        let catalog = Catalog::builtin().unwrap();
        let tiger = catalog.get("Tiger").unwrap();
        let resolved =
            resolve_changes(tiger, SpellKind::BeastShape, 3, SizeCategory::Medium, &EnglishLabels)
                .unwrap();
        let mut actor = hero();
        actor.traits.senses = vec![Sense::new(SenseKind::Darkvision, 60)];
        let plan = plan_polymorph(&actor, &resolved, Some("Wild Shape"), &StandardEffects);

        assert_eq!(plan.effect_name, "Wild Shape (Tiger)");
        assert_eq!(plan.source, "Wild Shape");
        assert_eq!(plan.category, EffectCategory::Polymorph);
        assert_eq!(plan.new_size, SizeCategory::Large);
        let names: Vec<&str> = plan.attacks.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Claw (Wild Shape)", "Bite (Wild Shape)", "Rake (Wild Shape)"]
        );
        assert_eq!(
            plan.attacks[2].attack().map(|a| a.attack_category),
            Some(AttackCategory::Misc)
        );
        let senses = plan.trait_overrides.senses.unwrap();
        assert_eq!(senses.len(), 3);
        assert_eq!(plan.trait_overrides.damage_reduction, None);
        assert_eq!(plan.trait_overrides.speeds.and_then(|s| s.land), Some(40));
    }

    #[test]
    fn polymorph_source_defaults_to_spell_name() {
        let catalog = Catalog::builtin().unwrap();
        let wolf = catalog.get("Wolf").unwrap();
        let resolved =
            resolve_changes(wolf, SpellKind::BeastShape, 1, SizeCategory::Medium, &EnglishLabels)
                .unwrap();
        let plan = plan_polymorph(&hero(), &resolved, None, &StandardEffects);
        assert_eq!(plan.effect_name, "Beast Shape (Wolf)");
        assert_eq!(plan.attacks.len(), 1);
        let bite = plan.attacks[0].attack().unwrap();
        assert_eq!(bite.actions[0].damage_mult, 1.5);
    }
}
