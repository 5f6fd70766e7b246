//! Attack synthesis: turns catalog attack descriptors into attack items.

use crate::catalog::{attack_icon, natural_attack, SpecialEffectTable, SPECIAL_SAVE_DC};
use crate::entities::{
    AttackAction, AttackCategory, AttackData, AttackPart, CharacterItem, CharacterRecord,
    DamagePart, ItemKind, RangeSpec, SaveSpec,
};
use crate::value_objects::{Ability, AttackDescriptor, AttackType, SizeCategory};

const WEAPON_FINESSE: &str = "Weapon Finesse";

/// Damage multiplier for the only attack a form has.
const SOLE_ATTACK_MULT: f64 = 1.5;
const SECONDARY_ATTACK_MULT: f64 = 0.5;

/// Everything attack synthesis reads besides the descriptor itself.
#[derive(Clone, Copy)]
pub struct AttackContext<'a> {
    pub actor: &'a CharacterRecord,
    pub form_size: SizeCategory,
    pub effects: &'a dyn SpecialEffectTable,
    /// Appended to the attack name in parentheses.
    pub source_label: Option<&'a str>,
    pub category: AttackCategory,
}

fn attack_ability(ctx: &AttackContext<'_>, descriptor: &AttackDescriptor) -> Ability {
    if let Some(ability) = descriptor.attack_ability {
        return ability;
    }
    let finesse = ctx.actor.has_feat(WEAPON_FINESSE)
        && ctx.actor.ability_total(Ability::Dex) >= ctx.actor.ability_total(Ability::Str);
    if finesse || descriptor.attack_type == AttackType::Ranged {
        Ability::Dex
    } else {
        ctx.actor.melee_attack_ability.unwrap_or(Ability::Str)
    }
}

fn damage_mult(descriptor: &AttackDescriptor, primary: bool, is_only_attack: bool) -> f64 {
    match descriptor.damage_mult {
        Some(mult) => mult,
        None if is_only_attack => SOLE_ATTACK_MULT,
        None if primary => 1.0,
        None => SECONDARY_ATTACK_MULT,
    }
}

/// Build one attack item for `descriptor` on `ctx.actor`.
///
/// Dice scale with the character's live size through a `sizeRoll` formula
/// anchored at the form's size. Attacks with no scaling die deal their
/// non-critical bonus damage as their only damage.
pub fn build_attack(
    ctx: &AttackContext<'_>,
    descriptor: &AttackDescriptor,
    is_only_attack: bool,
) -> CharacterItem {
    let natural = natural_attack(&descriptor.name);
    let primary = descriptor.primary.unwrap_or(false)
        || natural.is_some_and(|n| n.primary)
        || is_only_attack;

    let types = if descriptor.damage_types.is_empty() {
        natural.map(|n| n.types.to_vec()).unwrap_or_default()
    } else {
        descriptor.damage_types.clone()
    };
    let bonus = descriptor.non_crit.as_ref().map(|b| DamagePart {
        formula: b.formula.clone(),
        types: vec![b.damage_type],
    });
    let (damage_parts, non_crit_parts) = if descriptor.has_scaling_die() {
        let dice = DamagePart {
            formula: format!(
                "sizeRoll({}, {}, @size, {})",
                descriptor.dice_count,
                descriptor.dice_size,
                ctx.form_size.index()
            ),
            types,
        };
        (vec![dice], bonus.into_iter().collect())
    } else {
        (bonus.into_iter().collect(), Vec::new())
    };

    let attack_parts: Vec<AttackPart> = (2..=descriptor.count)
        .map(|n| AttackPart {
            formula: "0".to_string(),
            name: format!("{} {}", descriptor.name, n),
        })
        .collect();
    let attack_name = if descriptor.count > 1 {
        format!("{} 1", descriptor.name)
    } else {
        descriptor.name.clone()
    };

    let effect_notes = descriptor
        .special
        .iter()
        .map(|tag| ctx.effects.note_for(tag))
        .collect();
    // The last tag on the attack supplies its description
    let description = descriptor
        .special
        .last()
        .map_or("", |tag| ctx.effects.description_for(tag))
        .to_string();
    let save = descriptor
        .special
        .iter()
        .find_map(|tag| ctx.effects.detail(tag.kind).and_then(|d| d.save))
        .map(|template| SaveSpec {
            save_type: template.save_type.to_string(),
            dc: SPECIAL_SAVE_DC.to_string(),
            description: template.description.to_string(),
        });
    let range = match (descriptor.attack_type, descriptor.range) {
        (AttackType::Ranged, Some(value)) | (AttackType::Save, Some(value)) => Some(RangeSpec {
            value,
            max_increments: descriptor.increment,
        }),
        _ => None,
    };

    let ability = attack_ability(ctx, descriptor);
    let action = AttackAction {
        name: descriptor.name.clone(),
        action_type: descriptor.attack_type.action_code().to_string(),
        attack_name,
        attack_ability: ability,
        damage_ability: Ability::Str,
        damage_mult: damage_mult(descriptor, primary, is_only_attack),
        crit_range: descriptor.crit_range,
        crit_multiplier: descriptor.crit_multiplier,
        attack_parts,
        damage_parts,
        non_crit_parts,
        effect_notes,
        save,
        range,
        charges: descriptor.charges,
    };

    let name = match ctx.source_label {
        Some(label) => format!("{} ({})", descriptor.name, label),
        None => descriptor.name.clone(),
    };
    CharacterItem::new(
        name,
        ItemKind::Attack(AttackData {
            primary,
            attack_category: ctx.category,
            description,
            actions: vec![action],
        }),
    )
    .with_img(attack_icon(&descriptor.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StandardEffects;
    use crate::entities::AbilityScores;
    use crate::value_objects::{BonusDamage, DamageType, SpecialKind, SpecialTag};

    fn druid() -> CharacterRecord {
        CharacterRecord::new(
            "Jaya",
            SizeCategory::Medium,
            AbilityScores::default()
                .with(Ability::Str, 12)
                .with(Ability::Dex, 16),
        )
    }

    fn ctx<'a>(actor: &'a CharacterRecord, label: Option<&'a str>) -> AttackContext<'a> {
        AttackContext {
            actor,
            form_size: SizeCategory::Large,
            effects: &StandardEffects,
            source_label: label,
            category: AttackCategory::Natural,
        }
    }

    fn action(item: &CharacterItem) -> &AttackAction {
        &item.attack().unwrap().actions[0]
    }

    #[test]
    fn sole_bite_is_primary_with_one_and_a_half_strength() {
        let actor = druid();
        let bite = AttackDescriptor::new("Bite", 1, 8);
        let item = build_attack(&ctx(&actor, Some("Beast Shape")), &bite, true);
        assert_eq!(item.name, "Bite (Beast Shape)");
        assert!(item.attack().unwrap().primary);
        let action = action(&item);
        assert_eq!(action.damage_mult, 1.5);
        assert_eq!(action.attack_ability, Ability::Str);
        assert_eq!(action.damage_parts[0].formula, "sizeRoll(1, 8, @size, 5)");
        assert_eq!(action.damage_parts[0].types.len(), 3);
        assert_eq!(action.action_type, "mwak");
    }

    #[test]
    fn secondary_attacks_get_half_strength() {
        let actor = druid();
        let mut tentacles = AttackDescriptor::new("Tentacles", 1, 4);
        tentacles.count = 4;
        let item = build_attack(&ctx(&actor, None), &tentacles, false);
        assert!(!item.attack().unwrap().primary);
        let action = action(&item);
        assert_eq!(action.damage_mult, 0.5);
        assert_eq!(action.attack_name, "Tentacles 1");
        let names: Vec<&str> = action.attack_parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Tentacles 2", "Tentacles 3", "Tentacles 4"]);
    }

    #[test]
    fn weapon_finesse_uses_dexterity() {
        let actor = druid().with_item(CharacterItem::new("Weapon Finesse", ItemKind::Feat));
        let claw = AttackDescriptor::new("Claw", 1, 4);
        assert_eq!(action(&build_attack(&ctx(&actor, None), &claw, false)).attack_ability, Ability::Dex);

        let mut actor = druid();
        actor.melee_attack_ability = Some(Ability::Wis);
        assert_eq!(action(&build_attack(&ctx(&actor, None), &claw, false)).attack_ability, Ability::Wis);
    }

    #[test]
    fn fixed_damage_attack_uses_bonus_as_damage() {
        let actor = druid();
        let mut burn = AttackDescriptor::new("Burn", 0, 0);
        burn.non_crit = Some(BonusDamage {
            formula: "1d6".into(),
            damage_type: DamageType::Fire,
        });
        burn.special.push(SpecialTag::new(SpecialKind::Burn));
        let item = build_attack(&ctx(&actor, None), &burn, false);
        let action = action(&item);
        assert_eq!(action.damage_parts.len(), 1);
        assert_eq!(action.damage_parts[0].formula, "1d6");
        assert!(action.non_crit_parts.is_empty());
        let save = action.save.as_ref().unwrap();
        assert_eq!(save.dc, "10");
        assert_eq!(save.save_type, "ref");
        assert_eq!(item.img.as_deref(), Some(crate::catalog::DEFAULT_ATTACK_ICON));
    }

    #[test]
    fn scaling_attack_keeps_bonus_as_non_crit() {
        let actor = druid();
        let mut slam = AttackDescriptor::new("Slam", 2, 6);
        slam.non_crit = Some(BonusDamage {
            formula: "1d4".into(),
            damage_type: DamageType::Cold,
        });
        slam.special.push(SpecialTag::with_detail(SpecialKind::Grab, "Large"));
        let item = build_attack(&ctx(&actor, None), &slam, false);
        let action = action(&item);
        assert_eq!(action.non_crit_parts[0].types, vec![DamageType::Cold]);
        assert_eq!(
            action.effect_notes,
            vec!["Grab: free grapple combat maneuver check on hit (Large)"]
        );
        assert!(action.save.is_none());
    }

    #[test]
    fn breath_weapon_carries_effect_description() {
        let catalog = crate::catalog::Catalog::builtin().unwrap();
        let wolf = catalog.get("Winter Wolf").unwrap();
        let breath = &wolf.special_attacks[0];
        let actor = druid();
        let mut actor_ctx = ctx(&actor, None);
        actor_ctx.category = AttackCategory::Misc;
        let item = build_attack(&actor_ctx, breath, false);
        let data = item.attack().unwrap();
        assert!(data.description.starts_with("The creature exhales"));
        assert_eq!(action(&item).save.as_ref().map(|s| s.save_type.as_str()), Some("ref"));

        let bite = build_attack(&ctx(&actor, None), &AttackDescriptor::new("Bite", 1, 6), true);
        assert!(bite.attack().unwrap().description.is_empty());
    }
}
