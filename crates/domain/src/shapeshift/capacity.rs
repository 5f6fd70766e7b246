//! Carrying-capacity compensation.
//!
//! A transformation that changes size or Strength would otherwise change how
//! much the character can carry. Two extra change records cancel that swing.

use crate::entities::CharacterRecord;
use crate::value_objects::{
    total_for, Ability, ChangeRecord, ChangeTarget, ModifierType, SizeCategory,
};

/// Carry bonus and multiplier terms that keep capacity unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityDelta {
    pub carry_bonus: f64,
    pub carry_multiplier: f64,
}

impl CapacityDelta {
    /// The two untyped, zero-priority records (`carryStr`, `carryMult`).
    pub fn into_changes(self) -> [ChangeRecord; 2] {
        [
            ChangeRecord::add(
                ChangeTarget::CarryStrength,
                self.carry_bonus,
                ModifierType::Untyped,
            ),
            ChangeRecord::add(
                ChangeTarget::CarryMultiplier,
                self.carry_multiplier,
                ModifierType::Untyped,
            ),
        ]
    }
}

/// Net Strength change of a change list.
pub fn strength_delta(changes: &[ChangeRecord]) -> f64 {
    total_for(changes, ChangeTarget::Ability(Ability::Str))
}

/// Deltas for moving `actor` to `new_size` with `strength_delta` more Strength,
/// computed against the actor's current carry totals.
pub fn capacity_delta(
    actor: &CharacterRecord,
    new_size: SizeCategory,
    strength_delta: f64,
) -> CapacityDelta {
    let multiplier = actor.carry_multiplier();
    let ratio = actor.size.encumbrance_factor() / new_size.encumbrance_factor();
    CapacityDelta {
        carry_bonus: f64::from(actor.carry.user_bonus) - strength_delta,
        carry_multiplier: multiplier * ratio - multiplier,
    }
}

/// `changes` with any old capacity terms replaced by freshly computed ones.
pub fn with_capacity_compensation(
    actor: &CharacterRecord,
    new_size: SizeCategory,
    changes: Vec<ChangeRecord>,
) -> Vec<ChangeRecord> {
    let mut kept: Vec<ChangeRecord> = changes
        .into_iter()
        .filter(|c| !c.is_capacity_term())
        .collect();
    let delta = capacity_delta(actor, new_size, strength_delta(&kept));
    kept.extend(delta.into_changes());
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AbilityScores, BuffData, CharacterItem, ItemKind};

    fn actor(size: SizeCategory, strength: i32) -> CharacterRecord {
        CharacterRecord::new(
            "Seelah",
            size,
            AbilityScores::default().with(Ability::Str, strength),
        )
    }

    /// Capacity after activating `changes` and moving to `new_size`.
    fn capacity_after(
        mut actor: CharacterRecord,
        new_size: SizeCategory,
        changes: Vec<ChangeRecord>,
    ) -> f64 {
        actor.size = new_size;
        actor
            .with_item(CharacterItem::new(
                "Effect",
                ItemKind::Buff(BuffData {
                    active: true,
                    changes,
                }),
            ))
            .effective_carry_capacity()
    }

    #[test]
    fn reduce_person_terms() {
        let medium = actor(SizeCategory::Medium, 10);
        let changes = vec![
            ChangeRecord::ability(Ability::Dex, 2),
            ChangeRecord::ability(Ability::Str, -2),
        ];
        let delta = capacity_delta(&medium, SizeCategory::Small, strength_delta(&changes));
        assert_eq!(delta.carry_bonus, 2.0);
        assert!((delta.carry_multiplier - (1.0 / 0.75 - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn compensation_replaces_stale_terms() {
        let medium = actor(SizeCategory::Medium, 10);
        let stale = CapacityDelta {
            carry_bonus: 99.0,
            carry_multiplier: 99.0,
        }
        .into_changes();
        let mut changes = vec![ChangeRecord::ability(Ability::Str, 2)];
        changes.extend(stale);
        let rebuilt = with_capacity_compensation(&medium, SizeCategory::Large, changes);
        assert_eq!(rebuilt.len(), 3);
        assert_eq!(total_for(&rebuilt, ChangeTarget::CarryStrength), -2.0);
        assert_eq!(total_for(&rebuilt, ChangeTarget::CarryMultiplier), -0.5);
    }

    #[test]
    fn capacity_is_neutral_across_sizes_and_strengths() {
        for size in SizeCategory::ALL {
            for target in SizeCategory::ALL {
                for (strength, delta) in [(8, 4), (10, -2), (16, 6), (24, -4)] {
                    let mut before = actor(size, strength);
                    before.carry.user_bonus = 1;
                    before.carry.multiplier_user = 0.5;
                    let original = before.effective_carry_capacity();
                    let changes = with_capacity_compensation(
                        &before,
                        target,
                        vec![ChangeRecord::ability(Ability::Str, delta)],
                    );
                    let after = capacity_after(before, target, changes);
                    assert!(
                        (after - original).abs() < 1e-6,
                        "{size:?}->{target:?} str {strength}{delta:+}: {original} vs {after}"
                    );
                }
            }
        }
    }
}
