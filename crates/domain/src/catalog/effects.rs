//! Templated notes for special-attack tags.

use crate::value_objects::{SpecialKind, SpecialTag};

/// Fixed DC written on every generated save.
pub const SPECIAL_SAVE_DC: &str = "10";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTemplate {
    pub save_type: &'static str,
    pub description: &'static str,
}

/// How a special tag renders on a generated attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectDetail {
    pub note: &'static str,
    /// Rules text written to the attack's description.
    pub description: &'static str,
    pub save: Option<SaveTemplate>,
}

const fn note(note: &'static str, description: &'static str) -> EffectDetail {
    EffectDetail {
        note,
        description,
        save: None,
    }
}

const fn with_save(
    note: &'static str,
    description: &'static str,
    save_type: &'static str,
    save_description: &'static str,
) -> EffectDetail {
    EffectDetail {
        note,
        description,
        save: Some(SaveTemplate {
            save_type,
            description: save_description,
        }),
    }
}

/// Lookup table from special kind to its templated detail.
pub trait SpecialEffectTable: Send + Sync {
    fn detail(&self, kind: SpecialKind) -> Option<EffectDetail>;

    /// Note text for a tag: the templated note when one exists, else the tag
    /// as written in catalog data.
    fn note_for(&self, tag: &SpecialTag) -> String {
        match (self.detail(tag.kind), &tag.detail) {
            (Some(detail), Some(param)) => format!("{} ({})", detail.note, param),
            (Some(detail), None) => detail.note.to_string(),
            (None, _) => tag.catalog_text(),
        }
    }

    /// Description for a tag, empty when the table has none.
    fn description_for(&self, tag: &SpecialTag) -> &'static str {
        self.detail(tag.kind).map_or("", |d| d.description)
    }
}

/// The built-in effect notes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEffects;

impl SpecialEffectTable for StandardEffects {
    fn detail(&self, kind: SpecialKind) -> Option<EffectDetail> {
        let detail = match kind {
            SpecialKind::Grab => note(
                "Grab: free grapple combat maneuver check on hit",
                "If the creature hits with this attack, it can attempt to start a grapple as a free action without provoking an attack of opportunity. Grab works only against opponents of the listed size or smaller.",
            ),
            SpecialKind::Trip => note(
                "Trip: free trip combat maneuver check on hit",
                "If the creature hits with this attack, it can attempt to trip the opponent as a free action without provoking an attack of opportunity. A failed attempt does not let the target trip the creature in return.",
            ),
            SpecialKind::Constrict => note(
                "Constrict: deals this damage again on a successful grapple check",
                "The creature deals this attack's damage again, in addition to any other grapple damage, whenever it makes a successful grapple check.",
            ),
            SpecialKind::Rake => note(
                "Rake: two extra claw attacks against a grappled foe",
                "The creature gains two additional claw attacks against a foe it is grappling. It must begin its turn already grappling to use them.",
            ),
            SpecialKind::Rend => note(
                "Rend: extra damage if both claws hit",
                "If the creature hits a single target with both claw attacks in one round, it latches on and tears the flesh for this extra damage.",
            ),
            SpecialKind::Poison => with_save(
                "Poison",
                "A creature hit by this attack is exposed to the creature's poison and must resist it or suffer its effects.",
                "fort",
                "Fortitude negates",
            ),
            SpecialKind::Trample => with_save(
                "Trample",
                "As a full-round action, the creature can move up to twice its speed and literally run over opponents at least one size smaller than itself, dealing this damage to each.",
                "ref",
                "Reflex half",
            ),
            SpecialKind::BreathWeapon => with_save(
                "Breath Weapon",
                "The creature exhales in the listed area as a standard action. Every creature in the area takes this damage. The breath weapon can be used the listed number of times per day.",
                "ref",
                "Reflex half",
            ),
            SpecialKind::Burn => with_save(
                "Burn: target catches fire",
                "A creature struck by this attack must succeed on a save or catch fire, taking the listed damage each round until the flames are put out.",
                "ref",
                "Reflex negates",
            ),
            SpecialKind::Whirlwind => with_save(
                "Whirlwind",
                "The creature transforms into a whirlwind and moves through other creatures' spaces. Creatures one or more sizes smaller take damage and may be lifted into the whirlwind.",
                "ref",
                "Reflex negates",
            ),
            SpecialKind::Vortex => with_save(
                "Vortex",
                "The creature transforms into a vortex of swirling water. Creatures one or more sizes smaller take damage and may be swept up in the vortex.",
                "ref",
                "Reflex negates",
            ),
            SpecialKind::Web => with_save(
                "Web: entangles target",
                "The creature throws a web as a ranged touch attack. A struck target is entangled until it escapes or bursts the web.",
                "ref",
                "Reflex escapes",
            ),
            SpecialKind::Roar => with_save(
                "Roar: target is shaken",
                "The creature lets loose a fearsome roar. Creatures within range that fail their save are shaken.",
                "will",
                "Will negates",
            ),
            _ => return None,
        };
        Some(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templated_notes_include_parameter() {
        let tag: SpecialTag = "breathWeapon 30ft cone".parse().unwrap();
        assert_eq!(StandardEffects.note_for(&tag), "Breath Weapon (30ft cone)");
    }

    #[test]
    fn tags_without_detail_render_verbatim() {
        let tag: SpecialTag = "jet 200ft".parse().unwrap();
        assert_eq!(StandardEffects.note_for(&tag), "jet 200ft");
        let tag: SpecialTag = "inkCloud".parse().unwrap();
        assert_eq!(StandardEffects.note_for(&tag), "inkCloud");
        assert!(StandardEffects.detail(SpecialKind::Pounce).is_none());
    }

    #[test]
    fn poison_carries_fortitude_save() {
        let save = StandardEffects.detail(SpecialKind::Poison).and_then(|d| d.save);
        assert_eq!(save.map(|s| s.save_type), Some("fort"));
    }

    #[test]
    fn every_templated_effect_has_a_description() {
        for kind in SpecialKind::ALL {
            if let Some(detail) = StandardEffects.detail(kind) {
                assert!(!detail.description.is_empty(), "{:?}", kind);
            }
        }
        let tag: SpecialTag = "pounce".parse().unwrap();
        assert_eq!(StandardEffects.description_for(&tag), "");
    }
}
