//! Character record - the document a transformation reads and patches.
//!
//! Derived statistics (ability totals, natural armor, carrying capacity) are
//! computed from base values plus the change records of active buffs, the
//! same way the host sheet computes them.

use serde::{Deserialize, Serialize};

use crate::entities::item::{CharacterItem, ItemKind, ItemPatch};
use crate::entities::snapshot::EffectSnapshot;
use crate::ids::{CharacterId, ItemId};
use crate::value_objects::{
    Ability, ChangeRecord, ChangeTarget, DamageType, EnergyResistance, Sense, SizeCategory,
    SpeedSet,
};

/// Base ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub str: i32,
    pub dex: i32,
    pub con: i32,
    pub int: i32,
    pub wis: i32,
    pub cha: i32,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            str: 10,
            dex: 10,
            con: 10,
            int: 10,
            wis: 10,
            cha: 10,
        }
    }
}

impl AbilityScores {
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Str => self.str,
            Ability::Dex => self.dex,
            Ability::Con => self.con,
            Ability::Int => self.int,
            Ability::Wis => self.wis,
            Ability::Cha => self.cha,
        }
    }

    pub fn with(mut self, ability: Ability, value: i32) -> Self {
        match ability {
            Ability::Str => self.str = value,
            Ability::Dex => self.dex = value,
            Ability::Con => self.con = value,
            Ability::Int => self.int = value,
            Ability::Wis => self.wis = value,
            Ability::Cha => self.cha = value,
        }
        self
    }
}

/// User-controlled carrying capacity settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrySettings {
    /// Bonus added to Strength for carrying purposes.
    #[serde(default)]
    pub user_bonus: i32,
    #[serde(default = "one")]
    pub multiplier_base: f64,
    #[serde(default)]
    pub multiplier_user: f64,
}

fn one() -> f64 {
    1.0
}

impl Default for CarrySettings {
    fn default() -> Self {
        Self {
            user_bonus: 0,
            multiplier_base: 1.0,
            multiplier_user: 0.0,
        }
    }
}

/// Defensive and movement traits a transformation may overwrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterTraits {
    /// Free-form damage reduction, entries joined with "; ".
    #[serde(default)]
    pub damage_reduction: String,
    /// Spell resistance formula.
    #[serde(default)]
    pub spell_resistance: String,
    #[serde(default)]
    pub energy_resistances: Vec<EnergyResistance>,
    #[serde(default)]
    pub vulnerabilities: Vec<DamageType>,
    #[serde(default)]
    pub damage_immunities: Vec<DamageType>,
    #[serde(default)]
    pub regeneration: String,
    #[serde(default)]
    pub senses: Vec<Sense>,
    #[serde(default)]
    pub speeds: SpeedSet,
}

/// Partial trait update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_reduction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spell_resistance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_resistances: Option<Vec<EnergyResistance>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerabilities: Option<Vec<DamageType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_immunities: Option<Vec<DamageType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regeneration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub senses: Option<Vec<Sense>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speeds: Option<SpeedSet>,
}

impl TraitPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, traits: &mut CharacterTraits) {
        if let Some(value) = &self.damage_reduction {
            traits.damage_reduction = value.clone();
        }
        if let Some(value) = &self.spell_resistance {
            traits.spell_resistance = value.clone();
        }
        if let Some(value) = &self.energy_resistances {
            traits.energy_resistances = value.clone();
        }
        if let Some(value) = &self.vulnerabilities {
            traits.vulnerabilities = value.clone();
        }
        if let Some(value) = &self.damage_immunities {
            traits.damage_immunities = value.clone();
        }
        if let Some(value) = &self.regeneration {
            traits.regeneration = value.clone();
        }
        if let Some(value) = &self.senses {
            traits.senses = value.clone();
        }
        if let Some(value) = &self.speeds {
            traits.speeds = value.clone();
        }
    }

    /// Current values of exactly the fields this patch would overwrite.
    pub fn originals(&self, traits: &CharacterTraits) -> TraitPatch {
        TraitPatch {
            damage_reduction: self
                .damage_reduction
                .as_ref()
                .map(|_| traits.damage_reduction.clone()),
            spell_resistance: self
                .spell_resistance
                .as_ref()
                .map(|_| traits.spell_resistance.clone()),
            energy_resistances: self
                .energy_resistances
                .as_ref()
                .map(|_| traits.energy_resistances.clone()),
            vulnerabilities: self
                .vulnerabilities
                .as_ref()
                .map(|_| traits.vulnerabilities.clone()),
            damage_immunities: self
                .damage_immunities
                .as_ref()
                .map(|_| traits.damage_immunities.clone()),
            regeneration: self
                .regeneration
                .as_ref()
                .map(|_| traits.regeneration.clone()),
            senses: self.senses.as_ref().map(|_| traits.senses.clone()),
            speeds: self.speeds.as_ref().map(|_| traits.speeds.clone()),
        }
    }
}

/// Token display settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Module-scoped flags on the character document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterFlags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morphin: Option<EffectSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub name: String,
    pub size: SizeCategory,
    #[serde(default)]
    pub abilities: AbilityScores,
    /// Ability used for melee attack rolls when nothing else decides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub melee_attack_ability: Option<Ability>,
    #[serde(default)]
    pub carry: CarrySettings,
    #[serde(default)]
    pub traits: CharacterTraits,
    #[serde(default)]
    pub token: TokenSettings,
    #[serde(default)]
    pub items: Vec<CharacterItem>,
    #[serde(default)]
    pub flags: CharacterFlags,
}

/// How a patch treats the snapshot flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SnapshotWrite {
    Store(EffectSnapshot),
    Remove,
}

/// Partial-path update of a character. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeCategory>,
    #[serde(default)]
    pub traits: TraitPatch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<SnapshotWrite>,
}

impl CharacterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, size: SizeCategory) -> Self {
        self.size = Some(size);
        self
    }

    pub fn traits(mut self, traits: TraitPatch) -> Self {
        self.traits = traits;
        self
    }

    pub fn token(mut self, token: TokenSettings) -> Self {
        self.token = Some(token);
        self
    }

    pub fn store_snapshot(mut self, snapshot: EffectSnapshot) -> Self {
        self.snapshot = Some(SnapshotWrite::Store(snapshot));
        self
    }

    pub fn remove_snapshot(mut self) -> Self {
        self.snapshot = Some(SnapshotWrite::Remove);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_none()
            && self.traits.is_empty()
            && self.token.is_none()
            && self.snapshot.is_none()
    }
}

/// Heavy load in pounds for Strength 1 through 29.
const HEAVY_LOADS: [f64; 29] = [
    10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 115.0, 130.0, 150.0, 175.0,
    200.0, 230.0, 260.0, 300.0, 350.0, 400.0, 460.0, 520.0, 600.0, 700.0, 800.0, 920.0, 1040.0,
    1200.0, 1400.0,
];

/// Heavy load for a Medium biped of the given Strength.
///
/// Above 29 the load quadruples for every ten points.
pub fn heavy_load(strength: i64) -> f64 {
    if strength <= 0 {
        return 0.0;
    }
    if strength < 30 {
        return HEAVY_LOADS[(strength - 1) as usize];
    }
    let tens = (strength - 20) / 10;
    let base = strength - tens * 10;
    HEAVY_LOADS[(base - 1) as usize] * 4f64.powi(tens as i32)
}

impl CharacterRecord {
    pub fn new(name: impl Into<String>, size: SizeCategory, abilities: AbilityScores) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            size,
            abilities,
            melee_attack_ability: None,
            carry: CarrySettings::default(),
            traits: CharacterTraits::default(),
            token: TokenSettings::default(),
            items: Vec::new(),
            flags: CharacterFlags::default(),
        }
    }

    pub fn with_item(mut self, item: CharacterItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn snapshot(&self) -> Option<&EffectSnapshot> {
        self.flags.morphin.as_ref()
    }

    pub fn is_transformed(&self) -> bool {
        self.flags.morphin.is_some()
    }

    pub fn item(&self, id: ItemId) -> Option<&CharacterItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn find_buff(&self, name: &str) -> Option<&CharacterItem> {
        self.items
            .iter()
            .find(|i| i.buff().is_some() && i.name == name)
    }

    pub fn has_feat(&self, name: &str) -> bool {
        self.items
            .iter()
            .any(|i| matches!(i.data, ItemKind::Feat) && i.name.eq_ignore_ascii_case(name))
    }

    pub fn armor_and_shields(&self) -> impl Iterator<Item = &CharacterItem> {
        self.items.iter().filter(|i| i.is_armor_or_shield())
    }

    /// Change records of every active buff, in item order.
    pub fn active_changes(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.items
            .iter()
            .filter_map(|i| i.buff())
            .filter(|b| b.active)
            .flat_map(|b| b.changes.iter())
    }

    fn active_total(&self, target: ChangeTarget) -> f64 {
        self.active_changes().map(|c| c.additive_for(target)).sum()
    }

    pub fn ability_total(&self, ability: Ability) -> f64 {
        f64::from(self.abilities.get(ability)) + self.active_total(ChangeTarget::Ability(ability))
    }

    pub fn natural_armor_bonus(&self) -> f64 {
        self.active_total(ChangeTarget::NaturalArmor)
    }

    /// Carry bonus to Strength. Active `carryStr` changes supersede the user bonus.
    pub fn carry_strength_bonus(&self) -> f64 {
        let has_override = self
            .active_changes()
            .any(|c| c.target() == ChangeTarget::CarryStrength);
        if has_override {
            self.active_total(ChangeTarget::CarryStrength)
        } else {
            f64::from(self.carry.user_bonus)
        }
    }

    pub fn carry_multiplier(&self) -> f64 {
        self.carry.multiplier_base
            + self.carry.multiplier_user
            + self.active_total(ChangeTarget::CarryMultiplier)
    }

    /// Heavy load in pounds after carry bonus, multiplier, and size.
    pub fn effective_carry_capacity(&self) -> f64 {
        let strength = (self.ability_total(Ability::Str) + self.carry_strength_bonus()).floor();
        heavy_load(strength as i64) * self.carry_multiplier() * self.size.encumbrance_factor()
    }

    /// Sum of the integer terms of the spell resistance formula; 0 if it has none.
    pub fn spell_resistance_total(&self) -> i32 {
        self.traits
            .spell_resistance
            .split('+')
            .filter_map(|term| term.trim().parse::<i32>().ok())
            .sum()
    }

    pub fn apply_patch(&mut self, patch: &CharacterPatch) {
        if let Some(size) = patch.size {
            self.size = size;
        }
        patch.traits.apply_to(&mut self.traits);
        if let Some(token) = &patch.token {
            self.token = token.clone();
        }
        match &patch.snapshot {
            Some(SnapshotWrite::Store(snapshot)) => self.flags.morphin = Some(snapshot.clone()),
            Some(SnapshotWrite::Remove) => self.flags.morphin = None,
            None => {}
        }
    }

    /// Apply item patches; patches naming missing items are ignored.
    pub fn apply_item_patches(&mut self, patches: &[ItemPatch]) {
        for patch in patches {
            if let Some(item) = self.items.iter_mut().find(|i| i.id == patch.id) {
                item.apply_patch(patch);
            }
        }
    }

    pub fn add_items(&mut self, items: Vec<CharacterItem>) {
        self.items.extend(items);
    }

    pub fn remove_items(&mut self, ids: &[ItemId]) {
        self.items.retain(|i| !ids.contains(&i.id));
    }
}
