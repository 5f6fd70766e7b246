//! Items owned by a character: buff containers, equipment, attacks, feats.
//!
//! Only the fields the transformation engine reads or writes are modelled.
//! Everything else about an item stays in the host document untouched.

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;
use crate::value_objects::{Ability, ChangeRecord, DamageType};

/// An item on a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    pub data: ItemKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ItemKind {
    Buff(BuffData),
    Equipment(EquipmentData),
    Attack(AttackData),
    Feat,
}

/// A toggleable effect container holding change records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuffData {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub changes: Vec<ChangeRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentType {
    Armor,
    Shield,
    Misc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentData {
    pub equipment_type: EquipmentType,
    #[serde(default)]
    pub armor_value: i32,
    #[serde(default)]
    pub equipped: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackCategory {
    #[default]
    Natural,
    Misc,
}

/// A generated or hand-made attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackData {
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub attack_category: AttackCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub actions: Vec<AttackAction>,
}

/// One extra attack roll of the same action, e.g. "Claw 2".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackPart {
    pub formula: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamagePart {
    pub formula: String,
    #[serde(default)]
    pub types: Vec<DamageType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSpec {
    pub save_type: String,
    pub dc: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeSpec {
    pub value: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_increments: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackAction {
    pub name: String,
    pub action_type: String,
    pub attack_name: String,
    pub attack_ability: Ability,
    pub damage_ability: Ability,
    pub damage_mult: f64,
    pub crit_range: u8,
    pub crit_multiplier: u8,
    #[serde(default)]
    pub attack_parts: Vec<AttackPart>,
    #[serde(default)]
    pub damage_parts: Vec<DamagePart>,
    #[serde(default)]
    pub non_crit_parts: Vec<DamagePart>,
    #[serde(default)]
    pub effect_notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save: Option<SaveSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<u8>,
}

impl CharacterItem {
    pub fn new(name: impl Into<String>, data: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            img: None,
            data,
        }
    }

    pub fn with_img(mut self, img: impl Into<String>) -> Self {
        self.img = Some(img.into());
        self
    }

    pub fn buff(&self) -> Option<&BuffData> {
        match &self.data {
            ItemKind::Buff(buff) => Some(buff),
            _ => None,
        }
    }

    pub fn equipment(&self) -> Option<&EquipmentData> {
        match &self.data {
            ItemKind::Equipment(equipment) => Some(equipment),
            _ => None,
        }
    }

    pub fn attack(&self) -> Option<&AttackData> {
        match &self.data {
            ItemKind::Attack(attack) => Some(attack),
            _ => None,
        }
    }

    /// Armor or shield whose rating scales with size.
    pub fn is_armor_or_shield(&self) -> bool {
        self.equipment().is_some_and(|e| {
            matches!(e.equipment_type, EquipmentType::Armor | EquipmentType::Shield)
        })
    }

    /// Merge a partial update into this item. Fields that do not apply to
    /// the item's kind are ignored.
    pub fn apply_patch(&mut self, patch: &ItemPatch) {
        match &mut self.data {
            ItemKind::Buff(buff) => {
                if let Some(active) = patch.active {
                    buff.active = active;
                }
                if let Some(changes) = &patch.changes {
                    buff.changes = changes.clone();
                }
            }
            ItemKind::Equipment(equipment) => {
                if let Some(armor_value) = patch.armor_value {
                    equipment.armor_value = armor_value;
                }
            }
            ItemKind::Attack(_) | ItemKind::Feat => {}
        }
    }
}

/// Partial update of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<Vec<ChangeRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor_value: Option<i32>,
}

impl ItemPatch {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            active: None,
            changes: None,
            armor_value: None,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn changes(mut self, changes: Vec<ChangeRecord>) -> Self {
        self.changes = Some(changes);
        self
    }

    pub fn armor_value(mut self, armor_value: i32) -> Self {
        self.armor_value = Some(armor_value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breastplate(armor: i32) -> CharacterItem {
        CharacterItem::new(
            "Breastplate",
            ItemKind::Equipment(EquipmentData {
                equipment_type: EquipmentType::Armor,
                armor_value: armor,
                equipped: true,
            }),
        )
    }

    #[test]
    fn patch_updates_only_matching_fields() {
        let mut item = breastplate(6);
        item.apply_patch(&ItemPatch::new(item.id).armor_value(3).active(true));
        assert_eq!(item.equipment().map(|e| e.armor_value), Some(3));

        let mut buff = CharacterItem::new("Enlarge Person", ItemKind::Buff(BuffData::default()));
        buff.apply_patch(&ItemPatch::new(buff.id).active(true).armor_value(9));
        assert_eq!(buff.buff().map(|b| b.active), Some(true));
    }

    #[test]
    fn misc_equipment_is_not_armor() {
        let ring = CharacterItem::new(
            "Ring",
            ItemKind::Equipment(EquipmentData {
                equipment_type: EquipmentType::Misc,
                armor_value: 0,
                equipped: true,
            }),
        );
        assert!(!ring.is_armor_or_shield());
        assert!(breastplate(6).is_armor_or_shield());
    }

    #[test]
    fn item_kind_is_tagged_in_json() {
        let json = serde_json::to_value(breastplate(4)).unwrap();
        assert_eq!(json["data"]["type"], "equipment");
        assert_eq!(json["data"]["armorValue"], 4);
        let feat: CharacterItem = serde_json::from_value(serde_json::json!({
            "id": ItemId::new(),
            "name": "Weapon Finesse",
            "data": {"type": "feat"}
        }))
        .unwrap();
        assert_eq!(feat.data, ItemKind::Feat);
    }
}
