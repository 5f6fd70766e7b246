//! The revert record stored on a transformed character.
//!
//! A character carries at most one snapshot. Its presence is the only signal
//! that the character is currently transformed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::character::{TokenSettings, TraitPatch};
use crate::ids::ItemId;
use crate::value_objects::SizeCategory;

/// Which revert policy applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectCategory {
    /// Stat-adjustment buffs: the container is deactivated on revert.
    Buff,
    /// Creature shapes: created items are deleted on revert.
    Polymorph,
}

/// Original armor rating of an item rescaled by the transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmorSnapshot {
    pub item_id: ItemId,
    pub original_armor_rating: i32,
}

/// Original values of everything the transformation overwrote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotData {
    #[serde(default)]
    pub traits: TraitPatch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenSettings>,
}

impl SnapshotData {
    pub fn is_empty(&self) -> bool {
        self.traits.is_empty() && self.token.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectSnapshot {
    /// Effect source, e.g. "Enlarge Person" or "Wild Shape".
    pub source: String,
    /// Name of the buff container carrying the changes.
    pub buff_name: String,
    pub category: EffectCategory,
    /// Size before the transformation.
    pub size: SizeCategory,
    #[serde(default)]
    pub armor: Vec<ArmorSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SnapshotData>,
    #[serde(default)]
    pub items_created: Vec<ItemId>,
    pub applied_at: DateTime<Utc>,
}

impl EffectSnapshot {
    pub fn original_armor(&self, item_id: ItemId) -> Option<i32> {
        self.armor
            .iter()
            .find(|a| a.item_id == item_id)
            .map(|a| a.original_armor_rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_module_field_names() {
        let item_id = ItemId::new();
        let snapshot = EffectSnapshot {
            source: "Reduce Person".into(),
            buff_name: "Reduce Person".into(),
            category: EffectCategory::Buff,
            size: SizeCategory::Medium,
            armor: vec![ArmorSnapshot {
                item_id,
                original_armor_rating: 4,
            }],
            data: None,
            items_created: vec![],
            applied_at: Utc::now(),
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["buffName"], "Reduce Person");
        assert_eq!(json["size"], "med");
        assert_eq!(json["armor"][0]["originalArmorRating"], 4);
        assert!(json.get("data").is_none());
        assert_eq!(snapshot.original_armor(item_id), Some(4));
    }
}
