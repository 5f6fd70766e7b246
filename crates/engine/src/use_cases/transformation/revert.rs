//! Revert the transformation recorded in a character's snapshot.

use std::sync::Arc;

use morphin_domain::{CharacterId, CharacterPatch, EffectCategory, EffectSnapshot, ItemId, ItemPatch};
use tracing::{info, warn};

use crate::infrastructure::ports::CharacterStore;

use super::error::TransformError;

/// Revert transformation use case.
///
/// The snapshot is removed only after every restoring write succeeded, so a
/// failed revert can simply be run again.
pub struct RevertTransformation {
    store: Arc<dyn CharacterStore>,
}

impl RevertTransformation {
    pub fn new(store: Arc<dyn CharacterStore>) -> Self {
        Self { store }
    }

    /// Execute the revert use case.
    ///
    /// # Arguments
    /// * `id` - The character to restore
    ///
    /// # Returns
    /// * `Ok(EffectSnapshot)` - The snapshot that was reverted and removed
    /// * `Err(TransformError::NotTransformed)` - Nothing to revert; nothing changed
    /// * `Err(TransformError::CharacterNotFound)` - Unknown character
    pub async fn execute(&self, id: CharacterId) -> Result<EffectSnapshot, TransformError> {
        let actor = self
            .store
            .get(id)
            .await?
            .ok_or(TransformError::CharacterNotFound)?;
        let Some(snapshot) = actor.snapshot().cloned() else {
            warn!(character_id = %id, name = %actor.name, "Revert requested but character is not transformed");
            return Err(TransformError::NotTransformed { name: actor.name });
        };

        let mut armor = Vec::new();
        for original in &snapshot.armor {
            if actor.item(original.item_id).is_some() {
                armor.push(ItemPatch::new(original.item_id).armor_value(original.original_armor_rating));
            } else {
                warn!(character_id = %id, item_id = %original.item_id, "Rescaled armor no longer exists, skipping");
            }
        }
        if !armor.is_empty() {
            self.store.update_items(id, armor).await?;
        }

        let mut patch = CharacterPatch::new().size(snapshot.size);
        if let Some(data) = &snapshot.data {
            patch.traits = data.traits.clone();
            patch.token = data.token.clone();
        }
        self.store.update(id, &patch).await?;

        let container = actor.find_buff(&snapshot.buff_name).map(|item| item.id);
        match snapshot.category {
            EffectCategory::Buff => {
                if let Some(container_id) = container {
                    self.deactivate(id, container_id).await?;
                }
            }
            EffectCategory::Polymorph => {
                let (existing, missing): (Vec<ItemId>, Vec<ItemId>) = snapshot
                    .items_created
                    .iter()
                    .copied()
                    .partition(|item_id| actor.item(*item_id).is_some());
                if !missing.is_empty() {
                    warn!(character_id = %id, missing = missing.len(), "Created items already deleted, skipping");
                }
                if !existing.is_empty() {
                    self.store.delete_items(id, existing).await?;
                }
                if let Some(container_id) =
                    container.filter(|c| !snapshot.items_created.contains(c))
                {
                    self.deactivate(id, container_id).await?;
                }
            }
        }

        self.store
            .update(id, &CharacterPatch::new().remove_snapshot())
            .await?;

        info!(
            character_id = %id,
            source = %snapshot.source,
            size = %snapshot.size,
            "Transformation reverted"
        );
        Ok(snapshot)
    }

    async fn deactivate(&self, id: CharacterId, container_id: ItemId) -> Result<(), TransformError> {
        self.store
            .update_items(id, vec![ItemPatch::new(container_id).active(false)])
            .await?;
        Ok(())
    }
}
