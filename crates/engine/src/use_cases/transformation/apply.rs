//! Apply a planned transformation.
//!
//! Every write records how to undo itself. The snapshot is written last; if
//! any earlier write fails the recorded undo steps run in reverse and the
//! original error is returned.

use std::sync::Arc;

use morphin_domain::{
    rescale_armor, ChangeRecord, CharacterId, CharacterPatch, CharacterRecord, EffectCategory,
    EffectSnapshot, ItemId, ItemPatch, SnapshotData, TokenSettings, TransformationPlan,
};
use tracing::{error, info};

use crate::infrastructure::ports::{CharacterStore, ClockPort, RepoError};

use super::error::TransformError;

enum Undo {
    RestoreContainer {
        id: ItemId,
        active: bool,
        changes: Vec<ChangeRecord>,
    },
    DeleteItems(Vec<ItemId>),
    RestoreItems(Vec<ItemPatch>),
    RestoreCharacter(CharacterPatch),
}

/// Apply transformation use case.
pub struct ApplyTransformation {
    store: Arc<dyn CharacterStore>,
    clock: Arc<dyn ClockPort>,
}

impl ApplyTransformation {
    pub fn new(store: Arc<dyn CharacterStore>, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    /// Write `plan` to `actor` and record the snapshot that reverses it.
    ///
    /// # Arguments
    /// * `actor` - The character as loaded before the transformation
    /// * `plan` - The planned writes
    ///
    /// # Returns
    /// * `Ok(EffectSnapshot)` - The snapshot now stored on the character
    /// * `Err(TransformError::AlreadyTransformed)` - The character already has a snapshot
    /// * `Err(TransformError::Repo)` - A write failed; earlier writes were rolled back
    pub async fn execute(
        &self,
        actor: &CharacterRecord,
        plan: &TransformationPlan,
    ) -> Result<EffectSnapshot, TransformError> {
        if let Some(existing) = actor.snapshot() {
            return Err(TransformError::AlreadyTransformed {
                effect: existing.source.clone(),
            });
        }

        let mut journal = Vec::new();
        match self.write(actor, plan, &mut journal).await {
            Ok(snapshot) => {
                info!(
                    character_id = %actor.id,
                    source = %plan.source,
                    size = %plan.new_size,
                    items_created = snapshot.items_created.len(),
                    "Transformation applied"
                );
                Ok(snapshot)
            }
            Err(e) => {
                error!(
                    character_id = %actor.id,
                    source = %plan.source,
                    error = %e,
                    "Transformation failed, rolling back"
                );
                self.rollback(actor.id, journal).await;
                Err(e.into())
            }
        }
    }

    async fn write(
        &self,
        actor: &CharacterRecord,
        plan: &TransformationPlan,
        journal: &mut Vec<Undo>,
    ) -> Result<EffectSnapshot, RepoError> {
        let id = actor.id;
        let changes = plan.container_changes(actor);
        let mut items_created = Vec::new();

        let existing = actor
            .find_buff(&plan.effect_name)
            .and_then(|item| item.buff().map(|buff| (item.id, buff)));
        match existing {
            Some((container_id, buff)) => {
                self.store
                    .update_items(
                        id,
                        vec![ItemPatch::new(container_id).active(true).changes(changes)],
                    )
                    .await?;
                journal.push(Undo::RestoreContainer {
                    id: container_id,
                    active: buff.active,
                    changes: buff.changes.clone(),
                });
            }
            None => {
                let created = self
                    .store
                    .create_items(id, vec![plan.new_container(changes)])
                    .await?;
                journal.push(Undo::DeleteItems(created.clone()));
                if plan.category == EffectCategory::Polymorph {
                    items_created.extend(created);
                }
            }
        }

        let (armor_patches, armor) = rescale_armor(actor, plan.new_size);
        if !armor_patches.is_empty() {
            self.store.update_items(id, armor_patches).await?;
            journal.push(Undo::RestoreItems(
                armor
                    .iter()
                    .map(|a| ItemPatch::new(a.item_id).armor_value(a.original_armor_rating))
                    .collect(),
            ));
        }

        if !plan.attacks.is_empty() {
            let created = self.store.create_items(id, plan.attacks.clone()).await?;
            journal.push(Undo::DeleteItems(created.clone()));
            items_created.extend(created);
        }

        let token = plan.token_image.as_ref().map(|image| TokenSettings {
            image: Some(image.clone()),
        });
        let original_token = token.as_ref().map(|_| actor.token.clone());
        let original_traits = plan.trait_overrides.originals(&actor.traits);
        let mut patch = CharacterPatch::new()
            .size(plan.new_size)
            .traits(plan.trait_overrides.clone());
        patch.token = token;
        self.store.update(id, &patch).await?;
        let mut restore = CharacterPatch::new()
            .size(actor.size)
            .traits(original_traits.clone());
        restore.token = original_token.clone();
        journal.push(Undo::RestoreCharacter(restore));

        let data = SnapshotData {
            traits: original_traits,
            token: original_token,
        };
        let snapshot = EffectSnapshot {
            source: plan.source.clone(),
            buff_name: plan.effect_name.clone(),
            category: plan.category,
            size: actor.size,
            armor,
            data: (!data.is_empty()).then_some(data),
            items_created,
            applied_at: self.clock.now(),
        };
        self.store
            .update(id, &CharacterPatch::new().store_snapshot(snapshot.clone()))
            .await?;
        Ok(snapshot)
    }

    async fn rollback(&self, id: CharacterId, journal: Vec<Undo>) {
        for step in journal.into_iter().rev() {
            let result = match step {
                Undo::RestoreContainer {
                    id: container_id,
                    active,
                    changes,
                } => {
                    self.store
                        .update_items(
                            id,
                            vec![ItemPatch::new(container_id).active(active).changes(changes)],
                        )
                        .await
                }
                Undo::DeleteItems(item_ids) => self.store.delete_items(id, item_ids).await,
                Undo::RestoreItems(patches) => self.store.update_items(id, patches).await,
                Undo::RestoreCharacter(patch) => self.store.update(id, &patch).await,
            };
            if let Err(e) = result {
                error!(character_id = %id, error = %e, "Rollback step failed");
            }
        }
    }
}
