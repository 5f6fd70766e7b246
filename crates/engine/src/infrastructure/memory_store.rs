//! In-memory character store.

use async_trait::async_trait;
use dashmap::DashMap;
use morphin_domain::{CharacterId, CharacterItem, CharacterPatch, CharacterRecord, ItemId, ItemPatch};

use crate::infrastructure::ports::{CharacterStore, RepoError};

/// Character documents held in a concurrent map.
#[derive(Default)]
pub struct InMemoryCharacterStore {
    characters: DashMap<CharacterId, CharacterRecord>,
}

impl InMemoryCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_character(self, character: CharacterRecord) -> Self {
        self.characters.insert(character.id, character);
        self
    }

    fn modify<T>(
        &self,
        id: CharacterId,
        f: impl FnOnce(&mut CharacterRecord) -> T,
    ) -> Result<T, RepoError> {
        let mut entry = self
            .characters
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Character", id))?;
        Ok(f(entry.value_mut()))
    }
}

#[async_trait]
impl CharacterStore for InMemoryCharacterStore {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError> {
        Ok(self.characters.get(&id).map(|c| c.value().clone()))
    }

    async fn save(&self, character: &CharacterRecord) -> Result<(), RepoError> {
        self.characters.insert(character.id, character.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CharacterRecord>, RepoError> {
        let mut characters: Vec<CharacterRecord> =
            self.characters.iter().map(|c| c.value().clone()).collect();
        characters.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(characters)
    }

    async fn update(&self, id: CharacterId, patch: &CharacterPatch) -> Result<(), RepoError> {
        self.modify(id, |character| character.apply_patch(patch))
    }

    async fn create_items(
        &self,
        id: CharacterId,
        items: Vec<CharacterItem>,
    ) -> Result<Vec<ItemId>, RepoError> {
        self.modify(id, |character| {
            let ids = items.iter().map(|i| i.id).collect();
            character.add_items(items);
            ids
        })
    }

    async fn update_items(
        &self,
        id: CharacterId,
        patches: Vec<ItemPatch>,
    ) -> Result<(), RepoError> {
        self.modify(id, |character| character.apply_item_patches(&patches))
    }

    async fn delete_items(&self, id: CharacterId, item_ids: Vec<ItemId>) -> Result<(), RepoError> {
        self.modify(id, |character| character.remove_items(&item_ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphin_domain::{AbilityScores, SizeCategory};

    #[tokio::test]
    async fn update_of_missing_character_is_not_found() {
        let store = InMemoryCharacterStore::new();
        let result = store
            .update(CharacterId::new(), &CharacterPatch::new().size(SizeCategory::Large))
            .await;
        assert!(result.is_err_and(|e| e.is_not_found()));
    }

    #[tokio::test]
    async fn patches_merge_into_stored_document() {
        let character = CharacterRecord::new("Kyra", SizeCategory::Medium, AbilityScores::default());
        let id = character.id;
        let store = InMemoryCharacterStore::new().with_character(character);

        store
            .update(id, &CharacterPatch::new().size(SizeCategory::Small))
            .await
            .unwrap();
        let stored = store.get(id).await.unwrap().unwrap();
        assert_eq!(stored.size, SizeCategory::Small);
        assert_eq!(stored.name, "Kyra");
    }
}
