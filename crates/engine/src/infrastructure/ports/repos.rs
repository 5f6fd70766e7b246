//! Character persistence port.

use async_trait::async_trait;
use morphin_domain::{CharacterId, CharacterItem, CharacterPatch, CharacterRecord, ItemId, ItemPatch};

use super::error::RepoError;

/// Character document storage.
///
/// Updates are partial merges: only the paths a patch names are written.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterStore: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError>;

    /// Insert or replace a whole document.
    async fn save(&self, character: &CharacterRecord) -> Result<(), RepoError>;

    async fn list(&self) -> Result<Vec<CharacterRecord>, RepoError>;

    async fn update(&self, id: CharacterId, patch: &CharacterPatch) -> Result<(), RepoError>;

    /// Add items to the character, returning their ids in order.
    async fn create_items(
        &self,
        id: CharacterId,
        items: Vec<CharacterItem>,
    ) -> Result<Vec<ItemId>, RepoError>;

    async fn update_items(&self, id: CharacterId, patches: Vec<ItemPatch>)
        -> Result<(), RepoError>;

    async fn delete_items(&self, id: CharacterId, item_ids: Vec<ItemId>) -> Result<(), RepoError>;
}
