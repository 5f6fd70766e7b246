//! SQLite-backed character store.
//!
//! Each character is one JSON document. Partial updates read, merge, and
//! write the document inside a transaction.

use async_trait::async_trait;
use morphin_domain::{CharacterId, CharacterItem, CharacterPatch, CharacterRecord, ItemId, ItemPatch};
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::infrastructure::ports::{CharacterStore, ClockPort, RepoError};

/// SQLite implementation of the character store.
pub struct SqliteCharacterStore {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteCharacterStore {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("characters", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS characters (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                document TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("characters", e))?;

        Ok(Self { pool, clock })
    }

    fn decode(json: &str) -> Result<CharacterRecord, RepoError> {
        serde_json::from_str(json).map_err(RepoError::serialization)
    }

    /// Load, change, and write back one document atomically.
    async fn modify<T: Send>(
        &self,
        id: CharacterId,
        operation: &'static str,
        f: impl FnOnce(&mut CharacterRecord) -> T + Send,
    ) -> Result<T, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database(operation, e))?;

        let row = sqlx::query("SELECT document FROM characters WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| RepoError::database(operation, e))?;
        let Some(row) = row else {
            return Err(RepoError::not_found("Character", id));
        };
        let json: String = row.get("document");
        let mut character = Self::decode(&json)?;

        let result = f(&mut character);

        let json =
            serde_json::to_string(&character).map_err(RepoError::serialization)?;
        sqlx::query("UPDATE characters SET name = ?, document = ?, updated_at = ? WHERE id = ?")
            .bind(&character.name)
            .bind(json)
            .bind(self.clock.now().to_rfc3339())
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database(operation, e))?;

        tx.commit()
            .await
            .map_err(|e| RepoError::database(operation, e))?;
        Ok(result)
    }
}

#[async_trait]
impl CharacterStore for SqliteCharacterStore {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError> {
        let row = sqlx::query("SELECT document FROM characters WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_character", e))?;

        match row {
            Some(row) => {
                let json: String = row.get("document");
                Ok(Some(Self::decode(&json)?))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, character: &CharacterRecord) -> Result<(), RepoError> {
        let json =
            serde_json::to_string(character).map_err(RepoError::serialization)?;
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO characters (id, name, document, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                document = excluded.document,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(character.id.to_string())
        .bind(&character.name)
        .bind(json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("save_character", e))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<CharacterRecord>, RepoError> {
        let rows = sqlx::query("SELECT document FROM characters ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_characters", e))?;

        rows.iter()
            .map(|row| Self::decode(&row.get::<String, _>("document")))
            .collect()
    }

    async fn update(&self, id: CharacterId, patch: &CharacterPatch) -> Result<(), RepoError> {
        let patch = patch.clone();
        self.modify(id, "update_character", move |character| {
            character.apply_patch(&patch)
        })
        .await
    }

    async fn create_items(
        &self,
        id: CharacterId,
        items: Vec<CharacterItem>,
    ) -> Result<Vec<ItemId>, RepoError> {
        self.modify(id, "create_items", move |character| {
            let ids = items.iter().map(|i| i.id).collect();
            character.add_items(items);
            ids
        })
        .await
    }

    async fn update_items(
        &self,
        id: CharacterId,
        patches: Vec<ItemPatch>,
    ) -> Result<(), RepoError> {
        self.modify(id, "update_items", move |character| {
            character.apply_item_patches(&patches)
        })
        .await
    }

    async fn delete_items(&self, id: CharacterId, item_ids: Vec<ItemId>) -> Result<(), RepoError> {
        self.modify(id, "delete_items", move |character| {
            character.remove_items(&item_ids)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use morphin_domain::{AbilityScores, BuffData, ItemKind, SizeCategory};

    async fn store(dir: &tempfile::TempDir) -> SqliteCharacterStore {
        let path = dir.path().join("characters.db");
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()));
        SqliteCharacterStore::new(path.to_str().unwrap(), clock)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn saves_and_reads_documents() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let character = CharacterRecord::new("Lini", SizeCategory::Small, AbilityScores::default());

        store.save(&character).await.unwrap();

        assert_eq!(store.get(character.id).await.unwrap(), Some(character.clone()));
        assert_eq!(store.list().await.unwrap().len(), 1);
        assert_eq!(store.get(CharacterId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn item_operations_merge_into_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let character = CharacterRecord::new("Lini", SizeCategory::Small, AbilityScores::default());
        let id = character.id;
        store.save(&character).await.unwrap();

        let buff = CharacterItem::new("Barkskin", ItemKind::Buff(BuffData::default()));
        let ids = store.create_items(id, vec![buff]).await.unwrap();
        store
            .update_items(id, vec![ItemPatch::new(ids[0]).active(true)])
            .await
            .unwrap();
        let stored = store.get(id).await.unwrap().unwrap();
        assert_eq!(stored.items[0].buff().map(|b| b.active), Some(true));

        store.delete_items(id, ids).await.unwrap();
        store
            .update(id, &CharacterPatch::new().size(SizeCategory::Tiny))
            .await
            .unwrap();
        let stored = store.get(id).await.unwrap().unwrap();
        assert!(stored.items.is_empty());
        assert_eq!(stored.size, SizeCategory::Tiny);
    }

    #[tokio::test]
    async fn update_of_missing_character_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let result = store
            .update(CharacterId::new(), &CharacterPatch::new().size(SizeCategory::Huge))
            .await;
        assert!(result.is_err_and(|e| e.is_not_found()));
    }
}
