//! Form browsing and previews.

use std::sync::Arc;

use morphin_domain::{Catalog, CharacterId, FormDefinition, Localize, ResolvedForm, SpellKind};

use crate::infrastructure::ports::CharacterStore;

use super::error::TransformError;
use super::{resolve_form, PolymorphRequest};

/// Read-only form operations.
pub struct FormOps {
    catalog: Arc<Catalog>,
    store: Arc<dyn CharacterStore>,
    labels: Arc<dyn Localize>,
}

impl FormOps {
    pub fn new(
        catalog: Arc<Catalog>,
        store: Arc<dyn CharacterStore>,
        labels: Arc<dyn Localize>,
    ) -> Self {
        Self {
            catalog,
            store,
            labels,
        }
    }

    /// Forms `kind` at `level` can assume, sorted by name.
    pub fn list(&self, kind: SpellKind, level: u8) -> Result<Vec<FormDefinition>, TransformError> {
        Ok(self
            .catalog
            .filter(kind, level)?
            .into_iter()
            .cloned()
            .collect())
    }

    /// Resolve `request` for character `id` without changing anything.
    pub async fn preview(
        &self,
        id: CharacterId,
        request: &PolymorphRequest,
    ) -> Result<ResolvedForm, TransformError> {
        let actor = self
            .store
            .get(id)
            .await?
            .ok_or(TransformError::CharacterNotFound)?;
        resolve_form(&self.catalog, self.labels.as_ref(), request, actor.size)
    }
}
