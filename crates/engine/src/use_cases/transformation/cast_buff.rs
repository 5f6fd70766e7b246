//! Cast a size-changing buff on the selected character.

use std::sync::Arc;

use morphin_domain::{plan_buff, BuffKind, EffectSnapshot};
use tracing::debug;

use crate::infrastructure::ports::{CharacterStore, SelectionPort};

use super::apply::ApplyTransformation;
use super::error::TransformError;
use super::selected_character;

/// Cast buff use case.
pub struct CastBuff {
    store: Arc<dyn CharacterStore>,
    selection: Arc<dyn SelectionPort>,
    apply: Arc<ApplyTransformation>,
}

impl CastBuff {
    pub fn new(
        store: Arc<dyn CharacterStore>,
        selection: Arc<dyn SelectionPort>,
        apply: Arc<ApplyTransformation>,
    ) -> Self {
        Self {
            store,
            selection,
            apply,
        }
    }

    /// Execute the cast buff use case.
    ///
    /// # Arguments
    /// * `kind` - Which buff to cast
    /// * `caster_level` - Only used by buffs that grant spell resistance
    ///
    /// # Returns
    /// * `Ok(EffectSnapshot)` - The buff is active and recorded
    /// * `Err(TransformError)` - Selection problem, conflict, or write failure
    pub async fn execute(
        &self,
        kind: BuffKind,
        caster_level: u8,
    ) -> Result<EffectSnapshot, TransformError> {
        let actor = selected_character(self.selection.as_ref(), self.store.as_ref()).await?;
        let plan = plan_buff(&actor, &kind.definition(), caster_level);
        debug!(
            character_id = %actor.id,
            buff = %kind,
            from = %actor.size,
            to = %plan.new_size,
            "Planned buff"
        );
        self.apply.execute(&actor, &plan).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use morphin_domain::{AbilityScores, CharacterRecord, CharacterId, SizeCategory};

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockCharacterStore, MockSelectionPort};

    fn cast_buff(store: MockCharacterStore, selection: MockSelectionPort) -> CastBuff {
        let store: Arc<dyn CharacterStore> = Arc::new(store);
        let apply = Arc::new(ApplyTransformation::new(
            store.clone(),
            Arc::new(FixedClock(Utc::now())),
        ));
        CastBuff::new(store, Arc::new(selection), apply)
    }

    #[tokio::test]
    async fn when_nothing_selected_then_returns_no_selection() {
        let mut selection = MockSelectionPort::new();
        selection.expect_selected().returning(Vec::new);

        let err = cast_buff(MockCharacterStore::new(), selection)
            .execute(BuffKind::EnlargePerson, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, TransformError::NoSelection));
    }

    #[tokio::test]
    async fn when_two_selected_then_returns_too_many() {
        let mut selection = MockSelectionPort::new();
        selection
            .expect_selected()
            .returning(|| vec![CharacterId::new(), CharacterId::new()]);

        let err = cast_buff(MockCharacterStore::new(), selection)
            .execute(BuffKind::EnlargePerson, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, TransformError::TooManySelected { count: 2 }));
    }

    #[tokio::test]
    async fn when_cast_then_size_steps_up() {
        let actor = CharacterRecord::new("Amiri", SizeCategory::Medium, AbilityScores::default());
        let id = actor.id;
        let mut selection = MockSelectionPort::new();
        selection.expect_selected().returning(move || vec![id]);
        let mut store = MockCharacterStore::new();
        store
            .expect_get()
            .returning(move |_| Ok(Some(actor.clone())));
        store
            .expect_create_items()
            .returning(|_, items| Ok(items.iter().map(|i| i.id).collect()));
        store
            .expect_update()
            .withf(|_, patch| patch.size == Some(SizeCategory::Large))
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_update()
            .withf(|_, patch| patch.snapshot.is_some())
            .times(1)
            .returning(|_, _| Ok(()));

        let snapshot = cast_buff(store, selection)
            .execute(BuffKind::EnlargePerson, 1)
            .await
            .unwrap();
        assert_eq!(snapshot.size, SizeCategory::Medium);
        assert_eq!(snapshot.source, "Enlarge Person");
    }
}
