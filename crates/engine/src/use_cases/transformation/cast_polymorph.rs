//! Cast a polymorph spell on the selected character.

use std::sync::Arc;

use morphin_domain::{plan_polymorph, Catalog, EffectSnapshot, Localize, SpecialEffectTable};
use tracing::{debug, warn};

use crate::infrastructure::ports::{
    CharacterStore, ImageLookupError, ImageLookupPort, SelectionPort,
};

use super::apply::ApplyTransformation;
use super::error::TransformError;
use super::{resolve_form, selected_character, PolymorphRequest};

/// Token switching depends on the engine being allowed to list the folder.
const IMAGE_FOLDER_HINT: &str =
    "To enable token image switching, the engine needs permission to browse the image folder";

fn lookup_warning(error: &ImageLookupError) -> String {
    format!(
        "Token image lookup failed, keeping current image: {}. {}",
        error, IMAGE_FOLDER_HINT
    )
}

/// Cast polymorph use case.
///
/// Orchestrates: selection, form lookup and gating, token image lookup,
/// planning, and the apply sequence.
pub struct CastPolymorph {
    store: Arc<dyn CharacterStore>,
    selection: Arc<dyn SelectionPort>,
    catalog: Arc<Catalog>,
    images: Option<Arc<dyn ImageLookupPort>>,
    labels: Arc<dyn Localize>,
    effects: Arc<dyn SpecialEffectTable>,
    apply: Arc<ApplyTransformation>,
}

impl CastPolymorph {
    pub fn new(
        store: Arc<dyn CharacterStore>,
        selection: Arc<dyn SelectionPort>,
        catalog: Arc<Catalog>,
        images: Option<Arc<dyn ImageLookupPort>>,
        labels: Arc<dyn Localize>,
        effects: Arc<dyn SpecialEffectTable>,
        apply: Arc<ApplyTransformation>,
    ) -> Self {
        Self {
            store,
            selection,
            catalog,
            images,
            labels,
            effects,
            apply,
        }
    }

    /// Execute the cast polymorph use case.
    ///
    /// # Arguments
    /// * `request` - Spell kind, level, form name, and optional source label
    ///
    /// # Returns
    /// * `Ok(EffectSnapshot)` - The form is assumed and recorded
    /// * `Err(TransformError::UnknownForm)` - No catalog form has that name
    /// * `Err(TransformError::FormNotAllowed)` - The level does not permit the form
    pub async fn execute(&self, request: &PolymorphRequest) -> Result<EffectSnapshot, TransformError> {
        let actor = selected_character(self.selection.as_ref(), self.store.as_ref()).await?;
        let resolved = resolve_form(&self.catalog, self.labels.as_ref(), request, actor.size)?;
        debug!(
            character_id = %actor.id,
            form = %resolved.form_name,
            kind = %request.kind,
            level = request.level,
            attacks = resolved.attacks.len(),
            special_attacks = resolved.special_attacks.len(),
            senses = resolved.senses.len(),
            "Resolved form"
        );

        let image = self.token_image(&resolved.form_name).await;
        let plan = plan_polymorph(
            &actor,
            &resolved,
            request.source.as_deref(),
            self.effects.as_ref(),
        )
        .with_token_image(image);
        self.apply.execute(&actor, &plan).await
    }

    async fn token_image(&self, form_name: &str) -> Option<String> {
        let images = self.images.as_ref()?;
        match images.find_image(form_name).await {
            Ok(image) => image,
            Err(e) => {
                warn!(form = %form_name, "{}", lookup_warning(&e));
                None
            }
        }
    }
}
