//! Transformation use cases.
//!
//! Casting a buff or polymorph, previewing forms, and reverting.

use std::sync::Arc;

use morphin_domain::{
    resolve_changes, BuffKind, Catalog, CharacterId, CharacterRecord, EffectSnapshot, Localize,
    ResolvedForm, SizeCategory, SpellKind,
};

use crate::infrastructure::ports::{CharacterStore, SelectionPort};

mod apply;
mod cast_buff;
mod cast_polymorph;
mod error;
mod forms;
mod revert;

#[cfg(test)]
mod round_trip_tests;

pub use apply::ApplyTransformation;
pub use cast_buff::CastBuff;
pub use cast_polymorph::CastPolymorph;
pub use error::TransformError;
pub use forms::FormOps;
pub use revert::RevertTransformation;

/// A polymorph into a named catalog form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolymorphRequest {
    pub kind: SpellKind,
    pub level: u8,
    pub form: String,
    /// Effect name, e.g. "Wild Shape". Defaults to the spell's name.
    pub source: Option<String>,
}

/// Any transformation the engine can apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformationRequest {
    Buff { kind: BuffKind, caster_level: u8 },
    Polymorph(PolymorphRequest),
}

/// Container for transformation use cases.
pub struct TransformationUseCases {
    pub forms: Arc<FormOps>,
    pub cast_buff: Arc<CastBuff>,
    pub cast_polymorph: Arc<CastPolymorph>,
    pub revert: Arc<RevertTransformation>,
    selection: Arc<dyn SelectionPort>,
}

impl TransformationUseCases {
    pub fn new(
        forms: Arc<FormOps>,
        cast_buff: Arc<CastBuff>,
        cast_polymorph: Arc<CastPolymorph>,
        revert: Arc<RevertTransformation>,
        selection: Arc<dyn SelectionPort>,
    ) -> Self {
        Self {
            forms,
            cast_buff,
            cast_polymorph,
            revert,
            selection,
        }
    }

    /// Apply `request` to the selected character.
    pub async fn transform(
        &self,
        request: &TransformationRequest,
    ) -> Result<EffectSnapshot, TransformError> {
        match request {
            TransformationRequest::Buff { kind, caster_level } => {
                self.cast_buff.execute(*kind, *caster_level).await
            }
            TransformationRequest::Polymorph(polymorph) => {
                self.cast_polymorph.execute(polymorph).await
            }
        }
    }

    /// Revert whatever transformation the selected character carries.
    pub async fn revert_selected(&self) -> Result<EffectSnapshot, TransformError> {
        let id = single_selection(self.selection.as_ref())?;
        self.revert.execute(id).await
    }
}

fn single_selection(selection: &dyn SelectionPort) -> Result<CharacterId, TransformError> {
    match selection.selected().as_slice() {
        [] => Err(TransformError::NoSelection),
        [id] => Ok(*id),
        ids => Err(TransformError::TooManySelected { count: ids.len() }),
    }
}

async fn selected_character(
    selection: &dyn SelectionPort,
    store: &dyn CharacterStore,
) -> Result<CharacterRecord, TransformError> {
    let id = single_selection(selection)?;
    store
        .get(id)
        .await?
        .ok_or(TransformError::CharacterNotFound)
}

/// Look up, validate, and gate the requested form for a caster of `actor_size`.
fn resolve_form(
    catalog: &Catalog,
    labels: &dyn Localize,
    request: &PolymorphRequest,
    actor_size: SizeCategory,
) -> Result<ResolvedForm, TransformError> {
    let form = catalog
        .get(&request.form)
        .ok_or_else(|| TransformError::UnknownForm(request.form.clone()))?;
    let level = request.kind.validate_level(request.level)?;
    if !request.kind.allows_form(level, form.family, form.size) {
        return Err(TransformError::FormNotAllowed {
            form: form.name.clone(),
            kind: request.kind,
            level,
        });
    }
    Ok(resolve_changes(form, request.kind, level, actor_size, labels)?)
}
