//! Application state and composition.

use std::sync::Arc;

use morphin_domain::{Catalog, Localize, SpecialEffectTable, StandardEffects};

use crate::infrastructure::ports::{CharacterStore, ClockPort, ImageLookupPort, SelectionPort};
use crate::use_cases::transformation::{
    ApplyTransformation, CastBuff, CastPolymorph, FormOps, RevertTransformation,
};
use crate::use_cases::TransformationUseCases;

/// Main application state.
pub struct App {
    pub store: Arc<dyn CharacterStore>,
    pub catalog: Arc<Catalog>,
    pub labels: Arc<dyn Localize>,
    pub use_cases: TransformationUseCases,
}

impl App {
    pub fn new(
        store: Arc<dyn CharacterStore>,
        selection: Arc<dyn SelectionPort>,
        images: Option<Arc<dyn ImageLookupPort>>,
        labels: Arc<dyn Localize>,
        clock: Arc<dyn ClockPort>,
        catalog: Arc<Catalog>,
    ) -> Self {
        let effects: Arc<dyn SpecialEffectTable> = Arc::new(StandardEffects);
        let apply = Arc::new(ApplyTransformation::new(store.clone(), clock));

        let use_cases = TransformationUseCases::new(
            Arc::new(FormOps::new(catalog.clone(), store.clone(), labels.clone())),
            Arc::new(CastBuff::new(store.clone(), selection.clone(), apply.clone())),
            Arc::new(CastPolymorph::new(
                store.clone(),
                selection.clone(),
                catalog.clone(),
                images,
                labels.clone(),
                effects,
                apply,
            )),
            Arc::new(RevertTransformation::new(store.clone())),
            selection,
        );

        Self {
            store,
            catalog,
            labels,
            use_cases,
        }
    }
}
