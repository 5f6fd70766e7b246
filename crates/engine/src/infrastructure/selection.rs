//! Selection adapters.

use morphin_domain::CharacterId;

use crate::infrastructure::ports::SelectionPort;

/// A selection fixed at construction, e.g. from a command-line argument.
#[derive(Debug, Clone, Default)]
pub struct FixedSelection {
    ids: Vec<CharacterId>,
}

impl FixedSelection {
    pub fn new(ids: Vec<CharacterId>) -> Self {
        Self { ids }
    }

    pub fn single(id: CharacterId) -> Self {
        Self { ids: vec![id] }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl SelectionPort for FixedSelection {
    fn selected(&self) -> Vec<CharacterId> {
        self.ids.clone()
    }
}
