//! Transformation errors.

use morphin_domain::{DomainError, SpellKind};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur while applying or reverting a transformation.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("No owned character is selected")]
    NoSelection,
    #[error("{count} characters are selected; select only one")]
    TooManySelected { count: usize },
    #[error("Character not found")]
    CharacterNotFound,
    #[error("Character is already transformed by {effect}")]
    AlreadyTransformed { effect: String },
    #[error("{name} is not transformed")]
    NotTransformed { name: String },
    #[error("Unknown form: {0}")]
    UnknownForm(String),
    #[error("{form} is not a valid {kind} {level} form")]
    FormNotAllowed {
        form: String,
        kind: SpellKind,
        level: u8,
    },
    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl TransformError {
    /// Localization key for errors shown to the user as warnings.
    pub fn warning_key(&self) -> Option<&'static str> {
        match self {
            Self::NoSelection => Some("Warnings.NoSelection"),
            Self::TooManySelected { .. } => Some("Warnings.TooManySelected"),
            Self::AlreadyTransformed { .. } => Some("Warnings.AlreadyTransformed"),
            Self::NotTransformed { .. } => Some("Warnings.NotTransformed"),
            _ => None,
        }
    }
}
