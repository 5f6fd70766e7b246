//! Error types for port operations.

/// Failures from a character store.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A SQLite call failed; `operation` names the store method.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// A stored character document did not round-trip through JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors from the token image folder.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ImageLookupError {
    #[error("Image folder {path} is not readable; the engine needs permission to browse it")]
    Forbidden { path: String },
    #[error("Image folder {path} could not be read: {message}")]
    Io { path: String, message: String },
}
