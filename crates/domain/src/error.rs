//! Errors raised by the shapeshifting rules.
//!
//! Covers catalog loading, tag and key parsing, and level validation.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// An input the rules reject, such as a level outside the spell's range
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A character or item id that is not a UUID
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Catalog data that contradicts itself, such as a duplicated form
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// An unknown size, sense, damage type, or special key
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Rejects an input the rules do not accept.
    ///
    /// # Example
    /// ```ignore
    /// if !(1..=kind.max_level()).contains(&level) {
    ///     return Err(DomainError::validation("Beast Shape level must be 1-4"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Used by `FromStr` impls and catalog loading when a key names nothing known.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_the_problem() {
        let err = DomainError::validation("level must be 1-4");
        assert_eq!(err.to_string(), "Validation failed: level must be 1-4");
    }

    #[test]
    fn duplicate_form_is_a_constraint_violation() {
        let err = DomainError::constraint("Duplicate form in catalog: Wolf");
        assert!(matches!(err, DomainError::Constraint(_)));
        assert!(err.to_string().ends_with("Wolf"));
    }

    #[test]
    fn parse_error_keeps_the_input() {
        let err = DomainError::parse("Unknown special ability: laser");
        assert!(err.to_string().contains("laser"));
    }
}
