//! Unified error types for the domain layer
//!
//! The wound engine never surfaces these to the host; they travel inside
//! degraded results and log lines. The migrator returns them directly.

use thiserror::Error;

use crate::wounds::WoundLevel;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., a document that is not a JSON object)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A wound tier required by a calculation is absent from the table
    #[error("Wound level missing from table: {0}")]
    MissingWoundLevel(WoundLevel),

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for malformed input.
    ///
    /// # Example
    /// ```ignore
    /// if !doc.is_object() {
    ///     return Err(DomainError::validation("actor document must be an object"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create a missing wound level error
    pub fn missing_level(level: WoundLevel) -> Self {
        Self::MissingWoundLevel(level)
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
