//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`ChainSenseError`] at the boundary (adapters own their error enums and
//! provide `From` impls into the `Storage` variant).

use thiserror::Error;

/// Top-level error for domain and application operations.
#[derive(Debug, Error)]
pub enum ChainSenseError {
    /// A domain invariant was violated.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// An adapter-level persistence failure.
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations. Always recoverable by correcting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A record name must not be empty.
    #[error("name must not be empty")]
    EmptyName,

    /// An automation needs at least one trigger condition.
    #[error("at least one condition is required")]
    NoConditions,

    /// A condition references an empty sensor field.
    #[error("condition sensor field must not be empty")]
    EmptySensorField,

    /// An automation must name the contract method it invokes.
    #[error("contract method must not be empty")]
    EmptyMethod,

    /// A contract must expose at least one callable method.
    #[error("at least one contract method is required")]
    NoMethods,

    /// A contract needs an on-chain address.
    #[error("contract address must not be empty")]
    EmptyAddress,

    /// A device must report at least one sensor field.
    #[error("at least one sensor field is required")]
    NoSensorFields,
}

/// A lookup by id found nothing.
#[derive(Debug, Clone, Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Human-readable record kind, e.g. `"Automation"`.
    pub entity: &'static str,
    /// The id that was looked up.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_wrap_validation_error_via_from() {
        let err: ChainSenseError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            ChainSenseError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_format_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Automation",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Automation abc not found");
    }

    #[test]
    fn should_format_validation_variant_through_top_level_error() {
        let err: ChainSenseError = ValidationError::NoConditions.into();
        assert_eq!(
            err.to_string(),
            "validation failed: at least one condition is required"
        );
    }
}
