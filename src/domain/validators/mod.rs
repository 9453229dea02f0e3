//! Declarative validation for domain entities.
//!
//! Validators are pure functions over a candidate prop set. They never mutate
//! anything; entities call them before every state change and only assign
//! when validation passes.

pub mod link_validator;

pub use link_validator::{LinkValidator, SHORT_CODE_MAX_LENGTH};

use std::collections::BTreeMap;

/// Violations grouped by field, each field holding its messages in order.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Raised when an entity prop set breaks one or more field rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Entity validation failed")]
pub struct EntityValidationError {
    errors: FieldErrors,
}

impl EntityValidationError {
    pub fn new(errors: FieldErrors) -> Self {
        Self { errors }
    }

    /// Returns the `field -> [messages]` map.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }
}
