//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Only deterministic failures belong here. Transport and parsing concerns
/// live in the client crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A requested product is not part of the catalog.
    #[error("product not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
