//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all persisted records.
//! Every entity has a store-assigned ID and an id-less draft form used on insert.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync;

    /// The entity before the backing store has assigned it an ID
    type Draft: Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid email or password")]
    AuthFailed,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database not initialized")]
    NotInitialized,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// True for failures of the durable layer (as opposed to lookup misses or bad input)
    pub fn is_storage(&self) -> bool {
        matches!(self, DomainError::Storage(_) | DomainError::NotInitialized)
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::InvalidInput(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_classification() {
        assert!(DomainError::Storage("disk full".into()).is_storage());
        assert!(DomainError::NotInitialized.is_storage());
        assert!(!DomainError::AuthFailed.is_storage());
        assert!(!DomainError::NotFound("entry 1".into()).is_storage());
    }

    #[test]
    fn test_display() {
        let err = DomainError::Storage("database is locked".into());
        assert_eq!(err.to_string(), "Storage error: database is locked");
    }
}
