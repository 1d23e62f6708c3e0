//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! The stores are generic over these so tests can swap in failing backends.

use async_trait::async_trait;
use crate::domain::{DomainResult, Entity, PlaintextCredentials, User};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert a new entity; the backend assigns the ID
    async fn create(&self, draft: &T::Draft) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities in insertion order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Replace an existing entity (`NotFound` if no row has its ID)
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID (`NotFound` if no row has that ID)
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Lookup and insert of user rows
///
/// Plain-text credential matching; see `domain::user`.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// First row of the user table, if any
    async fn first_user(&self) -> DomainResult<Option<User>>;

    /// Row whose email and password both match exactly
    async fn find_by_credentials(&self, credentials: &PlaintextCredentials) -> DomainResult<Option<User>>;

    /// Insert unconditionally (no uniqueness check on email)
    async fn insert(&self, credentials: &PlaintextCredentials) -> DomainResult<User>;
}
