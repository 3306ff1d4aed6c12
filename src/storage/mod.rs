//! Storage collaborators: abstract queryable collections per entity kind
//!
//! The controller is the only caller of the mutating methods. Backends must
//! make each operation atomic with respect to concurrent callers; the
//! cascade delete relies on that, paired with its children-first ordering.

pub mod memory;

pub use memory::{MemoryCollection, MemoryStore};

use crate::core::error::StoreError;
use crate::core::resource::{Owned, Resource};
use async_trait::async_trait;
use uuid::Uuid;

/// Abstract mutable collection for one entity kind.
#[async_trait]
pub trait Store<T: Resource>: Send + Sync {
    /// Every entity of the kind, in a stable order (insertion order for the
    /// in-memory backend).
    async fn scan(&self) -> Result<Vec<T>, StoreError>;

    /// Lookup by identifier.
    async fn get(&self, id: &Uuid) -> Result<Option<T>, StoreError>;

    /// Store a new entity under its own identifier.
    async fn insert(&self, entity: T) -> Result<T, StoreError>;

    /// Replace the entity stored under `id`; `None` when absent.
    async fn update(&self, id: &Uuid, entity: T) -> Result<Option<T>, StoreError>;

    /// Remove by identifier; whether anything was removed.
    async fn delete(&self, id: &Uuid) -> Result<bool, StoreError>;
}

/// Foreign-key operations over a child collection, used for nested
/// rendering and cascade deletes.
#[async_trait]
pub trait OwnedStore<T: Owned>: Store<T> {
    /// Children owned by `owner`, in scan order.
    async fn list_by_owner(&self, owner: &Uuid) -> Result<Vec<T>, StoreError>;

    /// Remove every child owned by `owner`; returns how many were removed.
    async fn delete_by_owner(&self, owner: &Uuid) -> Result<u64, StoreError>;
}
