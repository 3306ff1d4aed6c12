//! The generic CRUD controller
//!
//! One controller per entity kind composes the filter engine, the pager,
//! the serializer and the storage collaborator. It is the only component
//! that mutates storage; everything below it returns plain values, and
//! every outcome (success, validation rejection, not-found) travels up as
//! a `Result` for the REST layer to translate.

use crate::core::error::{ApiError, StoreError};
use crate::core::filter::{Criteria, FilterSet};
use crate::core::page::{Page, PageRequest, Pager};
use crate::core::resource::{Owned, Resource};
use crate::core::serializer::{Payload, ResourceSerializer};
use crate::storage::{OwnedStore, Store};
use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Deletes dependent children ahead of their parent.
#[async_trait]
pub trait CascadeHook: Send + Sync {
    async fn delete_children(&self, parent: &Uuid) -> Result<u64, StoreError>;
}

/// Cascade over any owned child collection.
pub struct DependentChildren<C: Owned> {
    store: Arc<dyn OwnedStore<C>>,
}

impl<C: Owned> DependentChildren<C> {
    pub fn new(store: Arc<dyn OwnedStore<C>>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<C: Owned> CascadeHook for DependentChildren<C> {
    async fn delete_children(&self, parent: &Uuid) -> Result<u64, StoreError> {
        self.store.delete_by_owner(parent).await
    }
}

/// Uniform CRUD over one entity kind.
pub struct ResourceController<T: Resource> {
    store: Arc<dyn Store<T>>,
    serializer: Arc<dyn ResourceSerializer<T>>,
    pager: Pager,
    cascade: Option<Arc<dyn CascadeHook>>,
}

impl<T: Resource> ResourceController<T> {
    pub fn new(
        store: Arc<dyn Store<T>>,
        serializer: Arc<dyn ResourceSerializer<T>>,
        pager: Pager,
    ) -> Self {
        Self {
            store,
            serializer,
            pager,
            cascade: None,
        }
    }

    /// Declare dependent children to be removed ahead of this kind's
    /// entities on delete.
    pub fn with_cascade(mut self, hook: Arc<dyn CascadeHook>) -> Self {
        self.cascade = Some(hook);
        self
    }

    /// Scan, filter, paginate, render. Total for any input: unknown filter
    /// names and malformed values degrade instead of failing.
    pub async fn list(
        &self,
        criteria: &Criteria,
        request: PageRequest,
    ) -> Result<Page<Value>, ApiError> {
        let all = self.store.scan().await?;
        let kept = FilterSet::compile(T::filters(), criteria).apply(all);
        let page = self.pager.paginate(kept, request);
        tracing::debug!(
            kind = T::kind(),
            total = page.pagination.total,
            page = page.pagination.page,
            "list"
        );
        let data = try_join_all(
            page.data
                .iter()
                .map(|entity| self.serializer.render(entity)),
        )
        .await?;
        Ok(Page {
            data,
            pagination: page.pagination,
        })
    }

    pub async fn create(&self, payload: Value) -> Result<Value, ApiError> {
        let payload = as_object(&payload)?;
        let entity = self.serializer.build(payload).await?;
        let stored = self.store.insert(entity).await?;
        tracing::info!(kind = T::kind(), id = %stored.id(), "created");
        self.serializer.render(&stored).await
    }

    pub async fn retrieve(&self, id: Uuid) -> Result<Value, ApiError> {
        let entity = self
            .store
            .get(&id)
            .await?
            .ok_or_else(|| ApiError::not_found(T::kind(), id))?;
        self.serializer.render(&entity).await
    }

    /// Merge semantics: supplied fields overlay the stored entity, the
    /// identifier stays what it was.
    pub async fn update(&self, id: Uuid, payload: Value) -> Result<Value, ApiError> {
        let payload = as_object(&payload)?;
        let existing = self
            .store
            .get(&id)
            .await?
            .ok_or_else(|| ApiError::not_found(T::kind(), id))?;
        let merged = self.serializer.merge(&existing, payload).await?;
        let stored = self
            .store
            .update(&id, merged)
            .await?
            .ok_or_else(|| ApiError::not_found(T::kind(), id))?;
        tracing::info!(kind = T::kind(), id = %id, "updated");
        self.serializer.render(&stored).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        if self.store.get(&id).await?.is_none() {
            return Err(ApiError::not_found(T::kind(), id));
        }
        // children first: no interleaved read may see the parent gone
        // while its children remain
        if let Some(cascade) = &self.cascade {
            let removed = cascade.delete_children(&id).await?;
            tracing::debug!(kind = T::kind(), id = %id, children = removed, "cascade delete");
        }
        self.store.delete(&id).await?;
        tracing::info!(kind = T::kind(), id = %id, "deleted");
        Ok(())
    }
}

fn as_object(payload: &Value) -> Result<&Payload, ApiError> {
    payload
        .as_object()
        .ok_or_else(|| ApiError::invalid_body("expected a JSON object"))
}
