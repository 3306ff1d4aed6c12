//! In-memory storage backend
//!
//! All four tables live behind one `RwLock`: every operation is atomic and
//! writes are serialized, which is what the cascade delete's children-first
//! ordering needs so that no reader ever observes a blog gone while its
//! comments remain. The lock is never held across an await point.
//!
//! Tables are `IndexMap`s keyed by identifier: scan order is insertion
//! order, and removals keep the survivors' order intact.

use crate::core::error::StoreError;
use crate::core::resource::{Owned, Resource};
use crate::entities::{Blog, Comment, Employee, Student};
use crate::storage::{OwnedStore, Store};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::marker::PhantomData;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// One table per entity kind.
#[derive(Debug, Default)]
pub struct Tables {
    students: IndexMap<Uuid, Student>,
    employees: IndexMap<Uuid, Employee>,
    blogs: IndexMap<Uuid, Blog>,
    comments: IndexMap<Uuid, Comment>,
}

/// Maps an entity kind onto its table.
pub trait HasTable<T: Resource> {
    fn table(&self) -> &IndexMap<Uuid, T>;
    fn table_mut(&mut self) -> &mut IndexMap<Uuid, T>;
}

macro_rules! has_table {
    ($kind:ty, $field:ident) => {
        impl HasTable<$kind> for Tables {
            fn table(&self) -> &IndexMap<Uuid, $kind> {
                &self.$field
            }

            fn table_mut(&mut self) -> &mut IndexMap<Uuid, $kind> {
                &mut self.$field
            }
        }
    };
}

has_table!(Student, students);
has_table!(Employee, employees);
has_table!(Blog, blogs);
has_table!(Comment, comments);

/// Shared in-memory database handle.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A typed handle onto one kind's table. Handles share the same lock,
    /// however many are created.
    pub fn collection<T>(&self) -> MemoryCollection<T>
    where
        T: Resource,
        Tables: HasTable<T>,
    {
        MemoryCollection {
            tables: Arc::clone(&self.tables),
            _kind: PhantomData,
        }
    }
}

/// [`Store`] implementation for one kind over the shared tables.
pub struct MemoryCollection<T> {
    tables: Arc<RwLock<Tables>>,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Clone for MemoryCollection<T> {
    fn clone(&self) -> Self {
        Self {
            tables: Arc::clone(&self.tables),
            _kind: PhantomData,
        }
    }
}

impl<T> MemoryCollection<T> {
    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

#[async_trait]
impl<T> Store<T> for MemoryCollection<T>
where
    T: Resource,
    Tables: HasTable<T>,
{
    async fn scan(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.read()?.table().values().cloned().collect())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>, StoreError> {
        Ok(self.read()?.table().get(id).cloned())
    }

    async fn insert(&self, entity: T) -> Result<T, StoreError> {
        self.write()?.table_mut().insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: &Uuid, entity: T) -> Result<Option<T>, StoreError> {
        let mut tables = self.write()?;
        if !tables.table().contains_key(id) {
            return Ok(None);
        }
        tables.table_mut().insert(*id, entity.clone());
        Ok(Some(entity))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, StoreError> {
        // shift_remove keeps the insertion order of the survivors
        Ok(self.write()?.table_mut().shift_remove(id).is_some())
    }
}

#[async_trait]
impl<T> OwnedStore<T> for MemoryCollection<T>
where
    T: Owned,
    Tables: HasTable<T>,
{
    async fn list_by_owner(&self, owner: &Uuid) -> Result<Vec<T>, StoreError> {
        Ok(self
            .read()?
            .table()
            .values()
            .filter(|child| child.owner_id() == *owner)
            .cloned()
            .collect())
    }

    async fn delete_by_owner(&self, owner: &Uuid) -> Result<u64, StoreError> {
        let mut tables = self.write()?;
        let before = tables.table().len();
        tables.table_mut().retain(|_, child| child.owner_id() != *owner);
        Ok((before - tables.table().len()) as u64)
    }
}
