//! # portal
//!
//! A REST service exposing database-backed records (students, employees,
//! blogs and comments) through a uniform CRUD surface with field
//! filtering, range queries, pagination and nested parent/child
//! serialization.
//!
//! Everything entity-specific is declarative: each kind brings a schema
//! (its closed field set), a filter table and a thin serializer. The
//! controller, filter engine, pager and route surface are shared:
//!
//! - [`core`]: filter engine, pager, schemas, serializer contract, errors
//! - [`entities`]: the four record kinds and their serializers
//! - [`storage`]: the queryable-collection traits and the in-memory backend
//! - [`resources`]: the generic CRUD controller and the resource registry
//! - [`server`]: REST exposure and application wiring
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use portal::prelude::*;
//!
//! let app = AppBuilder::new(AppConfig::default()).build();
//! // axum::serve(listener, app)...
//! ```
//!
//! List queries combine filtering and pagination:
//!
//! ```text
//! GET /employees?designation=manager&id_min=EMP003&id_max=EMP005&page=1&limit=10
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod resources;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::core::error::{ApiError, StoreError, ValidationFailure};
    pub use crate::core::field::FieldValue;
    pub use crate::core::filter::{Criteria, FilterKind, FilterSet, FilterSpec};
    pub use crate::core::page::{Page, PageMeta, PageRequest, Pager};
    pub use crate::core::resource::{Owned, Resource};
    pub use crate::core::schema::{FieldDef, FieldType, InputMode, Schema};
    pub use crate::core::serializer::{Payload, ResourceSerializer};
    pub use crate::entities::{Blog, Comment, Employee, Student};
    pub use crate::resources::controller::{CascadeHook, ResourceController};
    pub use crate::resources::registry::{ResourceDescriptor, ResourceRegistry};
    pub use crate::server::builder::AppBuilder;
    pub use crate::storage::{MemoryStore, OwnedStore, Store};
}
