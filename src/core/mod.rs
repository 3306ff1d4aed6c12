//! Fundamental types and contracts shared across the service

pub mod error;
pub mod field;
pub mod filter;
pub mod page;
pub mod resource;
pub mod schema;
pub mod serializer;

pub use error::{ApiError, ConfigError, StoreError, ValidationFailure};
pub use field::FieldValue;
pub use filter::{Criteria, FilterKind, FilterSet, FilterSpec};
pub use page::{Page, PageMeta, PageRequest, Pager};
pub use resource::{Owned, Resource};
pub use schema::{FieldDef, FieldType, InputMode, Schema};
pub use serializer::{Payload, ResourceSerializer};
