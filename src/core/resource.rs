//! Resource traits defining the contract every entity kind fulfils

use crate::core::field::FieldValue;
use crate::core::filter::FilterSpec;
use crate::core::schema::Schema;
use serde::Serialize;
use uuid::Uuid;

/// A uniquely identified record of a given kind.
///
/// The associated statics describe the kind: its names, its closed field
/// set and its filter table. The methods expose one instance to the
/// generic controller and the filter engine. Implementations are plain
/// data and must stay cheap to clone.
pub trait Resource: Clone + Serialize + Send + Sync + 'static {
    /// Singular kind name (e.g. "student").
    fn kind() -> &'static str;

    /// Plural resource name used as the URL segment (e.g. "students").
    fn plural() -> &'static str;

    /// Closed field set used to validate input payloads.
    fn schema() -> &'static Schema;

    /// Declarative filter table consumed by the filter engine.
    fn filters() -> &'static [FilterSpec] {
        &[]
    }

    /// Storage identifier, unique and immutable once assigned.
    fn id(&self) -> Uuid;

    /// Dynamic field access for filtering.
    ///
    /// `None` means the field is absent on this instance; any predicate on
    /// it then matches nothing.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// A child kind owned by a parent entity through a required reference.
///
/// Ownership is what the cascade delete and nested rendering traverse:
/// deleting the parent removes every child whose [`owner_id`](Owned::owner_id)
/// matches.
pub trait Owned: Resource {
    /// Identifier of the owning parent.
    fn owner_id(&self) -> Uuid;
}
