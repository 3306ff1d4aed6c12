//! Serializer contract: transport values in and out of entities

use crate::core::error::ApiError;
use crate::core::resource::Resource;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Transport payload: the fields of one JSON object.
pub type Payload = Map<String, Value>;

/// Converts between entities and transport values, validating on the way in.
///
/// Implementations never persist anything; the resource controller owns
/// every write. The methods are async because reference checks on the way
/// in, and nested rendering on the way out, consult the storage
/// collaborator.
///
/// Validation failures surface as [`ApiError::Validation`], a recoverable
/// value rather than a fault; storage trouble during a reference check
/// keeps its own variant so it is not misreported as the caller's mistake.
#[async_trait]
pub trait ResourceSerializer<T: Resource>: Send + Sync {
    /// Validate a payload and build a new entity with a fresh identifier.
    async fn build(&self, payload: &Payload) -> Result<T, ApiError>;

    /// Overlay supplied fields onto a clone of `existing`.
    ///
    /// Unsupplied fields, the identifier and the creation timestamp are
    /// left unchanged.
    async fn merge(&self, existing: &T, payload: &Payload) -> Result<T, ApiError>;

    /// Render an entity to its transport value. The default is plain serde;
    /// kinds with embedded children override it.
    async fn render(&self, entity: &T) -> Result<Value, ApiError> {
        serde_json::to_value(entity).map_err(|e| ApiError::Internal(e.to_string()))
    }
}
