//! Declarative field schemas driving input validation
//!
//! Each entity kind declares its closed field set once; the generic check
//! here rejects unknown fields, enforces required fields on the create
//! path, and type-checks whatever was supplied. Serializers run the check
//! first and can then extract fields without re-validating.

use crate::core::error::ValidationFailure;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Semantic type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    /// Reference to another entity, carried as a UUID string.
    Reference,
    /// Embedded list of related entities; only ever rendered, never read
    /// from input.
    Nested,
}

impl FieldType {
    fn check(&self, value: &Value) -> Result<(), &'static str> {
        match self {
            FieldType::Text => value.as_str().map(|_| ()).ok_or("must be a string"),
            FieldType::Integer => value.as_i64().map(|_| ()).ok_or("must be an integer"),
            FieldType::Reference => value
                .as_str()
                .filter(|s| Uuid::parse_str(s).is_ok())
                .map(|_| ())
                .ok_or("must be a valid identifier"),
            FieldType::Nested => value.as_array().map(|_| ()).ok_or("must be a list"),
        }
    }
}

/// One field declaration.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
    /// Server-managed or computed; tolerated but ignored in input.
    pub read_only: bool,
}

impl FieldDef {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: true,
            read_only: false,
        }
    }

    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
            read_only: false,
        }
    }

    pub const fn read_only(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
            read_only: true,
        }
    }
}

/// How strictly a payload is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Create path: every required field must be present.
    Create,
    /// Update path: supplied fields overlay the existing entity.
    Patch,
}

/// The closed field set of one entity kind.
#[derive(Debug)]
pub struct Schema {
    pub kind: &'static str,
    pub fields: &'static [FieldDef],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check a payload against the schema.
    ///
    /// Unknown keys are field errors. Read-only keys are ignored, so a
    /// client may echo back a rendered entity (identifier included) without
    /// being rejected. Null clears an optional field and is an error on a
    /// required one.
    pub fn check(
        &self,
        payload: &Map<String, Value>,
        mode: InputMode,
    ) -> Result<(), ValidationFailure> {
        let mut failure = ValidationFailure::new();

        for (key, value) in payload {
            let Some(field) = self.field(key) else {
                failure.push(key.clone(), "unknown field");
                continue;
            };
            if field.read_only {
                continue;
            }
            if value.is_null() {
                if field.required {
                    failure.push(key.clone(), "may not be null");
                }
                continue;
            }
            if let Err(message) = field.ty.check(value) {
                failure.push(key.clone(), message);
            }
        }

        if mode == InputMode::Create {
            for field in self.fields.iter().filter(|f| f.required && !f.read_only) {
                if !payload.contains_key(field.name) {
                    failure.push(field.name, "is required");
                }
            }
        }

        failure.into_result(())
    }
}

/// Extract a text field from a checked payload.
pub fn text(payload: &Map<String, Value>, name: &str) -> Option<String> {
    payload.get(name).and_then(Value::as_str).map(str::to_owned)
}

/// Extract an integer field from a checked payload.
pub fn integer(payload: &Map<String, Value>, name: &str) -> Option<i64> {
    payload.get(name).and_then(Value::as_i64)
}

/// Extract a reference field from a checked payload.
pub fn reference(payload: &Map<String, Value>, name: &str) -> Option<Uuid> {
    payload
        .get(name)
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
}
