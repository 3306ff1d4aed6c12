//! Polymorphic field values consumed by the filter engine

use std::borrow::Cow;
use uuid::Uuid;

/// A dynamically typed view of a single entity field.
///
/// Entities expose their filterable fields through
/// [`Resource::field`](crate::core::resource::Resource::field); the filter
/// engine compares the string form of whatever comes back.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Reference(Uuid),
}

impl FieldValue {
    /// String form used for comparison and range ordering.
    ///
    /// References use the canonical hyphenated UUID form, the same form they
    /// render with, so exact filters on reference fields behave intuitively.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s),
            FieldValue::Integer(i) => Cow::Owned(i.to_string()),
            FieldValue::Reference(id) => Cow::Owned(id.to_string()),
        }
    }
}
