//! Filter engine: declarative specs compiled into predicates
//!
//! Each entity kind declares a filter table (query parameter name, target
//! field, behavior) and the engine compiles the caller's criteria against
//! it into a predicate list evaluated uniformly. Unknown parameter names
//! are dropped; every supplied predicate must match (conjunction).
//!
//! Filtering is a pure function over its arguments: it consumes the input
//! collection and returns the survivors in their original relative order.

use crate::core::resource::Resource;
use indexmap::IndexMap;

/// Caller-supplied criteria: filter name to values, in query order.
///
/// A repeated name accumulates values; each value becomes its own conjunct.
pub type Criteria = IndexMap<String, Vec<String>>;

/// Behavior of one filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Field equals the value, case-insensitive.
    EqualsIgnoreCase,
    /// Field contains the value, case-insensitive.
    ContainsIgnoreCase,
    /// Field is at least the value, lexicographic on the string form.
    AtLeast,
    /// Field is at most the value, lexicographic on the string form.
    AtMost,
}

/// One row of an entity kind's filter table.
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
    /// Query parameter name (e.g. "id_min").
    pub param: &'static str,
    /// Entity field the predicate reads (e.g. "emp_id").
    pub field: &'static str,
    pub kind: FilterKind,
}

impl FilterSpec {
    pub const fn new(param: &'static str, field: &'static str, kind: FilterKind) -> Self {
        Self { param, field, kind }
    }
}

#[derive(Debug)]
struct Predicate {
    field: &'static str,
    kind: FilterKind,
    value: String,
}

impl Predicate {
    /// An absent field matches nothing: predicates fail closed instead of
    /// erroring on values they cannot compare.
    fn matches<T: Resource>(&self, item: &T) -> bool {
        let Some(value) = item.field(self.field) else {
            return false;
        };
        let text = value.as_text();
        match self.kind {
            FilterKind::EqualsIgnoreCase => text.to_lowercase() == self.value.to_lowercase(),
            FilterKind::ContainsIgnoreCase => {
                text.to_lowercase().contains(&self.value.to_lowercase())
            }
            FilterKind::AtLeast => text.as_ref() >= self.value.as_str(),
            FilterKind::AtMost => text.as_ref() <= self.value.as_str(),
        }
    }
}

/// The compiled predicate list for one request.
#[derive(Debug, Default)]
pub struct FilterSet {
    predicates: Vec<Predicate>,
}

impl FilterSet {
    /// Compile criteria against a filter table.
    ///
    /// Names with no matching table row are ignored, keeping list
    /// operations total no matter what the caller sends.
    pub fn compile(specs: &[FilterSpec], criteria: &Criteria) -> Self {
        let mut predicates = Vec::new();
        for (name, values) in criteria {
            let Some(spec) = specs.iter().find(|s| s.param == name.as_str()) else {
                continue;
            };
            for value in values {
                predicates.push(Predicate {
                    field: spec.field,
                    kind: spec.kind,
                    value: value.clone(),
                });
            }
        }
        Self { predicates }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Keep the entities matching every predicate, preserving order.
    pub fn apply<T: Resource>(&self, items: Vec<T>) -> Vec<T> {
        if self.predicates.is_empty() {
            return items;
        }
        items
            .into_iter()
            .filter(|item| self.predicates.iter().all(|p| p.matches(item)))
            .collect()
    }
}
