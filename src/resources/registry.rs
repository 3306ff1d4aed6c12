//! Resource registry mapping kinds to their route builders

use axum::Router;
use indexmap::IndexMap;

/// Describes one resource kind's place in the HTTP surface.
pub trait ResourceDescriptor: Send + Sync {
    /// Singular kind name (e.g. "student").
    fn kind(&self) -> &str;

    /// Plural URL segment (e.g. "students").
    fn plural(&self) -> &str;

    /// Build the CRUD routes for this kind.
    fn build_routes(&self) -> Router;
}

/// Registry of every resource exposed by the service, keyed by kind.
#[derive(Default)]
pub struct ResourceRegistry {
    descriptors: IndexMap<String, Box<dyn ResourceDescriptor>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor. A later descriptor for the same kind replaces
    /// the earlier one.
    pub fn register(&mut self, descriptor: Box<dyn ResourceDescriptor>) {
        self.descriptors
            .insert(descriptor.kind().to_string(), descriptor);
    }

    /// Merge every resource's routes into one router, in registration order.
    pub fn build_routes(&self) -> Router {
        let mut router = Router::new();
        for descriptor in self.descriptors.values() {
            router = router.merge(descriptor.build_routes());
        }
        router
    }

    /// All registered kind names, in registration order.
    pub fn kinds(&self) -> Vec<&str> {
        self.descriptors.keys().map(String::as_str).collect()
    }
}
