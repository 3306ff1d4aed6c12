//! Generic resource machinery: the CRUD controller and the registry

pub mod controller;
pub mod registry;

pub use controller::{CascadeHook, DependentChildren, ResourceController};
pub use registry::{ResourceDescriptor, ResourceRegistry};
