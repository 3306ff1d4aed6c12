//! HTTP server: REST exposure and application wiring

pub mod builder;
pub mod rest;

pub use builder::AppBuilder;
pub use rest::RestResource;
