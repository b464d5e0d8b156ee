//! Namespace resolution and the optional YAML configuration of the binary.

pub mod loader;
pub mod namespace;
pub mod settings;

pub use namespace::{resolve_namespace, resolve_namespace_with, Namespace, NamespaceOrigin};
