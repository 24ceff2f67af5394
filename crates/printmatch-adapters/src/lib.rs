//! Infrastructure adapters for printmatch.
//!
//! This crate implements the ports defined in `printmatch-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod catalog;
pub mod listener;
pub mod print_files;
pub mod store;

// Re-export commonly used adapters
pub use catalog::{Catalog, CatalogManifest};
pub use listener::TracingListener;
pub use print_files::{InMemoryFileStore, LocalFileStore};
pub use store::{InMemoryVariantStore, JsonVariantStore};
