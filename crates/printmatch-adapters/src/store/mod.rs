//! Variant store adapters.

mod json;
mod memory;

pub use json::JsonVariantStore;
pub use memory::InMemoryVariantStore;
