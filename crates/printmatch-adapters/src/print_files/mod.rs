//! Print-file store adapters.

mod local;
mod memory;

pub use local::LocalFileStore;
pub use memory::InMemoryFileStore;
