//! Key-value persistence and typed collections on top of it.

pub mod collection;
#[cfg(test)]
pub(crate) mod failing;
pub mod in_memory;
pub mod json_file;
pub mod keys;
mod r#trait;

pub use collection::Collection;
pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;
pub use r#trait::{KeyValueStore, StoreError};
