//! Store wrapper that refuses writes to chosen keys.

use std::collections::HashSet;
use std::io;
use std::sync::RwLock;

use super::in_memory::InMemoryStore;
use super::r#trait::{KeyValueStore, StoreError};

#[derive(Debug, Default)]
pub(crate) struct FailingStore {
    inner: InMemoryStore,
    broken: RwLock<HashSet<&'static str>>,
}

impl FailingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every later `set` or `remove` of `key` fails with an io error.
    pub(crate) fn break_key(&self, key: &'static str) {
        self.broken.write().unwrap().insert(key);
    }

    fn check(&self, key: &str) -> Result<(), StoreError> {
        if self.broken.read().unwrap().contains(key) {
            return Err(StoreError::Io {
                key: key.to_string(),
                source: io::Error::other("disk full"),
            });
        }
        Ok(())
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.check(key)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check(key)?;
        self.inner.remove(key)
    }
}
