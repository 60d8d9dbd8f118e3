use core::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use bakeledger_core::{DomainError, DomainResult, Entity};

use super::r#trait::{KeyValueStore, StoreError};
use crate::error::ServiceResult;

/// Typed view of one JSON-array collection in a [`KeyValueStore`].
///
/// A missing key reads as an empty collection.
pub struct Collection<T> {
    key: &'static str,
    kind: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Collection<T> {}

impl<T> core::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Collection")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .finish()
    }
}

impl<T> Collection<T>
where
    T: Entity + Serialize + DeserializeOwned,
{
    /// `kind` names a single record in not-found errors ("Bill", "Salary record").
    pub const fn new(key: &'static str, kind: &'static str) -> Self {
        Self {
            key,
            kind,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn not_found(&self, id: &T::Id) -> DomainError {
        DomainError::not_found(self.kind, id)
    }

    pub fn is_present<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<bool, StoreError> {
        Ok(store.get(self.key)?.is_some())
    }

    pub fn load<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<Vec<T>, StoreError> {
        match store.get(self.key)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Serialization {
                key: self.key.to_string(),
                source,
            }),
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        records: &[T],
    ) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records).map_err(|source| StoreError::Serialization {
            key: self.key.to_string(),
            source,
        })?;
        store.set(self.key, raw)
    }

    pub fn append<S: KeyValueStore + ?Sized>(&self, store: &S, record: T) -> Result<T, StoreError>
    where
        T: Clone,
    {
        let mut records = self.load(store)?;
        records.push(record.clone());
        self.save(store, &records)?;
        Ok(record)
    }

    pub fn find<S: KeyValueStore + ?Sized>(&self, store: &S, id: &T::Id) -> ServiceResult<T> {
        self.load(store)?
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| self.not_found(id).into())
    }

    /// Apply `edit` to the record with `id` and persist. Nothing is written when the
    /// record is missing or `edit` fails.
    pub fn update<S, F>(&self, store: &S, id: &T::Id, edit: F) -> ServiceResult<T>
    where
        S: KeyValueStore + ?Sized,
        T: Clone,
        F: FnOnce(&mut T) -> DomainResult<()>,
    {
        let mut records = self.load(store)?;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| self.not_found(id))?;
        edit(record)?;
        let updated = record.clone();
        self.save(store, &records)?;
        Ok(updated)
    }

    pub fn remove<S: KeyValueStore + ?Sized>(&self, store: &S, id: &T::Id) -> ServiceResult<T> {
        let mut records = self.load(store)?;
        let pos = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| self.not_found(id))?;
        let removed = records.remove(pos);
        self.save(store, &records)?;
        Ok(removed)
    }

    /// Keep only records matching `keep`; returns how many were dropped. The
    /// collection is not rewritten when nothing matches.
    pub fn retain<S, F>(&self, store: &S, mut keep: F) -> Result<usize, StoreError>
    where
        S: KeyValueStore + ?Sized,
        F: FnMut(&T) -> bool,
    {
        let mut records = self.load(store)?;
        let before = records.len();
        records.retain(|r| keep(r));
        let dropped = before - records.len();
        if dropped > 0 {
            self.save(store, &records)?;
        }
        Ok(dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    use crate::error::ServiceError;
    use crate::store::InMemoryStore;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Note {
        id: u32,
        text: String,
    }

    impl Entity for Note {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    const NOTES: Collection<Note> = Collection::new("notes", "Note");

    fn note(id: u32, text: &str) -> Note {
        Note {
            id,
            text: text.to_string(),
        }
    }

    #[test]
    fn missing_key_is_empty() {
        let store = InMemoryStore::new();
        assert!(NOTES.load(&store).unwrap().is_empty());
        assert!(!NOTES.is_present(&store).unwrap());
    }

    #[test]
    fn append_update_remove() {
        let store = InMemoryStore::new();
        NOTES.append(&store, note(1, "a")).unwrap();
        NOTES.append(&store, note(2, "b")).unwrap();

        let updated = NOTES
            .update(&store, &2, |n| {
                n.text = "B".to_string();
                Ok(())
            })
            .unwrap();
        assert_eq!(updated, note(2, "B"));

        NOTES.remove(&store, &1).unwrap();
        assert_eq!(NOTES.load(&store).unwrap(), vec![note(2, "B")]);
    }

    #[test]
    fn missing_record_is_not_found() {
        let store = InMemoryStore::new();
        let err = NOTES.remove(&store, &7).unwrap_err();
        match err {
            ServiceError::Domain(e) => assert_eq!(e.to_string(), "Note with ID 7 not found"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn failed_edit_is_not_persisted() {
        let store = InMemoryStore::new();
        NOTES.append(&store, note(1, "a")).unwrap();
        let res = NOTES.update(&store, &1, |n| {
            n.text = "changed".to_string();
            Err(DomainError::validation("nope"))
        });
        assert!(res.is_err());
        assert_eq!(NOTES.find(&store, &1).unwrap().text, "a");
    }

    #[test]
    fn corrupt_value_is_a_serialization_error() {
        let store = InMemoryStore::new();
        store.set("notes", "{oops".to_string()).unwrap();
        assert!(matches!(NOTES.load(&store), Err(StoreError::Serialization { .. })));
    }

    #[test]
    fn retain_reports_dropped_count() {
        let store = InMemoryStore::new();
        NOTES.save(&store, &[note(1, "a"), note(2, "b"), note(3, "a")]).unwrap();
        assert_eq!(NOTES.retain(&store, |n| n.text != "a").unwrap(), 2);
        assert_eq!(NOTES.load(&store).unwrap().len(), 1);
    }
}
