//! In-memory reference store for testing and ephemeral use.

use std::collections::HashMap;
use std::sync::RwLock;

use gitter_types::ObjectId;

use crate::error::{RefError, RefResult};
use crate::traits::RefStore;
use crate::types::{validate_ref_name, Head};

/// An in-memory implementation of [`RefStore`].
///
/// HEAD starts symbolic on `main`. Data is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryRefStore {
    head: RwLock<Head>,
    refs: RwLock<HashMap<String, ObjectId>>,
    log: RwLock<Vec<ObjectId>>,
}

impl InMemoryRefStore {
    /// Create a new store with HEAD on `main` and no commits.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> RefError {
    RefError::Poisoned(e.to_string())
}

impl RefStore for InMemoryRefStore {
    fn head(&self) -> RefResult<Head> {
        Ok(self.head.read().map_err(poisoned)?.clone())
    }

    fn set_head(&self, head: &Head) -> RefResult<()> {
        if let Head::Symbolic(name) = head {
            validate_ref_name(name)?;
        }
        *self.head.write().map_err(poisoned)? = head.clone();
        Ok(())
    }

    fn read_ref(&self, name: &str) -> RefResult<Option<ObjectId>> {
        validate_ref_name(name)?;
        Ok(self.refs.read().map_err(poisoned)?.get(name).copied())
    }

    fn write_ref(&self, name: &str, id: &ObjectId) -> RefResult<()> {
        validate_ref_name(name)?;
        self.refs
            .write()
            .map_err(poisoned)?
            .insert(name.to_string(), *id);
        Ok(())
    }

    fn append_log(&self, id: &ObjectId) -> RefResult<()> {
        self.log.write().map_err(poisoned)?.push(*id);
        Ok(())
    }

    fn read_log(&self) -> RefResult<Vec<ObjectId>> {
        Ok(self.log.read().map_err(poisoned)?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAIN_BRANCH_REF;

    fn id(byte: u8) -> ObjectId {
        ObjectId::from_digest([byte; 20])
    }

    #[test]
    fn starts_on_main_without_commits() {
        let store = InMemoryRefStore::new();
        assert_eq!(store.head().unwrap(), Head::main());
        assert_eq!(store.resolve_head().unwrap(), None);
    }

    #[test]
    fn advance_moves_branch() {
        let store = InMemoryRefStore::new();
        store.advance_head(&id(1)).unwrap();
        store.advance_head(&id(2)).unwrap();
        assert_eq!(store.read_ref(MAIN_BRANCH_REF).unwrap(), Some(id(2)));
        assert_eq!(store.resolve_head().unwrap(), Some(id(2)));
    }

    #[test]
    fn log_is_append_only() {
        let store = InMemoryRefStore::new();
        store.append_log(&id(3)).unwrap();
        store.append_log(&id(4)).unwrap();
        assert_eq!(store.read_log().unwrap(), vec![id(3), id(4)]);
    }

    #[test]
    fn invalid_names_rejected() {
        let store = InMemoryRefStore::new();
        assert!(store.write_ref("main", &id(1)).is_err());
        assert!(store
            .set_head(&Head::Symbolic("nowhere".into()))
            .is_err());
    }
}
