//! # State-Store Port
//!
//! Point get/put/delete plus prefix-range iteration over keyed spaces, and
//! an unkeyed blob variant used for the admin pointer and the trust-root
//! list. The host chain supplies the production implementation; the
//! in-memory adapter here backs tests and embedded use.

use std::collections::BTreeMap;
use std::sync::RwLock;

use vdr_core::StoreError;

/// Host-provided deterministic key-value store.
///
/// `iterate_prefix` returns a finite snapshot in storage-native order;
/// callers must not assume insertion order. Any failure is fatal for the
/// calling operation and surfaces as [`StoreError::Unavailable`].
pub trait StateStore: Send + Sync {
    fn get(&self, space: &str, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn put(&self, space: &str, key: &str, value: &[u8]) -> Result<(), StoreError>;
    fn delete(&self, space: &str, key: &str) -> Result<(), StoreError>;
    fn iterate_prefix(
        &self,
        space: &str,
        prefix: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, StoreError>;
    fn get_blob(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_blob(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

/// In-memory `StateStore` over `BTreeMap`s: deterministic lexicographic
/// iteration, interior mutability behind `RwLock`.
#[derive(Debug, Default)]
pub struct MemStateStore {
    spaces: RwLock<BTreeMap<(String, String), Vec<u8>>>,
    blobs: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(_: impl std::fmt::Debug) -> StoreError {
    StoreError::Unavailable("lock poisoned".into())
}

impl StateStore for MemStateStore {
    fn get(&self, space: &str, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let spaces = self.spaces.read().map_err(poisoned)?;
        Ok(spaces.get(&(space.to_owned(), key.to_owned())).cloned())
    }

    fn put(&self, space: &str, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut spaces = self.spaces.write().map_err(poisoned)?;
        spaces.insert((space.to_owned(), key.to_owned()), value.to_vec());
        Ok(())
    }

    fn delete(&self, space: &str, key: &str) -> Result<(), StoreError> {
        let mut spaces = self.spaces.write().map_err(poisoned)?;
        spaces.remove(&(space.to_owned(), key.to_owned()));
        Ok(())
    }

    fn iterate_prefix(
        &self,
        space: &str,
        prefix: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
        let spaces = self.spaces.read().map_err(poisoned)?;
        let from = (space.to_owned(), prefix.to_owned());
        Ok(spaces
            .range(from..)
            .take_while(|((s, k), _)| s == space && k.starts_with(prefix))
            .map(|((_, k), v)| (k.clone(), v.clone()))
            .collect())
    }

    fn get_blob(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let blobs = self.blobs.read().map_err(poisoned)?;
        Ok(blobs.get(key).cloned())
    }

    fn put_blob(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut blobs = self.blobs.write().map_err(poisoned)?;
        blobs.insert(key.to_owned(), value.to_vec());
        Ok(())
    }
}
