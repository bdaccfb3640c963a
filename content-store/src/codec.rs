//! JSON codec over the storage port
//!
//! Reads never fail: a missing key, an unreadable backend or malformed JSON
//! all decode to an empty collection. A value is decoded as a whole, so one
//! bad element discards the entire array instead of returning part of it.
//! Writes surface storage errors (notably quota exhaustion) to the caller.
//!
//! Read-modify-write paths use the `load_*` variants instead: a missing key
//! is still empty, but an undecodable value is a [`StoreError::Corrupted`]
//! so the caller never writes a shortened collection over data it could not
//! read.

use crate::storage::{KvStore, StoreError, StoreResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct Codec {
    store: Arc<dyn KvStore>,
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec").finish_non_exhaustive()
    }
}

impl Codec {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Underlying store (raw string access for export/migration)
    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    /// Decode the value under `key`, `None` if absent or undecodable
    pub fn read_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Storage read failed, treating as empty");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(key, error = %e, "Malformed JSON in storage, treating as empty");
                None
            }
        }
    }

    pub fn read_array<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.read_value(key).unwrap_or_default()
    }

    pub fn read_map<T: DeserializeOwned>(&self, key: &str) -> BTreeMap<String, T> {
        self.read_value(key).unwrap_or_default()
    }

    /// Strict read for callers about to rewrite the value.
    ///
    /// `Ok(None)` only when the key is absent; backend failures and
    /// undecodable JSON are errors.
    pub fn load_value<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::Corrupted {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn load_array<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Vec<T>> {
        Ok(self.load_value(key)?.unwrap_or_default())
    }

    pub fn load_map<T: DeserializeOwned>(&self, key: &str) -> StoreResult<BTreeMap<String, T>> {
        Ok(self.load_value(key)?.unwrap_or_default())
    }

    pub fn write_value<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let encoded = serde_json::to_string(value)?;
        self.store.set(key, &encoded)
    }

    pub fn write_array<T: Serialize>(&self, key: &str, items: &[T]) -> StoreResult<()> {
        self.write_value(key, items)
    }

    pub fn write_map<T: Serialize>(&self, key: &str, map: &BTreeMap<String, T>) -> StoreResult<()> {
        self.write_value(key, map)
    }

    pub fn remove(&self, key: &str) -> StoreResult<()> {
        self.store.remove(key)
    }
}
