//! In-process store

use super::{KvStore, StoreResult, check_quota, entry_size};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Map-backed store; contents live as long as the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
    quota: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once `limit` bytes (keys + values) are used
    pub fn with_quota(limit: u64) -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            quota: Some(limit),
        }
    }

    /// Bytes currently counted against the quota
    pub fn used_bytes(&self) -> u64 {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| entry_size(k, v))
            .sum()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.write();
        if self.quota.is_some() {
            let used: u64 = entries.iter().map(|(k, v)| entry_size(k, v)).sum();
            let old = entries.get(key).map_or(0, |v| entry_size(key, v));
            check_quota(self.quota, used, old, key, value)?;
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_crud() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);

        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        // Removing a missing key is not an error
        store.remove("a").unwrap();
    }

    #[test]
    fn test_memory_store_quota() {
        let store = MemoryStore::with_quota(16);
        store.set("key", "0123456789").unwrap(); // 13 bytes
        assert_eq!(store.used_bytes(), 13);

        let err = store.set("k2", "0123").unwrap_err();
        assert!(err.is_quota_exceeded());
        // Failed write leaves the store untouched
        assert_eq!(store.get("k2").unwrap(), None);

        // Overwriting with a same-size value fits
        store.set("key", "abcdefghij").unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("abcdefghij"));
    }
}
