//! redb-backed key-value store

use super::{KvStore, StoreResult, check_quota, entry_size};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

/// Single table holding every key: key = storage key, value = JSON text
const LOCAL_STORAGE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("local_storage");

/// File-backed store; each `set`/`remove` is its own committed transaction
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
    quota: Option<u64>,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore")
            .field("quota", &self.quota)
            .finish()
    }
}

impl RedbStore {
    /// Open or create database
    pub fn open(path: impl AsRef<Path>, quota: Option<u64>) -> StoreResult<Self> {
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;
        Self::init(db, quota)
    }

    /// Open in-memory database (for testing)
    pub fn open_in_memory(quota: Option<u64>) -> StoreResult<Self> {
        let db =
            Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db, quota)
    }

    fn init(db: Database, quota: Option<u64>) -> StoreResult<Self> {
        // Initialize table so read transactions never see it missing
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            quota,
        })
    }
}

impl KvStore for RedbStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LOCAL_STORAGE_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
            if self.quota.is_some() {
                let mut used = 0u64;
                for entry in table.iter()? {
                    let (k, v) = entry?;
                    used += entry_size(k.value(), v.value());
                }
                let old = table
                    .get(key)?
                    .map_or(0, |guard| entry_size(key, guard.value()));
                // Dropping the uncommitted transaction discards it
                check_quota(self.quota, used, old, key, value)?;
            }
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LOCAL_STORAGE_TABLE)?;

        let mut keys = Vec::new();
        for entry in table.iter()? {
            let (k, _) = entry?;
            keys.push(k.value().to_string());
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redb_store_crud() {
        let store = RedbStore::open_in_memory(None).unwrap();

        store.set("customServices", "[]").unwrap();
        store.set("blogOrder", "{}").unwrap();
        assert_eq!(store.get("customServices").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get("missing").unwrap(), None);
        assert_eq!(
            store.keys().unwrap(),
            vec!["blogOrder".to_string(), "customServices".to_string()]
        );

        store.remove("blogOrder").unwrap();
        assert_eq!(store.get("blogOrder").unwrap(), None);
    }

    #[test]
    fn test_redb_store_quota_rejects_and_keeps_old_value() {
        let store = RedbStore::open_in_memory(Some(20)).unwrap();
        store.set("a", "[1,2,3]").unwrap();

        let err = store.set("a", "[1,2,3,4,5,6,7,8,9,10]").unwrap_err();
        assert!(err.is_quota_exceeded());
        assert_eq!(store.get("a").unwrap().as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn test_redb_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("content.redb");
        {
            let store = RedbStore::open(&path, None).unwrap();
            store.set("deletedServiceIds", "[1]").unwrap();
        }
        let store = RedbStore::open(&path, None).unwrap();
        assert_eq!(
            store.get("deletedServiceIds").unwrap().as_deref(),
            Some("[1]")
        );
    }
}
