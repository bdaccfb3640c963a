//! Storage port
//!
//! The content layer only needs a synchronous string-keyed, string-valued
//! store, the same contract a browser's local storage offers. Everything
//! above this module talks to [`KvStore`], so the backend can be swapped
//! (in-memory for tests, redb on disk for the CLI) without touching resolver
//! or mutation logic.
//!
//! There is no isolation across keys: every mutation is a read-modify-write
//! of whole values. Two processes writing the same key race and the last
//! write wins.

mod file;
pub mod keys;
mod memory;

pub use file::RedbStore;
pub use memory::MemoryStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage quota exceeded writing '{key}': {required} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        required: u64,
        limit: u64,
    },

    #[error("Stored value under '{key}' cannot be decoded: {reason}")]
    Corrupted { key: String, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, StoreError::QuotaExceeded { .. })
    }
}

impl From<StoreError> for shared::AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::QuotaExceeded { ref key, limit, .. } => {
                shared::AppError::storage_full(format!(
                    "Storage is full ({} byte limit); could not save {}",
                    limit, key
                ))
                .with_detail("key", key.clone())
            }
            StoreError::Corrupted { ref key, ref reason } => shared::AppError::corrupted(format!(
                "Stored {} is unreadable ({}); refusing to overwrite it",
                key, reason
            ))
            .with_detail("key", key.clone()),
            StoreError::Serialization(e) => {
                shared::AppError::internal(format!("Serialization error: {}", e))
            }
            other => shared::AppError::database(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Synchronous key-value store over string keys and values
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    fn remove(&self, key: &str) -> StoreResult<()>;

    /// All keys currently present, sorted
    fn keys(&self) -> StoreResult<Vec<String>>;
}

/// Bytes an entry counts against the quota
pub(crate) fn entry_size(key: &str, value: &str) -> u64 {
    (key.len() + value.len()) as u64
}

/// Shared quota check for both backends.
///
/// `used` is the current total including the old value of `key`, if any.
pub(crate) fn check_quota(
    quota: Option<u64>,
    used: u64,
    old_entry: u64,
    key: &str,
    value: &str,
) -> StoreResult<()> {
    let Some(limit) = quota else {
        return Ok(());
    };
    let required = used.saturating_sub(old_entry) + entry_size(key, value);
    if required > limit {
        return Err(StoreError::QuotaExceeded {
            key: key.to_string(),
            required,
            limit,
        });
    }
    Ok(())
}
