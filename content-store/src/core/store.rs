//! Content store handle

use super::config::{Config, StoreBackend};
use crate::catalog::Catalog;
use crate::codec::Codec;
use crate::storage::{KvStore, MemoryStore, RedbStore, StoreResult, keys};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Entry point for resolvers and the admin mutation API
///
/// Cheap to clone; clones share the same backing store. Every read goes to
/// the store (nothing is cached), so a resolver call always reflects the
/// latest committed write.
#[derive(Clone)]
pub struct ContentStore {
    codec: Codec,
    catalog: Arc<Catalog>,
}

impl std::fmt::Debug for ContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore")
            .field("default_services", &self.catalog.services.len())
            .field("default_blog_posts", &self.catalog.blog_posts.len())
            .field("default_courses", &self.catalog.courses.len())
            .field("default_cities", &self.catalog.cities.len())
            .finish()
    }
}

impl ContentStore {
    pub fn new(store: Arc<dyn KvStore>, catalog: Catalog) -> Self {
        Self {
            codec: Codec::new(store),
            catalog: Arc::new(catalog),
        }
    }

    /// Memory-backed store with the built-in defaults
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Catalog::builtin())
    }

    /// Open the configured backend with the built-in defaults
    pub fn open(config: &Config) -> StoreResult<Self> {
        let store: Arc<dyn KvStore> = match config.store_backend {
            StoreBackend::Redb => {
                let path = config.store_path();
                tracing::info!(path = %path.display(), "Opening content store");
                Arc::new(RedbStore::open(path, config.quota_bytes)?)
            }
            StoreBackend::Memory => {
                tracing::info!("Using in-memory content store");
                match config.quota_bytes {
                    Some(limit) => Arc::new(MemoryStore::with_quota(limit)),
                    None => Arc::new(MemoryStore::new()),
                }
            }
        };

        let content = Self::new(store, Catalog::builtin());
        if config.migrate_legacy_ids {
            let rewritten = content.normalize_legacy_ids()?;
            if rewritten > 0 {
                tracing::info!(rewritten, "Normalized legacy string ids");
            }
        }
        Ok(content)
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Raw dump of every known key that is present.
    ///
    /// Values that are not valid JSON are exported as strings so nothing is
    /// lost.
    pub fn export(&self) -> StoreResult<BTreeMap<String, serde_json::Value>> {
        let store = self.codec.store();
        let mut out = BTreeMap::new();
        for key in keys::ALL_KEYS {
            if let Some(raw) = store.get(key)? {
                let value = serde_json::from_str(&raw)
                    .unwrap_or(serde_json::Value::String(raw));
                out.insert(key.to_string(), value);
            }
        }
        Ok(out)
    }
}
