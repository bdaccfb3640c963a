//! Agency site content store
//!
//! # Overview
//!
//! Content collections (services, blog posts, courses, cities) are assembled
//! at read time from a compiled-in default catalog and four persisted
//! partitions per type: custom entries, per-id override patches, deleted
//! default ids and a manual order map. This crate provides:
//!
//! - **Storage port** (`storage`): string key-value store with memory and
//!   redb backends and an optional byte quota
//! - **Codec** (`codec`): JSON reads that degrade to empty collections,
//!   writes that surface quota errors
//! - **Resolvers** (`resolver`): the four-layer merge, rebuilt on every call
//! - **Admin API** (`admin`): add/update/delete/reorder plus structured data
//!   and image metadata
//! - **Submissions**, **migration**, **sitemap** and the `content-admin` CLI
//!
//! # Module layout
//!
//! ```text
//! content-store/src/
//! ├── core/          # Config, ContentStore handle
//! ├── storage/       # KvStore trait, memory + redb backends, key names
//! ├── catalog/       # EntityKind, seed content
//! ├── admin/         # Mutation API, reference pruning, metadata
//! ├── cli/           # content-admin commands
//! └── utils/         # Logger, validation
//! ```
//!
//! # Example
//!
//! ```ignore
//! use content_store::ContentStore;
//! use shared::models::ServiceCreate;
//!
//! let content = ContentStore::in_memory();
//! let result = content.add_service(ServiceCreate {
//!     name: "Banner Printing".into(),
//!     ..Default::default()
//! });
//! assert!(result.is_success());
//! assert!(content.find::<shared::models::Service>("banner-printing").is_some());
//! ```

pub mod admin;
pub mod catalog;
pub mod cli;
pub mod codec;
pub mod core;
pub mod migration;
pub mod resolver;
pub mod sitemap;
pub mod storage;
pub mod submissions;
pub mod utils;

// Re-exports
pub use admin::OrderEntry;
pub use catalog::{Catalog, ContentEntity, EntityKind};
pub use codec::Codec;
pub use core::{Config, ContentStore, StoreBackend};
pub use resolver::{OrderMap, OverrideMap, resolve_layers};
pub use sitemap::{build_sitemap, write_sitemap};
pub use storage::{KvStore, MemoryStore, RedbStore, StoreError, StoreResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Initialize logging from the loaded configuration
pub fn setup_logging(config: &Config) {
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
}
