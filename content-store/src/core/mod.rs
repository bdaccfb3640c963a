//! Configuration and the content store handle

pub mod config;
pub mod store;

pub use config::{Config, StoreBackend};
pub use store::ContentStore;
