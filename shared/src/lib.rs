//! Shared types for the agency site content store
//!
//! Content models, slug utilities, image URL helpers, error codes and the
//! mutation result shape. Nothing in here touches storage.

pub mod error;
pub mod image;
pub mod models;
pub mod response;
pub mod slug;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::ContentItem;
pub use response::MutationResult;
pub use slug::{IdRef, find_by_id, find_by_slug, find_by_slug_or_id, generate_slug};
