//! Data models
//!
//! Content entities share one shape: an integer `id` (small sequential
//! integers for built-in defaults, epoch milliseconds for admin-created
//! entries), an optional `slug`, and a display name or title. JSON field
//! names are camelCase to stay compatible with data already in the store.

pub mod blog_post;
pub mod city;
pub mod course;
pub mod image_ref;
pub mod serde_helpers;
pub mod service;
pub mod submission;

// Re-exports
pub use blog_post::*;
pub use city::*;
pub use course::*;
pub use image_ref::*;
pub use service::*;
pub use submission::*;

/// Common surface of every content entity
pub trait ContentItem {
    fn id(&self) -> i64;

    /// Stored slug, if any (empty strings count as absent)
    fn slug(&self) -> Option<&str>;

    /// `name` for services and cities, `title` for posts and courses
    fn display_name(&self) -> &str;

    fn featured_image(&self) -> Option<&str> {
        None
    }

    /// URL segment: the slug when there is one, otherwise the id
    fn slug_or_id(&self) -> String {
        match self.slug().filter(|s| !s.is_empty()) {
            Some(slug) => slug.to_string(),
            None => self.id().to_string(),
        }
    }
}
