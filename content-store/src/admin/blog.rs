//! Blog post mutations

use super::report;
use crate::catalog::EntityKind;
use crate::core::ContentStore;
use crate::utils::validation::{
    MAX_CONTENT_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_SLUG_LEN, MAX_URL_LEN,
    validate_optional_text, validate_patch_text, validate_required_text, validate_text,
};
use serde_json::Map;
use shared::models::{BlogPost, BlogPostCreate, BlogPostUpdate, read_time_for};
use shared::util::today_iso;
use shared::{AppError, AppResult, MutationResult};

/// Dates are stored as `YYYY-MM-DD`; a full timestamp is accepted and cut
/// down to its date part.
fn normalize_date(raw: &str) -> AppResult<String> {
    let date = raw.trim().get(..10).unwrap_or(raw.trim());
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| AppError::field("date", format!("'{}' is not a valid date (YYYY-MM-DD)", raw)))
}

fn validate_create(input: &BlogPostCreate) -> AppResult<()> {
    validate_required_text(&input.title, "title", MAX_NAME_LEN)?;
    validate_optional_text(&input.slug, "slug", MAX_SLUG_LEN)?;
    validate_text(&input.excerpt, "excerpt", MAX_NOTE_LEN)?;
    validate_text(&input.content, "content", MAX_CONTENT_LEN)?;
    validate_text(&input.author, "author", MAX_NAME_LEN)?;
    validate_text(&input.category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&input.featured_image, "featuredImage", MAX_URL_LEN)?;
    validate_optional_text(&input.series, "series", MAX_NAME_LEN)
}

fn validate_update(update: &BlogPostUpdate) -> AppResult<()> {
    validate_patch_text(&update.title, "title", MAX_NAME_LEN)?;
    validate_optional_text(&update.slug, "slug", MAX_SLUG_LEN)?;
    validate_optional_text(&update.excerpt, "excerpt", MAX_NOTE_LEN)?;
    validate_optional_text(&update.content, "content", MAX_CONTENT_LEN)?;
    validate_optional_text(&update.author, "author", MAX_NAME_LEN)?;
    validate_optional_text(&update.category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&update.featured_image, "featuredImage", MAX_URL_LEN)?;
    validate_optional_text(&update.series.clone().flatten(), "series", MAX_NAME_LEN)
}

impl ContentStore {
    pub fn add_blog_post(&self, input: BlogPostCreate) -> MutationResult<BlogPost> {
        report("add", EntityKind::BlogPost, self.try_add_blog_post(input))
    }

    fn try_add_blog_post(&self, input: BlogPostCreate) -> AppResult<BlogPost> {
        validate_create(&input)?;
        let date = match input.date.as_deref().filter(|d| !d.trim().is_empty()) {
            Some(raw) => normalize_date(raw)?,
            None => today_iso(),
        };

        let customs: Vec<BlogPost> = self.load_customs()?;
        let id = self.allocate_id(&customs)?;
        let slug = self.assign_slug::<BlogPost>(input.slug.as_deref(), &input.title, id);

        let post = BlogPost {
            id,
            slug: Some(slug),
            read_time: read_time_for(&input.content),
            title: input.title,
            excerpt: input.excerpt,
            content: input.content,
            author: input.author,
            date,
            category: input.category,
            tags: input.tags,
            featured_image: input.featured_image.unwrap_or_default(),
            featured: input.featured,
            series: input.series.filter(|s| !s.trim().is_empty()),
            order: input.order,
            extra: Map::new(),
        };
        self.insert_custom(customs, post)
    }

    pub fn update_blog_post(&self, id: i64, update: BlogPostUpdate) -> MutationResult<BlogPost> {
        report("update", EntityKind::BlogPost, self.try_update_blog_post(id, update))
    }

    fn try_update_blog_post(&self, id: i64, mut update: BlogPostUpdate) -> AppResult<BlogPost> {
        validate_update(&update)?;
        if let Some(raw) = update.date.take() {
            update.date = Some(normalize_date(&raw)?);
        }
        self.patch::<BlogPost, _>(id, &update)
    }

    pub fn delete_blog_post(&self, id: i64) -> MutationResult<()> {
        report("delete", EntityKind::BlogPost, self.remove::<BlogPost>(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("2024-03-05").unwrap(), "2024-03-05");
        assert_eq!(normalize_date("2024-03-05T10:00:00Z").unwrap(), "2024-03-05");
        assert!(normalize_date("March 5").is_err());
        assert!(normalize_date("2024-13-01").is_err());
    }
}
