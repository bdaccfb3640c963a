//! Structured data and image metadata
//!
//! - `schemaData`: page key to JSON-LD object
//! - `serviceSchemaData`: service id to JSON-LD object
//! - `imageAltTags`: image URL to alt text
//! - `allImages`: images registered through the admin image library

use super::report;
use crate::catalog::EntityKind;
use crate::core::ContentStore;
use crate::storage::keys;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_required_text, validate_text};
use serde_json::Value;
use shared::models::{ImageAsset, ImageSource, ImageUsage};
use shared::util::now_rfc3339;
use shared::{AppError, AppResult, ContentItem, ErrorCode, MutationResult};
use std::collections::BTreeMap;

fn require_object(value: &Value) -> AppResult<()> {
    if !value.is_object() {
        return Err(AppError::invalid("Structured data must be a JSON object"));
    }
    Ok(())
}

/// Log a metadata mutation outcome and fold it into the public shape
fn report_meta<T>(action: &str, result: AppResult<T>) -> MutationResult<T> {
    match &result {
        Ok(_) => tracing::info!(action, "Metadata mutation succeeded"),
        Err(e) => tracing::warn!(action, code = %e.code, error = %e.message, "Metadata mutation failed"),
    }
    result.into()
}

impl ContentStore {
    // ── Page structured data ────────────────────────────────────────

    pub fn schema_data(&self, page: &str) -> Option<Value> {
        self.codec().read_map::<Value>(keys::SCHEMA_DATA).remove(page)
    }

    pub fn all_schema_data(&self) -> BTreeMap<String, Value> {
        self.codec().read_map(keys::SCHEMA_DATA)
    }

    pub fn set_schema_data(&self, page: &str, value: Value) -> MutationResult<()> {
        report_meta("set_schema", self.try_set_schema_data(page, value))
    }

    fn try_set_schema_data(&self, page: &str, value: Value) -> AppResult<()> {
        validate_required_text(page, "page", MAX_NAME_LEN)?;
        require_object(&value)?;
        let mut map: BTreeMap<String, Value> = self.codec().load_map(keys::SCHEMA_DATA)?;
        map.insert(page.to_string(), value);
        self.codec().write_map(keys::SCHEMA_DATA, &map)?;
        Ok(())
    }

    pub fn remove_schema_data(&self, page: &str) -> MutationResult<()> {
        report_meta("remove_schema", self.try_remove_schema_data(page))
    }

    fn try_remove_schema_data(&self, page: &str) -> AppResult<()> {
        let mut map: BTreeMap<String, Value> = self.codec().load_map(keys::SCHEMA_DATA)?;
        if map.remove(page).is_none() {
            return Err(AppError::not_found_with(
                ErrorCode::SchemaNotFound,
                format!("Structured data for '{}'", page),
            ));
        }
        self.codec().write_map(keys::SCHEMA_DATA, &map)?;
        Ok(())
    }

    // ── Per-service structured data ─────────────────────────────────

    pub fn service_schema(&self, service_id: i64) -> Option<Value> {
        self.codec()
            .read_map::<Value>(keys::SERVICE_SCHEMA_DATA)
            .remove(&service_id.to_string())
    }

    pub fn set_service_schema(&self, service_id: i64, value: Value) -> MutationResult<()> {
        report("set_schema", EntityKind::Service, self.try_set_service_schema(service_id, value))
    }

    fn try_set_service_schema(&self, service_id: i64, value: Value) -> AppResult<()> {
        require_object(&value)?;
        self.require_service(service_id)?;
        let mut map: BTreeMap<String, Value> = self.codec().load_map(keys::SERVICE_SCHEMA_DATA)?;
        map.insert(service_id.to_string(), value);
        self.codec().write_map(keys::SERVICE_SCHEMA_DATA, &map)?;
        Ok(())
    }

    // ── Alt text ────────────────────────────────────────────────────

    pub fn image_alt_tags(&self) -> BTreeMap<String, String> {
        self.codec().read_map(keys::IMAGE_ALT_TAGS)
    }

    /// Set the alt text for an image; an empty alt removes the entry
    pub fn set_image_alt_tag(&self, url: &str, alt: &str) -> MutationResult<()> {
        report_meta("set_alt", self.try_set_image_alt_tag(url, alt))
    }

    fn try_set_image_alt_tag(&self, url: &str, alt: &str) -> AppResult<()> {
        validate_required_text(url, "url", MAX_URL_LEN)?;
        validate_text(alt, "alt", MAX_NOTE_LEN)?;
        let mut tags: BTreeMap<String, String> = self.codec().load_map(keys::IMAGE_ALT_TAGS)?;
        let alt = alt.trim();
        if alt.is_empty() {
            if tags.remove(url).is_none() {
                return Ok(());
            }
        } else {
            tags.insert(url.to_string(), alt.to_string());
        }
        self.codec().write_map(keys::IMAGE_ALT_TAGS, &tags)?;
        Ok(())
    }

    /// Alt text for an image, or `fallback` when none is set
    pub fn alt_text(&self, url: &str, fallback: &str) -> String {
        self.image_alt_tags()
            .remove(url)
            .unwrap_or_else(|| fallback.to_string())
    }

    // ── Image library ───────────────────────────────────────────────

    pub fn all_images(&self) -> Vec<ImageAsset> {
        self.codec().read_array(keys::ALL_IMAGES)
    }

    /// Register an image; re-registering a URL updates its alt text
    pub fn register_image(&self, url: &str, alt: &str) -> MutationResult<ImageAsset> {
        report_meta("register_image", self.try_register_image(url, alt))
    }

    fn try_register_image(&self, url: &str, alt: &str) -> AppResult<ImageAsset> {
        let url = url.trim();
        validate_required_text(url, "url", MAX_URL_LEN)?;
        validate_text(alt, "alt", MAX_NOTE_LEN)?;

        let mut images: Vec<ImageAsset> = self.codec().load_array(keys::ALL_IMAGES)?;
        let asset = match images.iter_mut().find(|img| img.url == url) {
            Some(existing) => {
                existing.alt = alt.to_string();
                existing.clone()
            }
            None => {
                let asset = ImageAsset {
                    url: url.to_string(),
                    alt: alt.to_string(),
                    added_at: Some(now_rfc3339()),
                };
                images.push(asset.clone());
                asset
            }
        };
        self.codec().write_array(keys::ALL_IMAGES, &images)?;
        Ok(asset)
    }

    pub fn remove_image(&self, url: &str) -> MutationResult<()> {
        report_meta("remove_image", self.try_remove_image(url))
    }

    fn try_remove_image(&self, url: &str) -> AppResult<()> {
        let mut images: Vec<ImageAsset> = self.codec().load_array(keys::ALL_IMAGES)?;
        let before = images.len();
        images.retain(|img| img.url != url);
        if images.len() == before {
            return Err(AppError::not_found_with(
                ErrorCode::ImageNotFound,
                format!("Image {}", url),
            ));
        }
        self.codec().write_array(keys::ALL_IMAGES, &images)?;
        Ok(())
    }

    /// Every image in use: the registered library first, then featured images
    /// of resolved content, deduplicated by URL. Alt text comes from
    /// `imageAltTags`, then the library entry, then the entity's name.
    pub fn image_library(&self) -> Vec<ImageUsage> {
        let alt_tags = self.image_alt_tags();
        let mut usages: Vec<ImageUsage> = Vec::new();

        let mut add = |url: &str, alt: &str, source: ImageSource| {
            if url.is_empty() {
                return;
            }
            match usages.iter_mut().find(|u| u.url == url) {
                Some(usage) => {
                    if !usage.sources.contains(&source) {
                        usage.sources.push(source);
                    }
                    if usage.alt.is_empty() {
                        usage.alt = alt.to_string();
                    }
                }
                None => usages.push(ImageUsage {
                    url: url.to_string(),
                    alt: alt.to_string(),
                    sources: vec![source],
                }),
            }
        };

        for image in self.all_images() {
            add(&image.url, &image.alt, ImageSource::Library);
        }
        for service in self.resolve_services() {
            add(&service.featured_image, &service.name, ImageSource::Service);
        }
        for post in self.resolve_blog_posts() {
            add(&post.featured_image, post.display_name(), ImageSource::BlogPost);
        }
        for course in self.resolve_courses() {
            add(&course.featured_image, course.display_name(), ImageSource::Course);
        }
        for city in self.resolve_cities() {
            add(&city.featured_image, &city.name, ImageSource::City);
        }

        for usage in &mut usages {
            if let Some(alt) = alt_tags.get(&usage.url) {
                usage.alt = alt.clone();
            }
        }
        usages
    }
}
