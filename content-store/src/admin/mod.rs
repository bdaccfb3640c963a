//! Admin mutation API
//!
//! The only writer of the custom, override, deleted and order partitions.
//! Every public operation returns a [`MutationResult`] and never panics; the
//! message in a failed result is meant to be shown to the admin as is.
//!
//! # Write paths
//!
//! | Operation | Custom entity | Default entity |
//! |-----------|---------------|----------------|
//! | add | appended to `custom*` | n/a |
//! | update | patched in place in `custom*` | patch merged into `*Overrides` |
//! | delete | spliced out of `custom*` | id appended to `deleted*Ids` |
//!
//! Each call is a read-modify-write of whole values with no isolation; two
//! processes editing the same key race and the last write wins. A value that
//! is present but undecodable fails the mutation with `StorageCorrupted`
//! rather than being overwritten.

mod blog;
mod cities;
mod courses;
pub mod metadata;
mod refs;
mod services;

use crate::catalog::{ContentEntity, EntityKind};
use crate::core::ContentStore;
use crate::resolver::{OrderMap, merge_patch};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::models::serde_helpers;
use shared::slug::slug_or_fallback;
use shared::util::next_timestamp_id;
use shared::{AppError, AppResult, ContentItem, MutationResult, generate_slug};
use std::collections::BTreeSet;

/// One entry of a manual ordering request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
    #[serde(deserialize_with = "serde_helpers::flexible_id")]
    pub id: i64,
    pub order: i64,
}

impl OrderEntry {
    pub fn new(id: i64, order: i64) -> Self {
        Self { id, order }
    }
}

/// Fold an internal result into the public shape, logging the outcome
fn report<T>(action: &str, kind: EntityKind, result: AppResult<T>) -> MutationResult<T> {
    match &result {
        Ok(_) => tracing::info!(%kind, action, "Content mutation succeeded"),
        Err(e) => tracing::warn!(%kind, action, code = %e.code, error = %e.message, "Content mutation failed"),
    }
    result.into()
}

fn not_found(kind: EntityKind, id: i64) -> AppError {
    AppError::not_found_with(kind.not_found_code(), format!("{} {}", kind.label(), id))
        .with_detail("id", id)
}

/// Effective slug used for collision checks (stored or computed)
fn effective_slug<E: ContentItem>(entity: &E) -> String {
    match entity.slug().filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => generate_slug(entity.display_name()),
    }
}

impl ContentStore {
    /// New epoch-millisecond id above every existing id of this type
    fn allocate_id<E: ContentEntity>(&self, customs: &[E]) -> AppResult<i64> {
        let max = E::defaults(self.catalog())
            .iter()
            .chain(customs)
            .map(|e| e.id())
            .max();
        next_timestamp_id(max).ok_or_else(|| {
            AppError::corrupted(format!("No {} id left above the stored maximum", E::KIND.label()))
        })
    }

    /// Pick the slug for an entity being written.
    ///
    /// An explicit slug is normalized; otherwise it is derived from `name`.
    /// When nothing usable remains the `<prefix>-<id>` form is used. A slug
    /// already taken by another resolved entity gets a `-2`, `-3`, ... suffix.
    fn assign_slug<E: ContentEntity>(&self, explicit: Option<&str>, name: &str, id: i64) -> String {
        let source = explicit.filter(|s| !s.trim().is_empty()).unwrap_or(name);
        let base = slug_or_fallback(source, E::KIND.slug_prefix(), id);

        let taken: BTreeSet<String> = self
            .resolve::<E>()
            .iter()
            .filter(|e| e.id() != id)
            .map(effective_slug)
            .collect();
        if !taken.contains(&base) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", base, n);
            if !taken.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Append a fully built entity to the custom partition
    fn insert_custom<E: ContentEntity>(&self, mut customs: Vec<E>, entity: E) -> AppResult<E> {
        customs.push(entity.clone());
        self.codec().write_array(E::KIND.custom_key(), &customs)?;
        Ok(entity)
    }

    /// Apply a partial update to a custom or live default entity.
    ///
    /// Custom entities are rewritten in place. Defaults get the patch merged
    /// into their override entry. The slug is only regenerated when the name
    /// field actually changes and the patch carries no slug of its own.
    fn patch<E: ContentEntity, U: Serialize>(&self, id: i64, update: &U) -> AppResult<E> {
        let kind = E::KIND;
        let mut patch = match serde_json::to_value(update)? {
            Value::Object(fields) => fields,
            _ => return Err(AppError::invalid("Update payload must be an object")),
        };
        patch.remove("id");

        let mut customs: Vec<E> = self.load_customs()?;
        let custom_idx = customs.iter().position(|e| e.id() == id);
        let current = match custom_idx {
            Some(idx) => customs[idx].clone(),
            None => self.get::<E>(id).ok_or_else(|| not_found(kind, id))?,
        };

        self.patch_slug(&current, &mut patch);
        E::derive_fields(&mut patch);

        let updated = merge_patch(&current, &patch)
            .map_err(|e| AppError::validation(format!("Invalid {} update: {}", kind.label(), e)))?;

        match custom_idx {
            Some(idx) => {
                customs[idx] = updated;
                self.codec().write_array(kind.custom_key(), &customs)?;
            }
            None => {
                let mut overrides = self.load_overrides(kind)?;
                let entry = overrides.entry(id.to_string()).or_insert_with(Map::new);
                entry.extend(patch);
                self.codec().write_map(kind.overrides_key(), &overrides)?;
            }
        }

        self.get::<E>(id).ok_or_else(|| not_found(kind, id))
    }

    fn patch_slug<E: ContentEntity>(&self, current: &E, patch: &mut Map<String, Value>) {
        let explicit = match patch.get("slug") {
            Some(Value::String(slug)) if !slug.trim().is_empty() => Some(slug.clone()),
            _ => None,
        };
        if let Some(slug) = explicit {
            let assigned = self.assign_slug::<E>(Some(&slug), current.display_name(), current.id());
            patch.insert("slug".into(), Value::String(assigned));
            return;
        }
        // An empty slug in the patch counts as "not supplied"
        patch.remove("slug");

        let renamed = match patch.get(E::KIND.name_field()) {
            Some(Value::String(name)) if name != current.display_name() => Some(name.clone()),
            _ => None,
        };
        if let Some(name) = renamed {
            let assigned = self.assign_slug::<E>(None, &name, current.id());
            patch.insert("slug".into(), Value::String(assigned));
        }
    }

    /// Delete a custom entity or tombstone a live default, then prune
    /// references to it
    fn remove<E: ContentEntity>(&self, id: i64) -> AppResult<()> {
        let kind = E::KIND;
        let mut customs: Vec<E> = self.load_customs()?;
        if let Some(idx) = customs.iter().position(|e| e.id() == id) {
            customs.remove(idx);
            self.codec().write_array(kind.custom_key(), &customs)?;
        } else {
            let is_default = E::defaults(self.catalog()).iter().any(|e| e.id() == id);
            let mut deleted = self.load_deleted_ids(kind)?;
            if !is_default || deleted.contains(&id) {
                return Err(not_found(kind, id));
            }
            deleted.push(id);
            self.codec().write_array(kind.deleted_key(), &deleted)?;
        }
        self.prune_references(kind, id)
    }

    /// Replace the whole order map for an orderable type
    fn replace_order(&self, kind: EntityKind, entries: &[OrderEntry]) -> AppResult<OrderMap> {
        let key = kind
            .order_key()
            .ok_or_else(|| AppError::invalid(format!("{} entries cannot be reordered", kind.label())))?;
        let map: OrderMap = entries
            .iter()
            .map(|entry| (entry.id.to_string(), entry.order))
            .collect();
        self.codec().write_map(key, &map)?;
        Ok(map)
    }

    pub fn update_service_order(&self, entries: &[OrderEntry]) -> MutationResult<OrderMap> {
        report("reorder", EntityKind::Service, self.replace_order(EntityKind::Service, entries))
    }

    pub fn update_blog_order(&self, entries: &[OrderEntry]) -> MutationResult<OrderMap> {
        report("reorder", EntityKind::BlogPost, self.replace_order(EntityKind::BlogPost, entries))
    }

    pub fn update_course_order(&self, entries: &[OrderEntry]) -> MutationResult<OrderMap> {
        report("reorder", EntityKind::Course, self.replace_order(EntityKind::Course, entries))
    }

    /// Generic reorder entry point (used by the CLI)
    pub fn update_order(&self, kind: EntityKind, entries: &[OrderEntry]) -> MutationResult<OrderMap> {
        report("reorder", kind, self.replace_order(kind, entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::storage::{KvStore, MemoryStore, keys};
    use serde_json::json;
    use shared::ErrorCode;
    use shared::models::Service;
    use std::sync::Arc;

    fn content() -> (ContentStore, Arc<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        let defaults: Vec<Service> = serde_json::from_value(json!([
            {"id": 1, "name": "Poster Design", "slug": "poster-design"},
            {"id": 2, "name": "Logo Design", "slug": "logo-design"}
        ]))
        .unwrap();
        (
            ContentStore::new(backend.clone(), Catalog::empty().with_services(defaults)),
            backend,
        )
    }

    #[test]
    fn test_assign_slug_suffixes_collisions() {
        let (content, _) = content();
        assert_eq!(content.assign_slug::<Service>(None, "Poster Design", 99), "poster-design-2");
        // The entity's own slug is not a collision
        assert_eq!(content.assign_slug::<Service>(None, "Poster Design", 1), "poster-design");
        assert_eq!(content.assign_slug::<Service>(Some("Fresh Slug"), "ignored", 99), "fresh-slug");
        assert_eq!(content.assign_slug::<Service>(None, "???", 99), "service-99");
    }

    #[test]
    fn test_allocate_id_is_above_defaults_and_customs() {
        let (content, _) = content();
        let far_future = shared::util::now_millis() + 10_000_000;
        let customs: Vec<Service> =
            serde_json::from_value(json!([{"id": far_future, "name": "X"}])).unwrap();
        assert_eq!(content.allocate_id(&customs).unwrap(), far_future + 1);
        assert!(content.allocate_id::<Service>(&[]).unwrap() > 2);

        let exhausted: Vec<Service> =
            serde_json::from_value(json!([{"id": i64::MAX, "name": "X"}])).unwrap();
        let err = content.allocate_id(&exhausted).unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageCorrupted);
    }

    #[test]
    fn test_replace_order_is_full_replace() {
        let (content, backend) = content();
        backend.set(keys::SERVICE_ORDER, r#"{"1":5,"2":6}"#).unwrap();
        let result = content.update_service_order(&[OrderEntry::new(2, 1)]);
        assert!(result.is_success());
        assert_eq!(backend.get(keys::SERVICE_ORDER).unwrap().as_deref(), Some(r#"{"2":1}"#));
    }

    #[test]
    fn test_cities_cannot_be_reordered() {
        let (content, _) = content();
        let result = content.update_order(EntityKind::City, &[OrderEntry::new(1, 1)]);
        assert!(!result.is_success());
        assert_eq!(result.code, Some(ErrorCode::InvalidRequest));
    }

    #[test]
    fn test_order_entry_accepts_string_ids() {
        let entries: Vec<OrderEntry> =
            serde_json::from_value(json!([{"id": "9", "order": 2}, {"id": 10, "order": 1}])).unwrap();
        assert_eq!(entries, vec![OrderEntry::new(9, 2), OrderEntry::new(10, 1)]);
    }
}
