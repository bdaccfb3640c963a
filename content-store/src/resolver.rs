//! Collection resolvers
//!
//! A resolved collection is rebuilt from storage on every call:
//!
//! 1. defaults followed by custom entries, each in insertion order
//! 2. drop ids in the deleted set
//! 3. shallow-merge the override patch for each remaining id (the patch's own
//!    `id` never wins)
//! 4. annotate `order` from the order map (the array is not sorted)
//!
//! Deleted ids are filtered before overrides are applied, so a patch for a
//! deleted entity can never make it visible again.

use crate::catalog::{ContentEntity, EntityKind};
use crate::core::ContentStore;
use crate::storage::StoreResult;
use serde_json::{Map, Value};
use shared::find_by_slug_or_id;
use shared::models::serde_helpers::FlexibleId;
use shared::models::{BlogPost, City, Course, Service};
use std::collections::{BTreeMap, BTreeSet};

/// Per-id partial patches, keyed by the id's decimal string
pub type OverrideMap = BTreeMap<String, Map<String, Value>>;

/// Id to manual sort position
pub type OrderMap = BTreeMap<String, i64>;

/// Shallow-merge `patch` into `entity`, keeping the entity's id.
pub(crate) fn merge_patch<E: ContentEntity>(
    entity: &E,
    patch: &Map<String, Value>,
) -> Result<E, serde_json::Error> {
    let mut fields = match serde_json::to_value(entity)? {
        Value::Object(fields) => fields,
        other => return serde_json::from_value(other),
    };
    for (key, value) in patch {
        if key == "id" {
            continue;
        }
        fields.insert(key.clone(), value.clone());
    }
    serde_json::from_value(Value::Object(fields))
}

/// The four-layer merge over already-decoded partitions
pub fn resolve_layers<E: ContentEntity>(
    defaults: &[E],
    customs: Vec<E>,
    deleted: &BTreeSet<i64>,
    overrides: &OverrideMap,
    order: &OrderMap,
) -> Vec<E> {
    defaults
        .iter()
        .cloned()
        .chain(customs)
        .filter(|entity| !deleted.contains(&entity.id()))
        .map(|entity| {
            let key = entity.id().to_string();
            let mut entity = match overrides.get(&key) {
                Some(patch) => match merge_patch(&entity, patch) {
                    Ok(patched) => patched,
                    Err(e) => {
                        tracing::warn!(
                            kind = %E::KIND,
                            id = entity.id(),
                            error = %e,
                            "Override does not produce a valid entity, ignoring it"
                        );
                        entity
                    }
                },
                None => entity,
            };
            if let Some(&position) = order.get(&key) {
                entity.set_order(position);
            }
            entity
        })
        .collect()
}

impl ContentStore {
    pub(crate) fn customs<E: ContentEntity>(&self) -> Vec<E> {
        self.codec().read_array(E::KIND.custom_key())
    }

    /// Deleted default ids in stored order (string ids are normalized)
    pub(crate) fn deleted_ids(&self, kind: EntityKind) -> Vec<i64> {
        self.codec()
            .read_array::<FlexibleId>(kind.deleted_key())
            .into_iter()
            .map(|id| id.0)
            .collect()
    }

    pub(crate) fn overrides(&self, kind: EntityKind) -> OverrideMap {
        self.codec().read_map(kind.overrides_key())
    }

    /// Custom entities for a rewrite; fails instead of reading corrupt data as empty
    pub(crate) fn load_customs<E: ContentEntity>(&self) -> StoreResult<Vec<E>> {
        self.codec().load_array(E::KIND.custom_key())
    }

    pub(crate) fn load_deleted_ids(&self, kind: EntityKind) -> StoreResult<Vec<i64>> {
        Ok(self
            .codec()
            .load_array::<FlexibleId>(kind.deleted_key())?
            .into_iter()
            .map(|id| id.0)
            .collect())
    }

    pub(crate) fn load_overrides(&self, kind: EntityKind) -> StoreResult<OverrideMap> {
        self.codec().load_map(kind.overrides_key())
    }

    pub(crate) fn order_map(&self, kind: EntityKind) -> OrderMap {
        match kind.order_key() {
            Some(key) => self.codec().read_map(key),
            None => OrderMap::new(),
        }
    }

    /// Resolve the current collection for any content type
    pub fn resolve<E: ContentEntity>(&self) -> Vec<E> {
        let kind = E::KIND;
        let deleted: BTreeSet<i64> = self.deleted_ids(kind).into_iter().collect();
        resolve_layers(
            E::defaults(self.catalog()),
            self.customs(),
            &deleted,
            &self.overrides(kind),
            &self.order_map(kind),
        )
    }

    pub fn resolve_services(&self) -> Vec<Service> {
        self.resolve()
    }

    pub fn resolve_blog_posts(&self) -> Vec<BlogPost> {
        self.resolve()
    }

    pub fn resolve_courses(&self) -> Vec<Course> {
        self.resolve()
    }

    pub fn resolve_cities(&self) -> Vec<City> {
        self.resolve()
    }

    /// Look up a resolved entity by route segment (slug, or an all-digit id)
    pub fn find<E: ContentEntity>(&self, segment: &str) -> Option<E> {
        let items = self.resolve::<E>();
        find_by_slug_or_id(&items, segment).cloned()
    }

    /// Look up a resolved entity by id
    pub fn get<E: ContentEntity>(&self, id: i64) -> Option<E> {
        self.resolve::<E>().into_iter().find(|e| e.id() == id)
    }
}
