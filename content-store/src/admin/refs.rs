//! Secondary reference pruning
//!
//! Visitor state (cart, saved courses) and metadata maps refer to entities
//! by id. When an entity is deleted those references are removed in the same
//! call so consumers never see dangling entries.

use crate::catalog::EntityKind;
use crate::core::ContentStore;
use crate::storage::keys;
use serde_json::Value;
use shared::AppResult;
use shared::models::serde_helpers::normalize_id;
use std::collections::BTreeMap;

/// Whether a stored reference points at `id`.
///
/// References are either bare ids (number or numeric string) or objects
/// carrying the id under `field`.
fn refers_to(entry: &Value, field: &str, id: i64) -> bool {
    match entry {
        Value::Object(fields) => fields.get(field).and_then(normalize_id) == Some(id),
        other => normalize_id(other) == Some(id),
    }
}

impl ContentStore {
    pub(crate) fn prune_references(&self, kind: EntityKind, id: i64) -> AppResult<()> {
        let key = id.to_string();

        if let Some(order_key) = kind.order_key() {
            self.remove_map_entry(order_key, &key)?;
        }

        match kind {
            EntityKind::Service => {
                self.retain_list(keys::CART_ITEMS, |item| !refers_to(item, "serviceId", id))?;
                self.remove_map_entry(keys::SERVICE_SCHEMA_DATA, &key)?;
            }
            EntityKind::Course => {
                self.retain_list(keys::SAVED_COURSES, |item| !refers_to(item, "id", id))?;
            }
            EntityKind::BlogPost | EntityKind::City => {}
        }
        Ok(())
    }

    /// Drop list entries rejected by `keep`; writes only when something changed
    fn retain_list(&self, list_key: &str, keep: impl Fn(&Value) -> bool) -> AppResult<()> {
        let mut items: Vec<Value> = self.codec().read_array(list_key);
        let before = items.len();
        items.retain(|item| keep(item));
        if items.len() != before {
            tracing::debug!(key = list_key, removed = before - items.len(), "Pruned references");
            self.codec().write_array(list_key, &items)?;
        }
        Ok(())
    }

    fn remove_map_entry(&self, map_key: &str, entry: &str) -> AppResult<()> {
        let mut map: BTreeMap<String, Value> = self.codec().read_map(map_key);
        if map.remove(entry).is_some() {
            self.codec().write_map(map_key, &map)?;
        }
        Ok(())
    }
}
