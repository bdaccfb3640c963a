//! Legacy id migration
//!
//! Older front-end builds stored some ids as numeric strings. Decoding
//! already tolerates both forms; this pass rewrites the stored values to
//! integers so the tolerant path is only needed for data written elsewhere.
//! Values that do not parse as an integer are left untouched.

use crate::catalog::EntityKind;
use crate::core::ContentStore;
use crate::storage::{StoreResult, keys};
use serde_json::Value;
use shared::models::serde_helpers::parse_leading_int;

/// Rewrite a string id in place; returns whether it changed
fn normalize_in_place(value: &mut Value) -> bool {
    if let Value::String(raw) = value
        && let Some(id) = parse_leading_int(raw)
    {
        *value = Value::from(id);
        return true;
    }
    false
}

/// Rewrite `field` of an object, or the value itself when it is a bare id
fn normalize_entry(entry: &mut Value, field: &str) -> bool {
    match entry {
        Value::Object(fields) => fields.get_mut(field).is_some_and(normalize_in_place),
        other => normalize_in_place(other),
    }
}

impl ContentStore {
    /// Rewrite string ids to integers across every id-bearing key.
    ///
    /// Returns the number of values rewritten. Keys holding malformed JSON
    /// are skipped.
    pub fn normalize_legacy_ids(&self) -> StoreResult<usize> {
        let mut rewritten = 0;
        for kind in EntityKind::ALL {
            rewritten += self.normalize_list(kind.custom_key(), "id")?;
            rewritten += self.normalize_list(kind.deleted_key(), "id")?;
        }
        rewritten += self.normalize_list(keys::SAVED_COURSES, "id")?;
        rewritten += self.normalize_list(keys::CART_ITEMS, "serviceId")?;
        Ok(rewritten)
    }

    fn normalize_list(&self, key: &str, field: &str) -> StoreResult<usize> {
        let Some(mut items) = self.codec().read_value::<Vec<Value>>(key) else {
            return Ok(0);
        };
        let count = items
            .iter_mut()
            .map(|item| normalize_entry(item, field))
            .filter(|changed| *changed)
            .count();
        if count > 0 {
            tracing::debug!(key, count, "Rewrote legacy string ids");
            self.codec().write_array(key, &items)?;
        }
        Ok(count)
    }
}
