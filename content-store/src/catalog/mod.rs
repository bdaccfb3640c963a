//! Entity kinds and the compiled-in default catalog
//!
//! Each entity type has four persisted partitions (custom entries, per-id
//! override patches, deleted default ids, and for orderable types an order
//! map) layered over a seed list compiled into the binary.

mod seed;

pub use seed::Catalog;

use crate::storage::keys;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shared::models::{BlogPost, City, Course, Service, read_time_for};
use shared::{ContentItem, ErrorCode};
use std::fmt;

/// Content entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Service,
    BlogPost,
    Course,
    City,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Service,
        EntityKind::BlogPost,
        EntityKind::Course,
        EntityKind::City,
    ];

    /// Human-readable label used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::BlogPost => "Blog post",
            Self::Course => "Course",
            Self::City => "City",
        }
    }

    pub fn custom_key(&self) -> &'static str {
        match self {
            Self::Service => keys::CUSTOM_SERVICES,
            Self::BlogPost => keys::CUSTOM_BLOG_POSTS,
            Self::Course => keys::CUSTOM_COURSES,
            Self::City => keys::CUSTOM_CITIES,
        }
    }

    pub fn overrides_key(&self) -> &'static str {
        match self {
            Self::Service => keys::SERVICE_OVERRIDES,
            Self::BlogPost => keys::BLOG_OVERRIDES,
            Self::Course => keys::COURSE_OVERRIDES,
            Self::City => keys::CITY_OVERRIDES,
        }
    }

    pub fn deleted_key(&self) -> &'static str {
        match self {
            Self::Service => keys::DELETED_SERVICE_IDS,
            Self::BlogPost => keys::DELETED_BLOG_IDS,
            Self::Course => keys::DELETED_COURSE_IDS,
            Self::City => keys::DELETED_CITY_IDS,
        }
    }

    /// Order map key; cities are not manually ordered
    pub fn order_key(&self) -> Option<&'static str> {
        match self {
            Self::Service => Some(keys::SERVICE_ORDER),
            Self::BlogPost => Some(keys::BLOG_ORDER),
            Self::Course => Some(keys::COURSE_ORDER),
            Self::City => None,
        }
    }

    /// JSON field the slug is derived from
    pub fn name_field(&self) -> &'static str {
        match self {
            Self::Service | Self::City => "name",
            Self::BlogPost | Self::Course => "title",
        }
    }

    /// Prefix for id-based fallback slugs (`service-1700000000000`)
    pub fn slug_prefix(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::BlogPost => "blog",
            Self::Course => "course",
            Self::City => "city",
        }
    }

    /// Site section the entity's detail page lives under
    pub fn url_section(&self) -> &'static str {
        match self {
            Self::Service => "services",
            Self::BlogPost => "blog",
            Self::Course => "courses",
            Self::City => "cities",
        }
    }

    pub fn not_found_code(&self) -> ErrorCode {
        match self {
            Self::Service => ErrorCode::ServiceNotFound,
            Self::BlogPost => ErrorCode::BlogPostNotFound,
            Self::Course => ErrorCode::CourseNotFound,
            Self::City => ErrorCode::CityNotFound,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A content type the resolver and mutation API can operate on
pub trait ContentEntity: ContentItem + Serialize + DeserializeOwned + Clone {
    const KIND: EntityKind;

    /// Compiled-in defaults for this type
    fn defaults(catalog: &Catalog) -> &[Self];

    /// Record the manual sort position; no-op for unordered types
    fn set_order(&mut self, _order: i64) {}

    /// Recompute derived fields inside an update patch
    fn derive_fields(_patch: &mut Map<String, Value>) {}
}

impl ContentEntity for Service {
    const KIND: EntityKind = EntityKind::Service;

    fn defaults(catalog: &Catalog) -> &[Self] {
        &catalog.services
    }

    fn set_order(&mut self, order: i64) {
        self.order = Some(order);
    }

    fn derive_fields(patch: &mut Map<String, Value>) {
        if let Some(Value::Array(add_ons)) = patch.get_mut("addOns") {
            for (idx, add_on) in add_ons.iter_mut().enumerate() {
                if let Value::Object(fields) = add_on {
                    fields.insert("id".into(), Value::from(idx as i64 + 1));
                }
            }
        }
    }
}

impl ContentEntity for BlogPost {
    const KIND: EntityKind = EntityKind::BlogPost;

    fn defaults(catalog: &Catalog) -> &[Self] {
        &catalog.blog_posts
    }

    fn set_order(&mut self, order: i64) {
        self.order = Some(order);
    }

    fn derive_fields(patch: &mut Map<String, Value>) {
        let read_time = match patch.get("content") {
            Some(Value::String(content)) => read_time_for(content),
            _ => return,
        };
        patch.insert("readTime".into(), Value::String(read_time));
    }
}

impl ContentEntity for Course {
    const KIND: EntityKind = EntityKind::Course;

    fn defaults(catalog: &Catalog) -> &[Self] {
        &catalog.courses
    }

    fn set_order(&mut self, order: i64) {
        self.order = Some(order);
    }
}

impl ContentEntity for City {
    const KIND: EntityKind = EntityKind::City;

    fn defaults(catalog: &Catalog) -> &[Self] {
        &catalog.cities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patch(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_service_patch_renumbers_add_ons() {
        let mut p = patch(json!({"addOns": [{"id": 7, "name": "Rush", "price": 20.0}, {"name": "Print", "price": 5}]}));
        Service::derive_fields(&mut p);
        assert_eq!(p["addOns"][0]["id"], 1);
        assert_eq!(p["addOns"][1]["id"], 2);
    }

    #[test]
    fn test_blog_patch_recomputes_read_time() {
        let mut p = patch(json!({"content": "<p>hello</p>"}));
        BlogPost::derive_fields(&mut p);
        assert_eq!(p["readTime"], "1 min read");

        let mut untouched = patch(json!({"title": "x"}));
        BlogPost::derive_fields(&mut untouched);
        assert!(!untouched.contains_key("readTime"));
    }

    #[test]
    fn test_only_cities_are_unordered() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.order_key().is_none(), kind == EntityKind::City);
        }
    }
}
