//! End-to-end content lifecycle through the public API

use content_store::storage::keys;
use content_store::{Catalog, ContentStore, KvStore, MemoryStore, OrderEntry, RedbStore};
use serde_json::json;
use shared::models::{
    BlogPost, BlogPostCreate, BlogPostUpdate, CityCreate, CityUpdate, Course, CourseCreate,
    Service, ServiceCreate, ServiceUpdate,
};
use shared::{ErrorCode, generate_slug};
use std::sync::Arc;

fn services(value: serde_json::Value) -> Vec<Service> {
    serde_json::from_value(value).unwrap()
}

fn posts(value: serde_json::Value) -> Vec<BlogPost> {
    serde_json::from_value(value).unwrap()
}

fn memory_store(catalog: Catalog) -> (ContentStore, Arc<MemoryStore>) {
    let backend = Arc::new(MemoryStore::new());
    (ContentStore::new(backend.clone(), catalog), backend)
}

fn poster_catalog() -> Catalog {
    Catalog::empty().with_services(services(json!([
        {"id": 1, "name": "Poster Design", "slug": "poster-design"}
    ])))
}

#[test]
fn deleting_a_default_service_tombstones_it() {
    let (content, backend) = memory_store(poster_catalog());

    let result = content.delete_service(1);
    assert!(result.is_success());
    assert!(content.resolve_services().is_empty());
    assert_eq!(backend.get(keys::DELETED_SERVICE_IDS).unwrap().as_deref(), Some("[1]"));
    // Defaults are never touched
    assert_eq!(content.catalog().services.len(), 1);
}

#[test]
fn deleting_a_custom_service_removes_it_from_the_array() {
    let (content, backend) = memory_store(poster_catalog());
    let added = content.add_service(ServiceCreate {
        name: "Banner Printing".into(),
        ..Default::default()
    });
    let id = added.data.unwrap().id;

    assert!(content.delete_service(id).is_success());
    assert_eq!(backend.get(keys::CUSTOM_SERVICES).unwrap().as_deref(), Some("[]"));
    assert_eq!(backend.get(keys::DELETED_SERVICE_IDS).unwrap(), None);
    assert_eq!(content.resolve_services().len(), 1);
}

#[test]
fn deleting_an_unknown_id_is_not_found() {
    let (content, _) = memory_store(poster_catalog());
    let result = content.delete_service(42);
    assert!(!result.is_success());
    assert_eq!(result.code, Some(ErrorCode::ServiceNotFound));
    assert_eq!(result.error.as_deref(), Some("Service 42 not found"));

    // A default that is already deleted is gone as well
    assert!(content.delete_service(1).is_success());
    assert_eq!(content.delete_service(1).code, Some(ErrorCode::ServiceNotFound));
}

#[test]
fn added_service_round_trips_through_resolver() {
    let (content, _) = memory_store(poster_catalog());
    let input = ServiceCreate {
        name: "Banner Printing".into(),
        description: "Large format banners".into(),
        features: vec!["Vinyl".into(), "Grommets".into()],
        featured_image: Some("https://images.unsplash.com/photo-1".into()),
        general_price: Some(120.0),
        ..Default::default()
    };
    let created = content.add_service(input.clone()).data.unwrap();

    let resolved = content.resolve_services();
    let found = resolved.iter().find(|s| s.id == created.id).unwrap();
    assert_eq!(found.name, input.name);
    assert_eq!(found.description, input.description);
    assert_eq!(found.features, input.features);
    assert_eq!(found.general_price, Some(120.0));
    assert_eq!(found.slug.as_deref(), Some("banner-printing"));
    assert!(created.id > 1_000_000_000_000, "custom ids are epoch milliseconds");
}

#[test]
fn added_service_gets_placeholder_image_and_numbered_add_ons() {
    let (content, _) = memory_store(poster_catalog());
    let input: ServiceCreate = serde_json::from_value(json!({
        "name": "Sticker Printing",
        "addOns": [{"id": 40, "name": "Die cut", "price": 10}, {"name": "Gloss", "price": 5}]
    }))
    .unwrap();
    let service = content.add_service(input).data.unwrap();
    assert!(service.featured_image.starts_with("https://placehold.co/"));
    assert_eq!(service.add_ons.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn duplicate_names_get_distinct_ids_and_suffixed_slugs() {
    let (content, _) = memory_store(Catalog::empty());
    let first = content
        .add_service(ServiceCreate { name: "New Service".into(), ..Default::default() })
        .data
        .unwrap();
    let second = content
        .add_service(ServiceCreate { name: "New Service".into(), ..Default::default() })
        .data
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.slug.as_deref(), Some("new-service"));
    assert_eq!(second.slug.as_deref(), Some("new-service-2"));
}

#[test]
fn update_cannot_reassign_identity() {
    let (content, backend) = memory_store(poster_catalog());
    let update: ServiceUpdate = serde_json::from_value(json!({"id": 999, "name": "foo"})).unwrap();

    let result = content.update_service(1, update);
    assert!(result.is_success());
    let resolved = content.resolve_services();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, 1);
    assert_eq!(resolved[0].name, "foo");

    let stored = backend.get(keys::SERVICE_OVERRIDES).unwrap().unwrap();
    assert!(!stored.contains("999"));
}

#[test]
fn slug_is_stable_unless_name_changes() {
    let (content, _) = memory_store(poster_catalog());

    content.update_service(1, ServiceUpdate {
        description: Some("new".into()),
        ..Default::default()
    });
    assert_eq!(content.resolve_services()[0].slug.as_deref(), Some("poster-design"));

    // Re-sending the same name is not a rename
    content.update_service(1, ServiceUpdate {
        name: Some("Poster Design".into()),
        ..Default::default()
    });
    assert_eq!(content.resolve_services()[0].slug.as_deref(), Some("poster-design"));

    content.update_service(1, ServiceUpdate {
        name: Some("Brand New Name".into()),
        ..Default::default()
    });
    let service = content.resolve_services().remove(0);
    assert_eq!(service.slug, Some(generate_slug("Brand New Name")));
    assert_eq!(service.description, "new");
}

#[test]
fn explicit_slug_wins_over_rename() {
    let (content, _) = memory_store(poster_catalog());
    let result = content.update_service(1, ServiceUpdate {
        name: Some("Brand New Name".into()),
        slug: Some("Custom Slug".into()),
        ..Default::default()
    });
    assert_eq!(result.data.unwrap().slug.as_deref(), Some("custom-slug"));
}

#[test]
fn custom_entities_are_patched_in_place() {
    let (content, backend) = memory_store(poster_catalog());
    let created = content
        .add_city(CityCreate { name: "Boise".into(), state: "ID".into(), ..Default::default() })
        .data
        .unwrap();

    let updated = content
        .update_city(created.id, CityUpdate { description: Some("Treasure Valley".into()), ..Default::default() })
        .data
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.description, "Treasure Valley");
    assert_eq!(updated.slug.as_deref(), Some("boise"));
    // Custom entities never go through the override map
    assert_eq!(backend.get(keys::CITY_OVERRIDES).unwrap(), None);
}

#[test]
fn blog_content_updates_recompute_read_time() {
    let (content, _) = memory_store(Catalog::empty());
    let post = content
        .add_blog_post(BlogPostCreate {
            title: "Print Ready Files".into(),
            content: "<p>short</p>".into(),
            date: Some("2024-06-10".into()),
            ..Default::default()
        })
        .data
        .unwrap();
    assert_eq!(post.read_time, "1 min read");
    assert_eq!(post.date, "2024-06-10");

    let long = format!("<p>{}</p>", vec!["word"; 650].join(" "));
    let updated = content
        .update_blog_post(post.id, BlogPostUpdate { content: Some(long), ..Default::default() })
        .data
        .unwrap();
    assert_eq!(updated.read_time, "4 min read");
}

#[test]
fn update_blog_order_only_annotates_listed_posts() {
    let catalog = Catalog::empty().with_blog_posts(posts(json!([
        {"id": 8, "title": "Eight"},
        {"id": 9, "title": "Nine"},
        {"id": 10, "title": "Ten"}
    ])));
    let (content, _) = memory_store(catalog);

    let result = content.update_blog_order(&[OrderEntry::new(9, 2), OrderEntry::new(10, 1)]);
    assert!(result.is_success());

    let resolved = content.resolve_blog_posts();
    let order_of = |id: i64| resolved.iter().find(|p| p.id == id).unwrap().order;
    assert_eq!(order_of(9), Some(2));
    assert_eq!(order_of(10), Some(1));
    assert_eq!(order_of(8), None);
    // Annotation only; array order is unchanged
    assert_eq!(resolved.iter().map(|p| p.id).collect::<Vec<_>>(), vec![8, 9, 10]);
}

#[test]
fn deleted_course_is_pruned_from_saved_courses() {
    let (content, backend) = memory_store(Catalog::builtin());
    let course = content
        .add_course(CourseCreate {
            title: "Print Production".into(),
            rating: Some(4.5),
            ..Default::default()
        })
        .data
        .unwrap();
    let saved = json!([1, course.id.to_string(), {"id": course.id}]).to_string();
    backend.set(keys::SAVED_COURSES, &saved).unwrap();
    content.update_course_order(&[OrderEntry::new(course.id, 1)]);

    assert!(content.delete_course(course.id).is_success());
    assert_eq!(backend.get(keys::SAVED_COURSES).unwrap().as_deref(), Some("[1]"));
    assert_eq!(backend.get(keys::COURSE_ORDER).unwrap().as_deref(), Some("{}"));
    assert!(content.resolve_courses().iter().all(|c: &Course| c.id != course.id));
}

#[test]
fn validation_failures_do_not_write() {
    let (content, backend) = memory_store(poster_catalog());
    let result = content.add_service(ServiceCreate { name: "  ".into(), ..Default::default() });
    assert!(!result.is_success());
    assert_eq!(result.code, Some(ErrorCode::ValidationFailed));
    assert!(backend.keys().unwrap().is_empty());

    let external = content.add_course(CourseCreate {
        title: "Partner Course".into(),
        is_external: true,
        ..Default::default()
    });
    assert_eq!(external.code, Some(ErrorCode::ValidationFailed));
}

#[test]
fn corrupt_storage_behaves_like_absent_keys() {
    let (content, backend) = memory_store(Catalog::builtin());
    let defaults = content.resolve_services();
    for key in keys::ALL_KEYS {
        backend.set(key, "{not json").unwrap();
    }
    assert_eq!(content.resolve_services(), defaults);
    assert_eq!(content.resolve_blog_posts(), content.catalog().blog_posts);
    assert_eq!(content.resolve_courses(), content.catalog().courses);
    assert_eq!(content.resolve_cities(), content.catalog().cities);
}

#[test]
fn quota_exhaustion_is_reported_as_storage_full() {
    let content = ContentStore::new(Arc::new(MemoryStore::with_quota(64)), Catalog::empty());
    let result = content.add_service(ServiceCreate {
        name: "A service with a long enough description".into(),
        description: "x".repeat(200),
        ..Default::default()
    });
    assert!(result.is_storage_full());
    assert_eq!(result.code, Some(ErrorCode::StorageFull));
    assert!(content.resolve_services().is_empty());
}

#[test]
fn redb_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.redb");

    let id = {
        let store = Arc::new(RedbStore::open(&path, None).unwrap());
        let content = ContentStore::new(store, poster_catalog());
        assert!(content.delete_service(1).is_success());
        content
            .add_service(ServiceCreate { name: "Banner Printing".into(), ..Default::default() })
            .data
            .unwrap()
            .id
    };

    let store = Arc::new(RedbStore::open(&path, None).unwrap());
    let content = ContentStore::new(store, poster_catalog());
    let resolved = content.resolve_services();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, id);
    assert_eq!(resolved[0].slug.as_deref(), Some("banner-printing"));
}

/// Memory and file-backed redb stores, each with the temp dir it lives in
fn each_backend() -> Vec<(&'static str, Arc<dyn KvStore>, Option<tempfile::TempDir>)> {
    let dir = tempfile::tempdir().unwrap();
    let memory: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    let redb: Arc<dyn KvStore> =
        Arc::new(RedbStore::open(dir.path().join("content.redb"), None).unwrap());
    vec![("memory", memory, None), ("redb", redb, Some(dir))]
}

fn stored_customs(backend: &Arc<dyn KvStore>) -> serde_json::Value {
    let raw = backend.get(keys::CUSTOM_SERVICES).unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn fields_without_a_model_field_survive_rewrites() {
    for (name, backend, _dir) in each_backend() {
        backend
            .set(
                keys::CUSTOM_SERVICES,
                r#"[{"id":1700000000000,"name":"Legacy","icon":"star","shortDescription":"keep me"}]"#,
            )
            .unwrap();
        let content = ContentStore::new(backend.clone(), poster_catalog());

        let updated = content.update_service(
            1_700_000_000_000,
            ServiceUpdate { description: Some("x".into()), ..Default::default() },
        );
        assert!(updated.is_success(), "{name}");
        let stored = stored_customs(&backend);
        assert_eq!(stored[0]["description"], "x", "{name}");
        assert_eq!(stored[0]["icon"], "star", "{name}");
        assert_eq!(stored[0]["shortDescription"], "keep me", "{name}");

        // Appending and removing other entries rewrites the array too
        let added = content
            .add_service(ServiceCreate { name: "Fresh".into(), ..Default::default() })
            .data
            .unwrap();
        assert!(content.delete_service(added.id).is_success(), "{name}");
        let stored = stored_customs(&backend);
        assert_eq!(stored.as_array().unwrap().len(), 1, "{name}");
        assert_eq!(stored[0]["icon"], "star", "{name}");

        // Override keys without a model field reach the resolved default
        backend.set(keys::SERVICE_OVERRIDES, r#"{"1":{"icon":"brush"}}"#).unwrap();
        assert!(
            content
                .update_service(1, ServiceUpdate { featured: Some(true), ..Default::default() })
                .is_success(),
            "{name}"
        );
        let poster = content.get::<Service>(1).unwrap();
        assert!(poster.featured, "{name}");
        assert_eq!(poster.extra.get("icon"), Some(&json!("brush")), "{name}");
    }
}

#[test]
fn undecodable_custom_array_is_never_overwritten() {
    let corrupt = r#"[{"id":1700000000000,"name":"Good One"},{"id":1700000000001,"name":"Priced","membershipPrice":"49"}]"#;
    for (name, backend, _dir) in each_backend() {
        backend.set(keys::CUSTOM_SERVICES, corrupt).unwrap();
        let content = ContentStore::new(backend.clone(), poster_catalog());

        // Reads fall back to the defaults alone
        assert_eq!(content.resolve_services().len(), 1, "{name}");

        let add = content.add_service(ServiceCreate { name: "New".into(), ..Default::default() });
        assert_eq!(add.code, Some(ErrorCode::StorageCorrupted), "{name}");
        let update = content.update_service(1, ServiceUpdate { featured: Some(true), ..Default::default() });
        assert_eq!(update.code, Some(ErrorCode::StorageCorrupted), "{name}");
        let delete = content.delete_service(1);
        assert_eq!(delete.code, Some(ErrorCode::StorageCorrupted), "{name}");

        assert_eq!(backend.get(keys::CUSTOM_SERVICES).unwrap().as_deref(), Some(corrupt), "{name}");
        assert_eq!(backend.get(keys::SERVICE_OVERRIDES).unwrap(), None, "{name}");
        assert_eq!(backend.get(keys::DELETED_SERVICE_IDS).unwrap(), None, "{name}");
    }
}

#[test]
fn undecodable_tombstones_block_deletion() {
    for (name, backend, _dir) in each_backend() {
        backend.set(keys::DELETED_SERVICE_IDS, r#"[5, {"bad": true}]"#).unwrap();
        let content = ContentStore::new(backend.clone(), poster_catalog());

        let delete = content.delete_service(1);
        assert_eq!(delete.code, Some(ErrorCode::StorageCorrupted), "{name}");
        assert_eq!(
            backend.get(keys::DELETED_SERVICE_IDS).unwrap().as_deref(),
            Some(r#"[5, {"bad": true}]"#),
            "{name}"
        );

        // An absent key is simply empty: the first add on a clean key works
        let add = content.add_service(ServiceCreate { name: "New".into(), ..Default::default() });
        assert!(add.is_success(), "{name}");
        assert_eq!(stored_customs(&backend)[0]["name"], "New", "{name}");
    }
}
