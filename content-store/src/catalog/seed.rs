//! Built-in seed content

use serde::de::DeserializeOwned;
use shared::models::{BlogPost, City, Course, Service};

const SERVICES_JSON: &str = include_str!("../../seed/services.json");
const BLOG_POSTS_JSON: &str = include_str!("../../seed/blog_posts.json");
const COURSES_JSON: &str = include_str!("../../seed/courses.json");
const CITIES_JSON: &str = include_str!("../../seed/cities.json");

/// Default content per entity type; never mutated after construction
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub services: Vec<Service>,
    pub blog_posts: Vec<BlogPost>,
    pub courses: Vec<Course>,
    pub cities: Vec<City>,
}

fn parse_seed<T: DeserializeOwned>(name: &str, json: &str) -> Vec<T> {
    match serde_json::from_str(json) {
        Ok(items) => items,
        Err(e) => {
            tracing::error!(seed = name, error = %e, "Built-in seed content failed to parse");
            Vec::new()
        }
    }
}

impl Catalog {
    /// The defaults shipped with the site
    pub fn builtin() -> Self {
        Self {
            services: parse_seed("services", SERVICES_JSON),
            blog_posts: parse_seed("blog_posts", BLOG_POSTS_JSON),
            courses: parse_seed("courses", COURSES_JSON),
            cities: parse_seed("cities", CITIES_JSON),
        }
    }

    /// No defaults at all
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_services(mut self, services: Vec<Service>) -> Self {
        self.services = services;
        self
    }

    pub fn with_blog_posts(mut self, blog_posts: Vec<BlogPost>) -> Self {
        self.blog_posts = blog_posts;
        self
    }

    pub fn with_courses(mut self, courses: Vec<Course>) -> Self {
        self.courses = courses;
        self
    }

    pub fn with_cities(mut self, cities: Vec<City>) -> Self {
        self.cities = cities;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ContentItem;
    use std::collections::HashSet;

    fn assert_unique<T: ContentItem>(items: &[T]) {
        let ids: HashSet<i64> = items.iter().map(|i| i.id()).collect();
        assert_eq!(ids.len(), items.len(), "duplicate seed id");
        let slugs: HashSet<&str> = items.iter().filter_map(|i| i.slug()).collect();
        assert_eq!(slugs.len(), items.len(), "missing or duplicate seed slug");
    }

    #[test]
    fn test_builtin_seeds_parse() {
        let catalog = Catalog::builtin();
        assert!(!catalog.services.is_empty());
        assert!(!catalog.blog_posts.is_empty());
        assert!(!catalog.courses.is_empty());
        assert!(!catalog.cities.is_empty());
    }

    #[test]
    fn test_builtin_seeds_have_unique_small_ids_and_slugs() {
        let catalog = Catalog::builtin();
        assert_unique(&catalog.services);
        assert_unique(&catalog.blog_posts);
        assert_unique(&catalog.courses);
        assert_unique(&catalog.cities);

        // Default ids stay far below any epoch-millisecond custom id
        assert!(catalog.services.iter().all(|s| s.id < 1_000_000));
        assert!(catalog.blog_posts.iter().all(|p| p.id < 1_000_000));
    }

    #[test]
    fn test_builtin_slugs_match_generated() {
        let catalog = Catalog::builtin();
        for service in &catalog.services {
            assert_eq!(
                service.slug.as_deref(),
                Some(shared::generate_slug(&service.name).as_str())
            );
        }
    }
}
