//! City mutations

use super::report;
use crate::catalog::EntityKind;
use crate::core::ContentStore;
use crate::utils::validation::{
    MAX_CONTENT_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_SLUG_LEN, MAX_URL_LEN,
    validate_optional_text, validate_patch_text, validate_required_text, validate_text,
};
use shared::image::placeholder_image;
use serde_json::Map;
use shared::models::{City, CityCreate, CityUpdate};
use shared::{AppResult, MutationResult};

fn validate_create(input: &CityCreate) -> AppResult<()> {
    validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&input.slug, "slug", MAX_SLUG_LEN)?;
    validate_text(&input.state, "state", MAX_SHORT_TEXT_LEN)?;
    validate_text(&input.description, "description", MAX_NOTE_LEN)?;
    validate_text(&input.content, "content", MAX_CONTENT_LEN)?;
    validate_optional_text(&input.featured_image, "featuredImage", MAX_URL_LEN)
}

fn validate_update(update: &CityUpdate) -> AppResult<()> {
    validate_patch_text(&update.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&update.slug, "slug", MAX_SLUG_LEN)?;
    validate_optional_text(&update.state, "state", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&update.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&update.content, "content", MAX_CONTENT_LEN)?;
    validate_optional_text(&update.featured_image, "featuredImage", MAX_URL_LEN)
}

impl ContentStore {
    pub fn add_city(&self, input: CityCreate) -> MutationResult<City> {
        report("add", EntityKind::City, self.try_add_city(input))
    }

    fn try_add_city(&self, input: CityCreate) -> AppResult<City> {
        validate_create(&input)?;

        let customs: Vec<City> = self.load_customs()?;
        let id = self.allocate_id(&customs)?;
        let slug = self.assign_slug::<City>(input.slug.as_deref(), &input.name, id);
        let featured_image = input
            .featured_image
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| placeholder_image(&input.name));

        let city = City {
            id,
            slug: Some(slug),
            name: input.name,
            state: input.state,
            description: input.description,
            featured_image,
            services: input.services,
            content: input.content,
            extra: Map::new(),
        };
        self.insert_custom(customs, city)
    }

    pub fn update_city(&self, id: i64, update: CityUpdate) -> MutationResult<City> {
        let result = validate_update(&update).and_then(|_| self.patch::<City, _>(id, &update));
        report("update", EntityKind::City, result)
    }

    pub fn delete_city(&self, id: i64) -> MutationResult<()> {
        report("delete", EntityKind::City, self.remove::<City>(id))
    }
}
