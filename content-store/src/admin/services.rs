//! Service mutations

use super::{not_found, report};
use crate::catalog::{ContentEntity, EntityKind};
use crate::core::ContentStore;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SLUG_LEN, MAX_URL_LEN, validate_optional_text,
    validate_patch_text, validate_price, validate_required_text, validate_text,
};
use shared::image::placeholder_image;
use serde_json::Map;
use shared::models::{AddOn, Service, ServiceCreate, ServiceUpdate, number_add_ons};
use shared::{AppResult, MutationResult};

fn validate_add_ons(add_ons: &[AddOn]) -> AppResult<()> {
    for add_on in add_ons {
        validate_required_text(&add_on.name, "addOns.name", MAX_NAME_LEN)?;
        validate_price(Some(add_on.price), "addOns.price")?;
    }
    Ok(())
}

fn validate_create(input: &ServiceCreate) -> AppResult<()> {
    validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&input.slug, "slug", MAX_SLUG_LEN)?;
    validate_text(&input.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&input.featured_image, "featuredImage", MAX_URL_LEN)?;
    validate_price(input.membership_price, "membershipPrice")?;
    validate_price(input.general_price, "generalPrice")?;
    validate_add_ons(&input.add_ons)
}

fn validate_update(update: &ServiceUpdate) -> AppResult<()> {
    validate_patch_text(&update.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&update.slug, "slug", MAX_SLUG_LEN)?;
    validate_optional_text(&update.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&update.featured_image, "featuredImage", MAX_URL_LEN)?;
    validate_price(update.membership_price.flatten(), "membershipPrice")?;
    validate_price(update.general_price.flatten(), "generalPrice")?;
    if let Some(add_ons) = &update.add_ons {
        validate_add_ons(add_ons)?;
    }
    Ok(())
}

impl ContentStore {
    pub fn add_service(&self, input: ServiceCreate) -> MutationResult<Service> {
        report("add", EntityKind::Service, self.try_add_service(input))
    }

    fn try_add_service(&self, input: ServiceCreate) -> AppResult<Service> {
        validate_create(&input)?;

        let customs: Vec<Service> = self.load_customs()?;
        let id = self.allocate_id(&customs)?;
        let slug = self.assign_slug::<Service>(input.slug.as_deref(), &input.name, id);
        let featured_image = input
            .featured_image
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| placeholder_image(&input.name));
        let mut add_ons = input.add_ons;
        number_add_ons(&mut add_ons);

        let service = Service {
            id,
            slug: Some(slug),
            name: input.name,
            description: input.description,
            category: input.category,
            featured_image,
            features: input.features,
            add_ons,
            featured: input.featured,
            membership_price: input.membership_price,
            general_price: input.general_price,
            order: None,
            extra: Map::new(),
        };
        self.insert_custom(customs, service)
    }

    pub fn update_service(&self, id: i64, update: ServiceUpdate) -> MutationResult<Service> {
        let result = validate_update(&update).and_then(|_| self.patch::<Service, _>(id, &update));
        report("update", EntityKind::Service, result)
    }

    pub fn delete_service(&self, id: i64) -> MutationResult<()> {
        report("delete", EntityKind::Service, self.remove::<Service>(id))
    }

    /// Resolved service or a `ServiceNotFound` error
    pub(crate) fn require_service(&self, id: i64) -> AppResult<Service> {
        self.get::<Service>(id)
            .ok_or_else(|| not_found(Service::KIND, id))
    }
}
