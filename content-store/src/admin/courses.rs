//! Course mutations

use super::report;
use crate::catalog::EntityKind;
use crate::core::ContentStore;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_SLUG_LEN, MAX_URL_LEN,
    validate_optional_text, validate_patch_text, validate_price, validate_rating,
    validate_required_text, validate_text,
};
use serde_json::Map;
use shared::models::{Course, CourseCreate, CourseModule, CourseUpdate};
use shared::{AppError, AppResult, MutationResult};

/// Rating given to a new course when none is supplied
const DEFAULT_RATING: f64 = 5.0;

fn validate_modules(modules: &[CourseModule]) -> AppResult<()> {
    for module in modules {
        validate_required_text(&module.title, "modules.title", MAX_NAME_LEN)?;
        validate_text(&module.lessons, "modules.lessons", MAX_SHORT_TEXT_LEN)?;
        validate_text(&module.duration, "modules.duration", MAX_SHORT_TEXT_LEN)?;
    }
    Ok(())
}

/// External courses link out, so they need a target
fn validate_external(is_external: bool, external_url: Option<&str>) -> AppResult<()> {
    if is_external && external_url.is_none_or(|url| url.trim().is_empty()) {
        return Err(AppError::field(
            "externalUrl",
            "externalUrl is required for external courses",
        ));
    }
    Ok(())
}

fn validate_create(input: &CourseCreate) -> AppResult<()> {
    validate_required_text(&input.title, "title", MAX_NAME_LEN)?;
    validate_optional_text(&input.slug, "slug", MAX_SLUG_LEN)?;
    validate_text(&input.description, "description", MAX_NOTE_LEN)?;
    validate_text(&input.instructor, "instructor", MAX_NAME_LEN)?;
    validate_optional_text(&input.featured_image, "featuredImage", MAX_URL_LEN)?;
    validate_optional_text(&input.external_url, "externalUrl", MAX_URL_LEN)?;
    validate_price(input.price, "price")?;
    validate_rating(input.rating)?;
    validate_modules(&input.modules)?;
    validate_external(input.is_external, input.external_url.as_deref())
}

fn validate_update(update: &CourseUpdate) -> AppResult<()> {
    validate_patch_text(&update.title, "title", MAX_NAME_LEN)?;
    validate_optional_text(&update.slug, "slug", MAX_SLUG_LEN)?;
    validate_optional_text(&update.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&update.instructor, "instructor", MAX_NAME_LEN)?;
    validate_optional_text(&update.featured_image, "featuredImage", MAX_URL_LEN)?;
    validate_optional_text(&update.external_url.clone().flatten(), "externalUrl", MAX_URL_LEN)?;
    validate_price(update.price.flatten(), "price")?;
    validate_rating(update.rating)?;
    if let Some(modules) = &update.modules {
        validate_modules(modules)?;
    }
    Ok(())
}

/// Module ids follow list position, like service add-ons
fn number_modules(modules: &mut [CourseModule]) {
    for (idx, module) in modules.iter_mut().enumerate() {
        module.id = idx as i64 + 1;
    }
}

impl ContentStore {
    pub fn add_course(&self, input: CourseCreate) -> MutationResult<Course> {
        report("add", EntityKind::Course, self.try_add_course(input))
    }

    fn try_add_course(&self, input: CourseCreate) -> AppResult<Course> {
        validate_create(&input)?;

        let customs: Vec<Course> = self.load_customs()?;
        let id = self.allocate_id(&customs)?;
        let slug = self.assign_slug::<Course>(input.slug.as_deref(), &input.title, id);
        let mut modules = input.modules;
        number_modules(&mut modules);

        let course = Course {
            id,
            slug: Some(slug),
            title: input.title,
            description: input.description,
            instructor: input.instructor,
            featured_image: input.featured_image.unwrap_or_default(),
            price: input.price,
            duration: input.duration,
            level: input.level,
            modules,
            rating: input.rating.unwrap_or(DEFAULT_RATING),
            students_enrolled: input.students_enrolled,
            featured: input.featured,
            is_external: input.is_external,
            external_url: input.external_url.filter(|url| !url.trim().is_empty()),
            order: None,
            extra: Map::new(),
        };
        self.insert_custom(customs, course)
    }

    pub fn update_course(&self, id: i64, update: CourseUpdate) -> MutationResult<Course> {
        report("update", EntityKind::Course, self.try_update_course(id, update))
    }

    fn try_update_course(&self, id: i64, mut update: CourseUpdate) -> AppResult<Course> {
        validate_update(&update)?;
        if let Some(modules) = update.modules.as_mut() {
            number_modules(modules);
        }
        if let Some(current) = self.get::<Course>(id) {
            let is_external = update.is_external.unwrap_or(current.is_external);
            let external_url = match &update.external_url {
                Some(url) => url.clone(),
                None => current.external_url,
            };
            validate_external(is_external, external_url.as_deref())?;
        }
        self.patch::<Course, _>(id, &update)
    }

    pub fn delete_course(&self, id: i64) -> MutationResult<()> {
        report("delete", EntityKind::Course, self.remove::<Course>(id))
    }
}
