//! Slug generation and entity lookup

use crate::models::ContentItem;
use crate::models::serde_helpers::parse_leading_int;

/// Maximum slug length in characters
pub const MAX_SLUG_LEN: usize = 100;

/// Derive a URL-safe slug from a display name or title.
///
/// Empty input yields an empty string; callers treat that as "no slug" and
/// fall back to an id-based identifier.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.trim().to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut last_hyphen = false;
    let mut in_whitespace = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            in_whitespace = true;
            continue;
        }
        if in_whitespace {
            in_whitespace = false;
            if !last_hyphen {
                slug.push('-');
                last_hyphen = true;
            }
        }
        if c == '-' {
            if !last_hyphen {
                slug.push('-');
                last_hyphen = true;
            }
        } else if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_hyphen = false;
        }
    }

    let trimmed = slug.trim_matches('-');
    let truncated: String = trimmed.chars().take(MAX_SLUG_LEN).collect();
    truncated.trim_end_matches('-').to_string()
}

/// Slug for an entity with an id fallback (`"service-17"`) when the name
/// produces nothing usable
pub fn slug_or_fallback(name: &str, prefix: &str, id: i64) -> String {
    let slug = generate_slug(name);
    if slug.is_empty() {
        format!("{}-{}", prefix, id)
    } else {
        slug
    }
}

/// Find the first entity whose slug matches.
///
/// Entities without a stored slug are compared against a slug computed from
/// their display name, so content created before slugs existed still
/// resolves.
pub fn find_by_slug<'a, T: ContentItem>(items: &'a [T], slug: &str) -> Option<&'a T> {
    items.iter().find(|item| match item.slug().filter(|s| !s.is_empty()) {
        Some(stored) => stored == slug,
        None => generate_slug(item.display_name()) == slug,
    })
}

/// Id argument for [`find_by_id`]: route params arrive as strings, admin
/// calls pass integers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdRef<'a> {
    Int(i64),
    Str(&'a str),
}

impl From<i64> for IdRef<'_> {
    fn from(id: i64) -> Self {
        IdRef::Int(id)
    }
}

impl<'a> From<&'a str> for IdRef<'a> {
    fn from(id: &'a str) -> Self {
        IdRef::Str(id)
    }
}

impl<'a> From<&'a String> for IdRef<'a> {
    fn from(id: &'a String) -> Self {
        IdRef::Str(id.as_str())
    }
}

impl IdRef<'_> {
    /// Leading-integer normalization (`"42"` and `"42-poster"` both give 42)
    pub fn normalize(&self) -> Option<i64> {
        match self {
            IdRef::Int(id) => Some(*id),
            IdRef::Str(raw) => parse_leading_int(raw),
        }
    }
}

/// Find an entity by id, tolerating string ids.
///
/// Compatibility shim: ids are normalized to `i64` when content is decoded,
/// so integer equality is the only comparison new code needs. The string
/// comparison remains for route parameters and old callers; do not extend it.
pub fn find_by_id<'a, 'b, T: ContentItem>(
    items: &'a [T],
    id: impl Into<IdRef<'b>>,
) -> Option<&'a T> {
    let id = id.into();
    let normalized = id.normalize();
    items.iter().find(|item| {
        Some(item.id()) == normalized
            || matches!(id, IdRef::Str(raw) if raw.trim() == item.id().to_string())
    })
}

/// Resolve a route segment that may be either a slug or an id
pub fn find_by_slug_or_id<'a, T: ContentItem>(items: &'a [T], segment: &str) -> Option<&'a T> {
    find_by_slug(items, segment).or_else(|| {
        // Only segments that are entirely numeric are treated as ids here;
        // "3-day-workshop" is a slug, not id 3.
        if segment.trim().chars().all(|c| c.is_ascii_digit()) {
            find_by_id(items, segment)
        } else {
            None
        }
    })
}
