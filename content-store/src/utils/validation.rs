//! Input validation helpers
//!
//! Length limits and field checks applied by the admin API and the form
//! submission handlers before anything is written.

use shared::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names and titles
pub const MAX_NAME_LEN: usize = 200;

/// Slugs as supplied by the admin (normalized slugs are capped at 100)
pub const MAX_SLUG_LEN: usize = 200;

/// Short descriptions, excerpts, form messages
pub const MAX_NOTE_LEN: usize = 5000;

/// Blog and city page bodies (HTML)
pub const MAX_CONTENT_LEN: usize = 200_000;

/// Short identifiers: phone numbers, plan names, categories
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::field(field, format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::field(
            field,
            format!("{field} is too long ({} chars, max {max_len})", value.len()),
        ));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::field(
            field,
            format!("{field} is too long ({} chars, max {max_len})", v.len()),
        ));
    }
    Ok(())
}

/// Validate a text field that may be empty but not oversized.
pub fn validate_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.len() > max_len {
        return Err(AppError::field(
            field,
            format!("{field} is too long ({} chars, max {max_len})", value.len()),
        ));
    }
    Ok(())
}

/// Validate an optional text patch field: present values must be non-empty.
pub fn validate_patch_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_required_text(v, field, max_len),
        None => Ok(()),
    }
}

/// Validate a price: finite and not negative.
pub fn validate_price(value: Option<f64>, field: &str) -> Result<(), AppError> {
    if let Some(price) = value
        && (!price.is_finite() || price < 0.0)
    {
        return Err(AppError::field(field, format!("{field} must be a non-negative number")));
    }
    Ok(())
}

/// Validate a course rating (1 to 5 inclusive).
pub fn validate_rating(value: Option<f64>) -> Result<(), AppError> {
    if let Some(rating) = value
        && !(1.0..=5.0).contains(&rating)
    {
        return Err(AppError::field("rating", "rating must be between 1 and 5"));
    }
    Ok(())
}

/// Minimal email shape check: one `@`, non-empty local part, dotted domain.
pub fn validate_email(value: &str) -> Result<(), AppError> {
    let email = value.trim();
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
                && domain
                    .split('.')
                    .filter(|part| !part.is_empty())
                    .count()
                    >= 2
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(AppError::with_message(
            shared::ErrorCode::InvalidEmail,
            format!("'{email}' is not a valid email address"),
        )
        .with_detail("field", "email"));
    }
    Ok(())
}
