//! Unified error codes for the content store
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 6xxx: Content errors (services, blog posts, courses, cities, metadata)
//! - 7xxx: Submission errors (inquiries, contacts, signups)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the admin UI can match on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 6xxx: Content ====================
    ServiceNotFound = 6001,
    BlogPostNotFound = 6101,
    CourseNotFound = 6201,
    CityNotFound = 6301,
    ImageNotFound = 6401,
    SchemaNotFound = 6402,

    // ==================== 7xxx: Submissions ====================
    InvalidEmail = 7001,
    AlreadySubscribed = 7002,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
    ConfigError = 9005,

    // ==================== 94xx: Storage ====================
    StorageFull = 9401,
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Content
            ErrorCode::ServiceNotFound => "Service not found",
            ErrorCode::BlogPostNotFound => "Blog post not found",
            ErrorCode::CourseNotFound => "Course not found",
            ErrorCode::CityNotFound => "City not found",
            ErrorCode::ImageNotFound => "Image not found",
            ErrorCode::SchemaNotFound => "Schema data not found",

            // Submissions
            ErrorCode::InvalidEmail => "Email address is invalid",
            ErrorCode::AlreadySubscribed => "Email is already subscribed",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::DatabaseError => "Storage error",
            ErrorCode::ConfigError => "Configuration error",

            // Storage
            ErrorCode::StorageFull => "Storage is full",
            ErrorCode::StorageCorrupted => "Storage corrupted",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Content
            6001 => Ok(ErrorCode::ServiceNotFound),
            6101 => Ok(ErrorCode::BlogPostNotFound),
            6201 => Ok(ErrorCode::CourseNotFound),
            6301 => Ok(ErrorCode::CityNotFound),
            6401 => Ok(ErrorCode::ImageNotFound),
            6402 => Ok(ErrorCode::SchemaNotFound),

            // Submissions
            7001 => Ok(ErrorCode::InvalidEmail),
            7002 => Ok(ErrorCode::AlreadySubscribed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            // Storage
            9401 => Ok(ErrorCode::StorageFull),
            9403 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::ServiceNotFound.code(), 6001);
        assert_eq!(ErrorCode::StorageFull.code(), 9401);
    }

    #[test]
    fn test_error_code_roundtrip_u16() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::CourseNotFound,
            ErrorCode::AlreadySubscribed,
            ErrorCode::StorageFull,
            ErrorCode::StorageCorrupted,
            ErrorCode::ConfigError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(ErrorCode::try_from(1), Err(InvalidErrorCode(1)));
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::NotFound.to_string(), "E0003");
        assert_eq!(ErrorCode::StorageFull.to_string(), "E9401");
    }

    #[test]
    fn test_error_code_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::BlogPostNotFound).unwrap();
        assert_eq!(json, "6101");
        let back: ErrorCode = serde_json::from_str("6101").unwrap();
        assert_eq!(back, ErrorCode::BlogPostNotFound);
    }
}
