//! Storage key names
//!
//! These are the exact keys existing browser data lives under; they must not
//! change.

// Services
pub const CUSTOM_SERVICES: &str = "customServices";
pub const SERVICE_OVERRIDES: &str = "serviceOverrides";
pub const DELETED_SERVICE_IDS: &str = "deletedServiceIds";
pub const SERVICE_ORDER: &str = "serviceOrder";

// Blog posts
pub const CUSTOM_BLOG_POSTS: &str = "customBlogPosts";
pub const BLOG_OVERRIDES: &str = "blogOverrides";
pub const DELETED_BLOG_IDS: &str = "deletedBlogIds";
pub const BLOG_ORDER: &str = "blogOrder";

// Courses
pub const CUSTOM_COURSES: &str = "customCourses";
pub const COURSE_OVERRIDES: &str = "courseOverrides";
pub const DELETED_COURSE_IDS: &str = "deletedCourseIds";
/// Added for course ordering; not present in older data
pub const COURSE_ORDER: &str = "courseOrder";

// Cities
pub const CUSTOM_CITIES: &str = "customCities";
pub const CITY_OVERRIDES: &str = "cityOverrides";
pub const DELETED_CITY_IDS: &str = "deletedCityIds";

// Visitor state
pub const SAVED_COURSES: &str = "savedCourses";
pub const CART_ITEMS: &str = "cartItems";
pub const ADMIN_SESSION: &str = "adminSession";

// Metadata
pub const SCHEMA_DATA: &str = "schemaData";
pub const SERVICE_SCHEMA_DATA: &str = "serviceSchemaData";
pub const IMAGE_ALT_TAGS: &str = "imageAltTags";
pub const ALL_IMAGES: &str = "allImages";

// Form submissions
pub const INQUIRIES: &str = "inquiries";
pub const MEMBERSHIP_SIGNUPS: &str = "membershipSignups";
pub const NEWSLETTER_SIGNUPS: &str = "newsletterSignups";
pub const CONTACTS: &str = "contacts";

/// Every key the content layer knows about (used by export)
pub const ALL_KEYS: &[&str] = &[
    CUSTOM_SERVICES,
    SERVICE_OVERRIDES,
    DELETED_SERVICE_IDS,
    SERVICE_ORDER,
    CUSTOM_BLOG_POSTS,
    BLOG_OVERRIDES,
    DELETED_BLOG_IDS,
    BLOG_ORDER,
    CUSTOM_COURSES,
    COURSE_OVERRIDES,
    DELETED_COURSE_IDS,
    COURSE_ORDER,
    CUSTOM_CITIES,
    CITY_OVERRIDES,
    DELETED_CITY_IDS,
    SAVED_COURSES,
    CART_ITEMS,
    ADMIN_SESSION,
    SCHEMA_DATA,
    SERVICE_SCHEMA_DATA,
    IMAGE_ALT_TAGS,
    ALL_IMAGES,
    INQUIRIES,
    MEMBERSHIP_SIGNUPS,
    NEWSLETTER_SIGNUPS,
    CONTACTS,
];
