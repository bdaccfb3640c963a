//! Course Model

use super::serde_helpers;
use super::ContentItem;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Course module (lesson count and duration are free-form labels)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseModule {
    #[serde(default, deserialize_with = "serde_helpers::flexible_id")]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub lessons: String,
    #[serde(default)]
    pub duration: String,
}

/// Course entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(deserialize_with = "serde_helpers::flexible_id")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub featured_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub modules: Vec<CourseModule>,
    /// 1–5
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub students_enrolled: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Fields this model does not know about, kept verbatim on rewrite
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentItem for Course {
    fn id(&self) -> i64 {
        self.id
    }

    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn featured_image(&self) -> Option<&str> {
        Some(self.featured_image.as_str()).filter(|s| !s.is_empty())
    }
}

/// Create course payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCreate {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub modules: Vec<CourseModule>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub students_enrolled: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default)]
    pub external_url: Option<String>,
}

/// Update course payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<CourseModule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students_enrolled: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_external: Option<bool>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub external_url: Option<Option<String>>,
}
