//! City Model

use super::serde_helpers;
use super::ContentItem;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// City landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    #[serde(deserialize_with = "serde_helpers::flexible_id")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured_image: String,
    /// Service category names shown on the page (plain labels, not ids)
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub content: String,
    /// Fields this model does not know about, kept verbatim on rewrite
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentItem for City {
    fn id(&self) -> i64 {
        self.id
    }

    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn featured_image(&self) -> Option<&str> {
        Some(self.featured_image.as_str()).filter(|s| !s.is_empty())
    }
}

/// Create city payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityCreate {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub content: String,
}

/// Update city payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
