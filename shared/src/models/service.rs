//! Service Model

use super::serde_helpers;
use super::ContentItem;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Service category (fixed set; unknown values are kept verbatim)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceCategory {
    #[default]
    Design,
    Printing,
    WebDevelopment,
    DigitalMarketing,
    Branding,
    Video,
    Photography,
    Other(String),
}

impl ServiceCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Design => "design",
            Self::Printing => "printing",
            Self::WebDevelopment => "web-development",
            Self::DigitalMarketing => "digital-marketing",
            Self::Branding => "branding",
            Self::Video => "video",
            Self::Photography => "photography",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for ServiceCategory {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "design" => Self::Design,
            "printing" => Self::Printing,
            "web-development" => Self::WebDevelopment,
            "digital-marketing" => Self::DigitalMarketing,
            "branding" => Self::Branding,
            "video" => Self::Video,
            "photography" => Self::Photography,
            _ => Self::Other(raw),
        }
    }
}

impl From<ServiceCategory> for String {
    fn from(category: ServiceCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purchasable add-on; `id` is scoped to the parent service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOn {
    #[serde(default, deserialize_with = "serde_helpers::flexible_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub price: f64,
}

/// Renumber add-ons `1..n` in list order.
///
/// Add-on ids are derived, never chosen by the caller; every write path that
/// touches `addOns` goes through here.
pub fn number_add_ons(add_ons: &mut [AddOn]) {
    for (idx, add_on) in add_ons.iter_mut().enumerate() {
        add_on.id = idx as i64 + 1;
    }
}

/// Service entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(deserialize_with = "serde_helpers::flexible_id")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: ServiceCategory,
    #[serde(default)]
    pub featured_image: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_price: Option<f64>,
    /// Manual sort position (annotated from the order map, never sorted on)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Fields this model does not know about, kept verbatim on rewrite
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentItem for Service {
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

/// Create service payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCreate {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: ServiceCategory,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub membership_price: Option<f64>,
    #[serde(default)]
    pub general_price: Option<f64>,
}

/// Update service payload
///
/// Serialized with absent fields skipped, this is exactly the partial patch
/// stored in the override map. There is deliberately no `id` field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ServiceCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_ons: Option<Vec<AddOn>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub membership_price: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub general_price: Option<Option<f64>>,
}
