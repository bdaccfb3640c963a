//! Image library entries

use serde::{Deserialize, Serialize};

/// An image known to the admin image library (`allImages`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<String>,
}

/// Where an image in the merged library comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    /// Registered through the image library
    Library,
    Service,
    BlogPost,
    Course,
    City,
}

/// Image library view entry: asset plus where it was found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUsage {
    pub url: String,
    pub alt: String,
    pub sources: Vec<ImageSource>,
}
