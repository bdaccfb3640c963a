//! Blog Post Model

use super::serde_helpers;
use super::ContentItem;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reading speed used for the derived `readTime` label
pub const WORDS_PER_MINUTE: usize = 200;

/// Derive the `readTime` label from post content.
///
/// Tags are stripped before counting words; the result is never below one
/// minute.
pub fn read_time_for(content: &str) -> String {
    let mut text = String::with_capacity(content.len());
    let mut in_tag = false;
    for c in content.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{} min read", minutes)
}

/// Blog post entity
///
/// `content` is trusted HTML and rendered unescaped by the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(deserialize_with = "serde_helpers::flexible_id")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    /// ISO date (`YYYY-MM-DD`)
    #[serde(default)]
    pub date: String,
    /// Derived from `content`, see [`read_time_for`]
    #[serde(default)]
    pub read_time: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured_image: String,
    #[serde(default)]
    pub featured: bool,
    /// Multi-part tutorial series this post belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Fields this model does not know about, kept verbatim on rewrite
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentItem for BlogPost {
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

/// Create blog post payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostCreate {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    /// Defaults to today when absent
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
}

/// Update blog post payload (partial patch, no `id`, no `readTime`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub series: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_time_minimum_one_minute() {
        assert_eq!(read_time_for(""), "1 min read");
        assert_eq!(read_time_for("<p>Short post.</p>"), "1 min read");
    }

    #[test]
    fn test_read_time_counts_words_not_markup() {
        let words = vec!["word"; 401].join(" ");
        let html = format!("<div class=\"prose\"><p>{}</p></div>", words);
        assert_eq!(read_time_for(&html), "3 min read");
    }

    #[test]
    fn test_read_time_tag_boundaries_split_words() {
        // "one<br>two" is two words once the tag is removed
        let content = vec!["one<br>two"; 150].join(" ");
        assert_eq!(read_time_for(&content), "2 min read");
    }
}
