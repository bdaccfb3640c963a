//! Image URL helpers
//!
//! Images hosted on the CDN are resized through query parameters
//! (`w`, `q`, `auto=format`, `fit=crop`). Anything else (relative paths,
//! `data:` URLs, other hosts) is served as-is.

use url::Url;

/// Hosts that understand the resize query convention
pub const CDN_HOSTS: &[&str] = &["images.unsplash.com", "plus.unsplash.com"];

/// Parameters owned by the resize convention; replaced, never duplicated
const RESIZE_PARAMS: &[&str] = &["w", "q", "auto", "fit", "fm"];

/// Requested rendition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageOptions {
    pub width: u32,
    pub quality: u8,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            width: 800,
            quality: 80,
        }
    }
}

impl ImageOptions {
    pub fn new(width: u32, quality: u8) -> Self {
        Self {
            width,
            quality: quality.clamp(1, 100),
        }
    }
}

/// Parsed URL when it is an absolute http(s) URL on a resizing CDN host.
///
/// `Url` lowercases the scheme and host and drops the default port, so
/// `HTTPS://Images.Unsplash.com:443/...` is recognised like the plain form.
fn cdn_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?;
    CDN_HOSTS.contains(&host).then_some(url)
}

/// Whether the URL points at a CDN host that supports resizing
pub fn is_cdn_url(url: &str) -> bool {
    cdn_url(url).is_some()
}

/// Rewrite a CDN image URL to the requested width and quality.
///
/// Existing query parameters other than the resize ones are preserved in
/// their original order; a `#fragment` is kept at the end.
pub fn optimize_image_url(raw: &str, options: &ImageOptions) -> String {
    let Some(mut url) = cdn_url(raw) else {
        return raw.to_string();
    };

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !RESIZE_PARAMS.contains(&&**key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("w", &options.width.to_string())
        .append_pair("q", &options.quality.to_string())
        .append_pair("auto", "format")
        .append_pair("fit", "crop");
    url.into()
}

/// `srcset` attribute value for a set of widths.
///
/// Non-CDN URLs cannot be resized, so they yield a single candidate.
pub fn responsive_srcset(url: &str, widths: &[u32], quality: u8) -> String {
    if !is_cdn_url(url) || widths.is_empty() {
        return url.to_string();
    }
    widths
        .iter()
        .map(|w| {
            format!(
                "{} {}w",
                optimize_image_url(url, &ImageOptions::new(*w, quality)),
                w
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Placeholder used when a service or city is saved without an image
pub fn placeholder_image(label: &str) -> String {
    let text: String = label
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("+");
    if text.is_empty() {
        "https://placehold.co/800x600".to_string()
    } else {
        format!("https://placehold.co/800x600?text={}", text)
    }
}
