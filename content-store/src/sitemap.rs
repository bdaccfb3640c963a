//! Sitemap generation
//!
//! One `<url>` per static route and per resolved service, blog post and
//! city, keyed by slug (or id when there is no slug). Blog posts carry
//! their publication date as `lastmod`; everything else uses today.

use crate::core::ContentStore;
use chrono::NaiveDate;
use shared::ContentItem;
use std::fmt::Write as _;
use std::path::Path;

/// Routes that exist regardless of content
pub const STATIC_ROUTES: &[(&str, &str, &str)] = &[
    ("/", "weekly", "1.0"),
    ("/services", "weekly", "0.9"),
    ("/blog", "daily", "0.8"),
    ("/courses", "weekly", "0.8"),
    ("/cities", "monthly", "0.7"),
    ("/membership", "monthly", "0.7"),
    ("/about", "monthly", "0.6"),
    ("/contact", "monthly", "0.6"),
];

struct SitemapEntry {
    path: String,
    lastmod: String,
    changefreq: &'static str,
    priority: &'static str,
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Post date as `YYYY-MM-DD`, or `today` when missing or unparsable
fn post_lastmod(date: &str, today: &str) -> String {
    let prefix = date.trim().get(..10).unwrap_or("");
    match NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%Y-%m-%d").to_string(),
        Err(_) => today.to_string(),
    }
}

fn entity_path<E: ContentItem>(section: &str, entity: &E) -> String {
    format!("/{}/{}", section, entity.slug_or_id())
}

/// Render the sitemap for the current resolved content
pub fn build_sitemap(content: &ContentStore, base_url: &str, today: NaiveDate) -> String {
    let base = base_url.trim_end_matches('/');
    let today = today.format("%Y-%m-%d").to_string();

    let mut entries: Vec<SitemapEntry> = STATIC_ROUTES
        .iter()
        .map(|&(path, changefreq, priority)| SitemapEntry {
            path: path.to_string(),
            lastmod: today.clone(),
            changefreq,
            priority,
        })
        .collect();

    for service in content.resolve_services() {
        entries.push(SitemapEntry {
            path: entity_path("services", &service),
            lastmod: today.clone(),
            changefreq: "monthly",
            priority: "0.8",
        });
    }
    for post in content.resolve_blog_posts() {
        entries.push(SitemapEntry {
            path: entity_path("blog", &post),
            lastmod: post_lastmod(&post.date, &today),
            changefreq: "monthly",
            priority: "0.7",
        });
    }
    for city in content.resolve_cities() {
        entries.push(SitemapEntry {
            path: entity_path("cities", &city),
            lastmod: today.clone(),
            changefreq: "monthly",
            priority: "0.6",
        });
    }

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in &entries {
        let loc = if entry.path == "/" {
            format!("{}/", base)
        } else {
            format!("{}{}", base, entry.path)
        };
        // Writing into a String cannot fail
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
            escape_xml(&loc),
            entry.lastmod,
            entry.changefreq,
            entry.priority
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Render and write the sitemap, creating parent directories.
///
/// Returns the number of `<url>` entries written.
pub fn write_sitemap(
    path: impl AsRef<Path>,
    content: &ContentStore,
    base_url: &str,
    today: NaiveDate,
) -> std::io::Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let xml = build_sitemap(content, base_url, today);
    std::fs::write(path, &xml)?;
    let count = xml.matches("<url>").count();
    tracing::info!(path = %path.display(), urls = count, "Sitemap written");
    Ok(count)
}
