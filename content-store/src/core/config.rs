use shared::{AppError, AppResult};
use std::path::{Component, Path, PathBuf};
use url::Url;

/// Default quota, matching the per-origin local storage limit browsers apply
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// redb database file under the work directory
    Redb,
    /// Process memory only (nothing survives exit)
    Memory,
}

impl StoreBackend {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "redb" | "file" => Some(Self::Redb),
            "memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Content store configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Directory for the store file and logs |
/// | CONTENT_STORE_BACKEND | redb | `redb` or `memory` |
/// | CONTENT_STORE_FILE | content.redb | Store file name inside WORK_DIR |
/// | STORE_QUOTA_BYTES | 5242880 | Byte limit for keys + values, 0 = unlimited |
/// | SITE_URL | https://example.com | Absolute site origin for the sitemap |
/// | SITEMAP_PATH | public/sitemap.xml | Sitemap output file |
/// | MIGRATE_LEGACY_IDS | true | Rewrite string ids to integers on open |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | (unset) | Daily rolling log files when set |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/var/lib/agency CONTENT_STORE_BACKEND=redb content-admin list services
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub store_backend: StoreBackend,
    pub store_file: String,
    /// `None` means unlimited
    pub quota_bytes: Option<u64>,
    pub site_url: String,
    pub sitemap_path: String,
    pub migrate_legacy_ids: bool,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        let store_backend = match std::env::var("CONTENT_STORE_BACKEND") {
            Ok(raw) => StoreBackend::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "Unknown CONTENT_STORE_BACKEND, using redb");
                StoreBackend::Redb
            }),
            Err(_) => StoreBackend::Redb,
        };
        let quota = std::env::var("STORE_QUOTA_BYTES")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_QUOTA_BYTES);

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            store_backend,
            store_file: std::env::var("CONTENT_STORE_FILE")
                .unwrap_or_else(|_| "content.redb".into()),
            quota_bytes: (quota > 0).then_some(quota),
            site_url: std::env::var("SITE_URL")
                .unwrap_or_else(|_| "https://example.com".into()),
            sitemap_path: std::env::var("SITEMAP_PATH")
                .unwrap_or_else(|_| "public/sitemap.xml".into()),
            migrate_legacy_ids: std::env::var("MIGRATE_LEGACY_IDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// Override the storage location and backend
    ///
    /// Used by tests
    pub fn with_overrides(work_dir: impl Into<String>, store_backend: StoreBackend) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.store_backend = store_backend;
        config
    }

    /// Reject settings that would only fail later, mid-command
    pub fn validate(&self) -> AppResult<()> {
        let site = Url::parse(&self.site_url).map_err(|e| {
            AppError::config(format!("SITE_URL '{}' is not an absolute URL: {}", self.site_url, e))
        })?;
        if !matches!(site.scheme(), "http" | "https") || site.host_str().is_none() {
            return Err(AppError::config(format!(
                "SITE_URL '{}' must be an http(s) origin",
                self.site_url
            )));
        }

        let mut components = Path::new(&self.store_file).components();
        let plain_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !plain_name {
            return Err(AppError::config(format!(
                "CONTENT_STORE_FILE '{}' must be a file name inside WORK_DIR",
                self.store_file
            )));
        }
        Ok(())
    }

    /// Full path of the store file
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.store_file)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_backend_parse() {
        assert_eq!(StoreBackend::parse("redb"), Some(StoreBackend::Redb));
        assert_eq!(StoreBackend::parse(" Memory "), Some(StoreBackend::Memory));
        assert_eq!(StoreBackend::parse("sqlite"), None);
    }

    #[test]
    fn test_validate() {
        let mut config = Config::with_overrides("/tmp/agency", StoreBackend::Memory);
        config.site_url = "https://agency.test".into();
        config.store_file = "content.redb".into();
        assert!(config.validate().is_ok());

        config.site_url = "agency.test".into();
        assert_eq!(config.validate().unwrap_err().code, ErrorCode::ConfigError);
        config.site_url = "mailto:hello@agency.test".into();
        assert_eq!(config.validate().unwrap_err().code, ErrorCode::ConfigError);

        config.site_url = "https://agency.test".into();
        config.store_file = "../content.redb".into();
        assert_eq!(config.validate().unwrap_err().code, ErrorCode::ConfigError);
        config.store_file = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_overrides_and_store_path() {
        let config = Config::with_overrides("/tmp/agency", StoreBackend::Memory);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(
            config.store_path(),
            PathBuf::from("/tmp/agency").join(&config.store_file)
        );
    }
}
