//! `content-admin` command line
//!
//! Thin layer over the library: every command resolves or mutates through
//! [`ContentStore`] and prints JSON on stdout. Payloads are given inline or
//! as `@path/to/file.json`.

use crate::catalog::EntityKind;
use crate::core::{Config, ContentStore, StoreBackend};
use crate::admin::OrderEntry;
use crate::sitemap::write_sitemap;
use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::MutationResult;
use shared::models::{
    BlogPost, BlogPostCreate, BlogPostUpdate, City, CityCreate, CityUpdate, Course, CourseCreate,
    CourseUpdate, Service, ServiceCreate, ServiceUpdate,
};

#[derive(Debug, Parser)]
#[command(name = "content-admin", version, about = "Manage agency site content")]
pub struct Cli {
    /// Directory holding the store file (overrides WORK_DIR)
    #[arg(long, global = true, env = "WORK_DIR")]
    pub work_dir: Option<String>,

    /// Storage backend (overrides CONTENT_STORE_BACKEND)
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Redb,
    Memory,
}

impl From<BackendArg> for StoreBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Redb => StoreBackend::Redb,
            BackendArg::Memory => StoreBackend::Memory,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    #[value(alias = "service")]
    Services,
    #[value(aliases = ["post", "posts"])]
    Blog,
    #[value(alias = "course")]
    Courses,
    #[value(alias = "city")]
    Cities,
}

impl From<KindArg> for EntityKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Services => EntityKind::Service,
            KindArg::Blog => EntityKind::BlogPost,
            KindArg::Courses => EntityKind::Course,
            KindArg::Cities => EntityKind::City,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the resolved collection
    List { kind: KindArg },
    /// Print one entity by slug or id
    Show { kind: KindArg, segment: String },
    /// Create an entity from a JSON payload
    Add { kind: KindArg, payload: String },
    /// Patch an entity with a partial JSON payload
    Update {
        kind: KindArg,
        id: i64,
        payload: String,
    },
    /// Delete an entity
    Delete { kind: KindArg, id: i64 },
    /// Replace the manual order with a JSON list of `{id, order}`
    Order { kind: KindArg, payload: String },
    /// Write the sitemap
    Sitemap {
        /// Output file (defaults to SITEMAP_PATH)
        #[arg(long)]
        out: Option<String>,
        /// Site origin (defaults to SITE_URL)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Rewrite legacy string ids to integers
    Migrate,
    /// Dump every stored key as one JSON object
    Export,
}

/// Inline JSON, or the contents of a file when prefixed with `@`
fn read_payload(raw: &str) -> anyhow::Result<String> {
    match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read payload file {}", path)),
        None => Ok(raw.to_string()),
    }
}

fn parse_payload<T: DeserializeOwned>(raw: &str) -> anyhow::Result<T> {
    let json = read_payload(raw)?;
    serde_json::from_str(&json).context("payload is not valid JSON for this content type")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a mutation outcome; a failed mutation becomes a non-zero exit
fn finish<T: Serialize>(result: MutationResult<T>) -> anyhow::Result<()> {
    print_json(&result)?;
    if !result.success {
        bail!(result.error.unwrap_or_else(|| "mutation failed".into()));
    }
    Ok(())
}

fn show<E: crate::catalog::ContentEntity>(content: &ContentStore, segment: &str) -> anyhow::Result<()> {
    match content.find::<E>(segment) {
        Some(entity) => print_json(&entity),
        None => bail!("{} '{}' not found", E::KIND.label(), segment),
    }
}

impl Cli {
    /// Environment config with command line overrides applied
    pub fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(dir) = &self.work_dir {
            config.work_dir = dir.clone();
        }
        if let Some(backend) = self.backend {
            config.store_backend = backend.into();
        }
        config
    }
}

pub fn run(cli: Cli, config: &Config, content: &ContentStore) -> anyhow::Result<()> {
    match cli.command {
        Command::List { kind } => match kind {
            KindArg::Services => print_json(&content.resolve_services()),
            KindArg::Blog => print_json(&content.resolve_blog_posts()),
            KindArg::Courses => print_json(&content.resolve_courses()),
            KindArg::Cities => print_json(&content.resolve_cities()),
        },
        Command::Show { kind, segment } => match kind {
            KindArg::Services => show::<Service>(content, &segment),
            KindArg::Blog => show::<BlogPost>(content, &segment),
            KindArg::Courses => show::<Course>(content, &segment),
            KindArg::Cities => show::<City>(content, &segment),
        },
        Command::Add { kind, payload } => match kind {
            KindArg::Services => {
                finish(content.add_service(parse_payload::<ServiceCreate>(&payload)?))
            }
            KindArg::Blog => finish(content.add_blog_post(parse_payload::<BlogPostCreate>(&payload)?)),
            KindArg::Courses => finish(content.add_course(parse_payload::<CourseCreate>(&payload)?)),
            KindArg::Cities => finish(content.add_city(parse_payload::<CityCreate>(&payload)?)),
        },
        Command::Update { kind, id, payload } => match kind {
            KindArg::Services => {
                finish(content.update_service(id, parse_payload::<ServiceUpdate>(&payload)?))
            }
            KindArg::Blog => {
                finish(content.update_blog_post(id, parse_payload::<BlogPostUpdate>(&payload)?))
            }
            KindArg::Courses => {
                finish(content.update_course(id, parse_payload::<CourseUpdate>(&payload)?))
            }
            KindArg::Cities => finish(content.update_city(id, parse_payload::<CityUpdate>(&payload)?)),
        },
        Command::Delete { kind, id } => match kind {
            KindArg::Services => finish(content.delete_service(id)),
            KindArg::Blog => finish(content.delete_blog_post(id)),
            KindArg::Courses => finish(content.delete_course(id)),
            KindArg::Cities => finish(content.delete_city(id)),
        },
        Command::Order { kind, payload } => {
            let entries: Vec<OrderEntry> = parse_payload(&payload)?;
            finish(content.update_order(kind.into(), &entries))
        }
        Command::Sitemap { out, base_url } => {
            let path = out.unwrap_or_else(|| config.sitemap_path.clone());
            let base_url = base_url.unwrap_or_else(|| config.site_url.clone());
            let today = chrono::Utc::now().date_naive();
            let count = write_sitemap(&path, content, &base_url, today)
                .with_context(|| format!("failed to write sitemap to {}", path))?;
            print_json(&serde_json::json!({ "path": path, "urls": count }))
        }
        Command::Migrate => {
            let rewritten = content.normalize_legacy_ids()?;
            print_json(&serde_json::json!({ "rewritten": rewritten }))
        }
        Command::Export => print_json(&content.export()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_with_alias() {
        let cli = Cli::try_parse_from(["content-admin", "list", "service"]).unwrap();
        match cli.command {
            Command::List { kind } => assert_eq!(kind, KindArg::Services),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_update_with_global_backend() {
        let cli = Cli::try_parse_from([
            "content-admin",
            "update",
            "blog",
            "9",
            r#"{"title":"New"}"#,
            "--backend",
            "memory",
        ])
        .unwrap();
        assert_eq!(cli.backend, Some(BackendArg::Memory));
        assert_eq!(cli.config().store_backend, StoreBackend::Memory);
        match cli.command {
            Command::Update { kind, id, payload } => {
                assert_eq!(kind, KindArg::Blog);
                assert_eq!(id, 9);
                assert_eq!(payload, r#"{"title":"New"}"#);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["content-admin", "list", "products"]).is_err());
    }

    #[test]
    fn test_payload_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.json");
        std::fs::write(&path, r#"{"name":"Banner Printing"}"#).unwrap();

        let payload: ServiceCreate = parse_payload(&format!("@{}", path.display())).unwrap();
        assert_eq!(payload.name, "Banner Printing");
        assert!(parse_payload::<ServiceCreate>("{oops").is_err());
    }

    #[test]
    fn test_run_add_then_delete_in_memory() {
        let config = Config::with_overrides("/nonexistent", StoreBackend::Memory);
        let content = ContentStore::in_memory();

        let add = Cli::try_parse_from(["content-admin", "add", "cities", r#"{"name":"Boise","state":"ID"}"#])
            .unwrap();
        run(add, &config, &content).unwrap();
        let boise = content.find::<City>("boise").unwrap();

        let id = boise.id.to_string();
        let delete = Cli::try_parse_from(["content-admin", "delete", "cities", id.as_str()]).unwrap();
        run(delete, &config, &content).unwrap();
        assert!(content.find::<City>("boise").is_none());

        // Deleting again is a failed mutation and a non-zero exit
        let again = Cli::try_parse_from(["content-admin", "delete", "cities", id.as_str()]).unwrap();
        assert!(run(again, &config, &content).is_err());
    }
}
