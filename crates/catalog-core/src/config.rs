//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars.
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::types::{LabelMatch, QueryDescriptor, SearchFields};

/// Directory holding the `config*.toml` files. Defaults to the working directory.
pub const CONFIG_DIR_VAR: &str = "CATALOG_CONFIG_DIR";

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

/// Defaults applied to descriptors built by front ends (`[query]` section).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    pub search_tags: bool,
    pub search_description: bool,
    pub label_match: LabelMatch,
}

impl QuerySettings {
    pub fn apply(&self, descriptor: QueryDescriptor) -> QueryDescriptor {
        descriptor
            .search_fields(SearchFields { tags: self.search_tags, description: self.search_description })
            .label_match(self.label_match)
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let base_dir = match env::var(CONFIG_DIR_VAR) {
            Ok(dir) => expand_path(dir),
            Err(_) => env::current_dir()?,
        };
        Self::load_from(&base_dir)
    }

    /// Loads `config.toml` + `config.<RUST_ENV>.toml` from `base_dir`, then `APP_*` env vars.
    pub fn load_from(base_dir: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file(base_dir.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        Self::from_figment(figment, base_dir)
    }

    pub fn from_figment(figment: Figment, base_dir: &Path) -> anyhow::Result<Self> {
        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        config.validate()?;
        Ok(config)
    }

    pub fn base_dir(&self) -> &Path { &self.base_dir }

    /// A path-valued key, expanded and resolved against the config directory.
    pub fn get_path(&self, key: &str) -> anyhow::Result<PathBuf> {
        let raw: String = self.get(key)?;
        Ok(resolve_with_base(&self.base_dir, raw))
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// The `[query]` section, or defaults when it is absent.
    pub fn query_settings(&self) -> anyhow::Result<QuerySettings> {
        if self.figment.find_value("query").is_err() {
            return Ok(QuerySettings::default());
        }
        self.get("query")
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.query_settings()
            .map(|_| ())
            .map_err(|e| crate::error::Error::InvalidConfig(e.to_string()).into())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
