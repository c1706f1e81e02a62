use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::drive::DEFAULT_LISTING_ENDPOINT;
use crate::feed::DEFAULT_PORTFOLIO_TTL_SECS;

/// Deployment-time settings: optional `showcase.toml`, then `SHOWCASE_*` env overrides.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub database_url: Option<String>,
    /// Remote content bootstrap document; unset disables hydration.
    #[serde(default)]
    pub content_url: Option<String>,
    #[serde(default)]
    pub listing_endpoint: Option<String>,
    #[serde(default)]
    pub portfolio_ttl_secs: Option<i64>,
}

impl Settings {
    /// Reads the settings file from the platform config dir (if any) and applies env overrides.
    pub fn load() -> Result<Self> {
        let file = default_settings_path().filter(|p| p.exists());
        let base = match file {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(|k| std::env::var(k).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).with_context(|| format!("reading settings: {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing settings: {}", path.display()))
    }

    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |k: &str| var(k).filter(|v| !v.trim().is_empty());
        if let Some(v) = non_empty("SHOWCASE_DATABASE_URL") { self.database_url = Some(v); }
        if let Some(v) = non_empty("SHOWCASE_CONTENT_URL") { self.content_url = Some(v); }
        if let Some(v) = non_empty("SHOWCASE_LISTING_ENDPOINT") { self.listing_endpoint = Some(v); }
        if let Some(v) = non_empty("SHOWCASE_PORTFOLIO_TTL_SECS").and_then(|s| s.trim().parse().ok()) {
            self.portfolio_ttl_secs = Some(v);
        }
        self
    }

    pub fn listing_endpoint(&self) -> &str { self.listing_endpoint.as_deref().unwrap_or(DEFAULT_LISTING_ENDPOINT) }

    pub fn portfolio_ttl_secs(&self) -> i64 {
        self.portfolio_ttl_secs.filter(|v| *v > 0).unwrap_or(DEFAULT_PORTFOLIO_TTL_SECS)
    }
}

pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "digitalcraft", "showcase").map(|p| p.config_dir().join("showcase.toml"))
}
