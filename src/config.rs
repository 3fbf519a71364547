//! Configuration loader and validator for the storefront widgets.
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::urls::SiteUrls;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Root configuration struct mirroring the YAML schema exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub api: Api,
    pub search: Search,
    pub carousel: Carousel,
    pub toast: Toast,
}

/// Storefront API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Api {
    pub base_url: String,
    #[serde(default)]
    pub csrf_token: String,
    pub request_timeout_ms: u64,
}

/// Autocomplete settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Search {
    pub debounce_ms: u64,
    pub min_chars: usize,
    pub max_suggestions: usize,
    pub results_path: String,
    pub detail_path: String,
    pub placeholder_image: String,
}

/// Banner carousel settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Carousel {
    pub autoplay_interval_ms: u64,
    pub fetch_timeout_ms: u64,
}

/// Toast notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Toast {
    pub dismiss_after_ms: u64,
}

impl Config {
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.api.base_url).map_err(|_| ConfigError::Invalid("api.base_url must be an absolute URL"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.api.request_timeout_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.carousel.autoplay_interval_ms)
    }

    pub fn carousel_timeout(&self) -> Duration {
        Duration::from_millis(self.carousel.fetch_timeout_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast.dismiss_after_ms)
    }

    /// Navigation URL builder rooted at `api.base_url`.
    pub fn site_urls(&self) -> Result<SiteUrls, ConfigError> {
        Ok(SiteUrls::new(
            self.base_url()?,
            &self.search.results_path,
            &self.search.detail_path,
        ))
    }
}

/// Load configuration from a YAML file and validate it.
/// - If `path` is None, uses `config.yaml` in the current working directory.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new("config.yaml"));
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    validate(&cfg)?;
    Ok(cfg)
}

/// Validate a configuration instance.
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let base = cfg.base_url()?;
    if base.cannot_be_a_base() {
        return Err(ConfigError::Invalid("api.base_url must be an absolute URL"));
    }
    if cfg.api.request_timeout_ms == 0 {
        return Err(ConfigError::Invalid("api.request_timeout_ms must be > 0"));
    }

    if cfg.search.debounce_ms == 0 {
        return Err(ConfigError::Invalid("search.debounce_ms must be > 0"));
    }
    if cfg.search.min_chars == 0 {
        return Err(ConfigError::Invalid("search.min_chars must be > 0"));
    }
    if cfg.search.max_suggestions == 0 {
        return Err(ConfigError::Invalid("search.max_suggestions must be > 0"));
    }
    if !cfg.search.results_path.starts_with('/') {
        return Err(ConfigError::Invalid("search.results_path must be an absolute path"));
    }
    if !cfg.search.detail_path.starts_with('/') {
        return Err(ConfigError::Invalid("search.detail_path must be an absolute path"));
    }
    if cfg.search.placeholder_image.trim().is_empty() {
        return Err(ConfigError::Invalid("search.placeholder_image must be non-empty"));
    }

    if cfg.carousel.autoplay_interval_ms == 0 {
        return Err(ConfigError::Invalid("carousel.autoplay_interval_ms must be > 0"));
    }
    if cfg.carousel.fetch_timeout_ms == 0 {
        return Err(ConfigError::Invalid("carousel.fetch_timeout_ms must be > 0"));
    }

    if cfg.toast.dismiss_after_ms == 0 {
        return Err(ConfigError::Invalid("toast.dismiss_after_ms must be > 0"));
    }

    Ok(())
}

/// Returns the example YAML configuration.
pub fn example() -> &'static str {
    r#"api:
  base_url: "http://localhost:8000/"
  csrf_token: ""
  request_timeout_ms: 10000

search:
  debounce_ms: 300
  min_chars: 2
  max_suggestions: 5
  results_path: "/search/"
  detail_path: "/detail/"
  placeholder_image: "/static/frontend/assets/images/placeholder.jpg"

carousel:
  autoplay_interval_ms: 5000
  fetch_timeout_ms: 5000

toast:
  dismiss_after_ms: 5000
"#
}
