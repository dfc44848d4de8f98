//! Application configuration
//!
//! Loaded once at startup from an optional YAML file, then overridden by
//! environment variables. The resulting `DirectoryConfig` is what the
//! clients are constructed from; nothing reads it globally.
//!
//! ```yaml
//! store:
//!   url: https://project.supabase.co
//!   api_key: anon-key
//! geocoder:
//!   access_token: pk.abc
//! graph:
//!   radius: 300
//!   jitter: 50
//! ```

use crate::graph::LayoutConfig;
use crate::store::FEATURED_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const ENV_STORE_URL: &str = "REGEN_STORE_URL";
pub const ENV_STORE_KEY: &str = "REGEN_STORE_KEY";
pub const ENV_MAPBOX_TOKEN: &str = "REGEN_MAPBOX_TOKEN";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing setting: {0}")]
    Missing(&'static str),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Connection settings for the hosted table API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Project base URL; the table API lives under `/rest/v1`
    pub url: String,
    /// Public (anon) API key, sent as `apikey` and bearer token
    pub api_key: String,
    /// Per-request timeout. None leaves requests unbounded.
    pub timeout_secs: Option<u64>,
}

/// Address autocomplete settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub access_token: Option<String>,
    pub base_url: String,
    pub country: String,
    pub language: String,
    pub limit: usize,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: "https://api.mapbox.com".to_string(),
            country: "US".to_string(),
            language: "en".to_string(),
            limit: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub store: StoreConfig,
    pub geocoder: GeocoderConfig,
    pub graph: LayoutConfig,
    pub featured_limit: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            geocoder: GeocoderConfig::default(),
            graph: LayoutConfig::default(),
            featured_limit: FEATURED_LIMIT,
        }
    }
}

impl DirectoryConfig {
    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!("Reading config from {:?}", path);
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// File (if any) plus process environment
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Apply overrides from an environment lookup. Empty values are ignored.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key| lookup(key).filter(|v: &String| !v.is_empty());
        if let Some(url) = get(ENV_STORE_URL) {
            self.store.url = url;
        }
        if let Some(key) = get(ENV_STORE_KEY) {
            self.store.api_key = key;
        }
        if let Some(token) = get(ENV_MAPBOX_TOKEN) {
            self.geocoder.access_token = Some(token);
        }
        self
    }

    /// Fail early when the remote store cannot be reached with these settings
    pub fn require_store(&self) -> ConfigResult<&StoreConfig> {
        if self.store.url.trim().is_empty() {
            return Err(ConfigError::Missing("store.url"));
        }
        if self.store.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("store.api_key"));
        }
        Ok(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DirectoryConfig::default();
        assert_eq!(config.featured_limit, 6);
        assert_eq!(config.graph.radius, 300.0);
        assert_eq!(config.geocoder.country, "US");
        assert!(config.require_store().is_err());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = DirectoryConfig::from_yaml(
            "store:\n  url: https://demo.supabase.co\n  api_key: anon\ngraph:\n  jitter: 0\n",
        )
        .unwrap();
        assert_eq!(config.store.url, "https://demo.supabase.co");
        assert_eq!(config.graph.jitter, 0.0);
        assert_eq!(config.graph.radius, 300.0);
        assert_eq!(config.geocoder.limit, 5);
        assert!(config.require_store().is_ok());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "store:\n  url: https://file.example\n  api_key: from-file").unwrap();

        let env: HashMap<&str, &str> = [
            (ENV_STORE_URL, "https://env.example"),
            (ENV_STORE_KEY, ""),
            (ENV_MAPBOX_TOKEN, "pk.token"),
        ]
        .into_iter()
        .collect();

        let config = DirectoryConfig::from_file(file.path())
            .unwrap()
            .with_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.store.url, "https://env.example");
        assert_eq!(config.store.api_key, "from-file");
        assert_eq!(config.geocoder.access_token.as_deref(), Some("pk.token"));
    }

    #[test]
    fn test_bad_yaml() {
        assert!(matches!(
            DirectoryConfig::from_yaml("store: [unclosed"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_store_key() {
        let mut config = DirectoryConfig::default();
        config.store.url = "https://x.example".into();
        assert!(matches!(config.require_store(), Err(ConfigError::Missing("store.api_key"))));
    }
}
