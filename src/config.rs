// Copyright (c) 2025 - Cowboy AI, Inc.
//! CloudStack API connection settings
//!
//! Settings are merged from, highest precedence first:
//!
//! 1. explicit overrides (command line flags and `CLOUDSTACK_*` variables)
//! 2. the region table of a TOML config file
//! 3. built-in defaults (`timeout_secs = 10`, `method = "get"`)
//!
//! ```toml
//! [cloudstack]
//! endpoint = "https://cloud.example.com/client/api"
//! key = "..."
//! secret = "..."
//!
//! [lab]
//! endpoint = "http://10.0.0.5:8080/client/api"
//! key = "..."
//! secret = "..."
//! method = "post"
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{ReconcileError, ReconcileResult};

/// Region used when none is requested
pub const DEFAULT_REGION: &str = "cloudstack";

/// Config file name under the home directory
pub const DEFAULT_CONFIG_FILE: &str = ".cloudstack.toml";

fn default_timeout() -> u64 {
    10
}

/// HTTP verb used for API calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

/// Resolved connection settings for one CloudStack region
#[derive(Clone)]
pub struct ApiConfig {
    /// API endpoint, e.g. `https://cloud.example.com/client/api`
    pub endpoint: String,

    /// API key
    pub key: String,

    /// Secret key used to sign requests
    pub secret: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    pub method: HttpMethod,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("endpoint", &self.endpoint)
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("method", &self.method)
            .finish()
    }
}

impl ApiConfig {
    pub fn new(
        endpoint: impl Into<String>,
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            key: key.into(),
            secret: secret.into(),
            timeout_secs: default_timeout(),
            method: HttpMethod::default(),
        }
    }

    /// Merge overrides with the config file and validate the result
    ///
    /// `config_path` of `None` falls back to `~/.cloudstack.toml`, which may
    /// be absent. An explicitly given path must exist.
    pub fn resolve(
        overrides: ApiOverrides,
        region: Option<&str>,
        config_path: Option<&Path>,
    ) -> ReconcileResult<Self> {
        let region_name = region.unwrap_or(DEFAULT_REGION);

        let file = match config_path {
            Some(path) => Some(load_file(path)?),
            None => match default_config_path() {
                Some(path) if path.exists() => Some(load_file(&path)?),
                _ => None,
            },
        };

        let from_file = match file {
            Some(mut regions) => match regions.remove(region_name) {
                Some(section) => section,
                None if region_name != DEFAULT_REGION => {
                    return Err(ReconcileError::Configuration(format!(
                        "region '{}' not found in config file",
                        region_name
                    )));
                }
                None => RegionConfig::default(),
            },
            None if region_name != DEFAULT_REGION => {
                return Err(ReconcileError::Configuration(format!(
                    "region '{}' requested but no config file found",
                    region_name
                )));
            }
            None => RegionConfig::default(),
        };

        debug!("resolving API config for region {}", region_name);

        let config = Self {
            endpoint: required("endpoint", overrides.endpoint.or(from_file.endpoint))?,
            key: required("key", overrides.key.or(from_file.key))?,
            secret: required("secret", overrides.secret.or(from_file.secret))?,
            timeout_secs: overrides
                .timeout_secs
                .or(from_file.timeout_secs)
                .unwrap_or_else(default_timeout),
            method: overrides.method.or(from_file.method).unwrap_or_default(),
        };
        Ok(config)
    }
}

/// Settings supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ApiOverrides {
    pub endpoint: Option<String>,
    pub key: Option<String>,
    pub secret: Option<String>,
    pub timeout_secs: Option<u64>,
    pub method: Option<HttpMethod>,
}

/// One region table of the config file; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionConfig {
    pub endpoint: Option<String>,
    pub key: Option<String>,
    pub secret: Option<String>,
    pub timeout_secs: Option<u64>,
    pub method: Option<HttpMethod>,
}

/// Config file contents: region name → settings
pub type ConfigFile = HashMap<String, RegionConfig>;

/// `~/.cloudstack.toml`, if a home directory exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_FILE))
}

/// Parse a config file
pub fn load_file(path: &Path) -> ReconcileResult<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        ReconcileError::Configuration(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&content)
        .map_err(|e| ReconcileError::Configuration(format!("{}: {}", path.display(), e)))
}

fn parse_config(content: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str(content)
}

fn required(field: &str, value: Option<String>) -> ReconcileResult<String> {
    value.filter(|v| !v.is_empty()).ok_or_else(|| {
        ReconcileError::Configuration(format!(
            "missing API {}; set CLOUDSTACK_{} or add it to the config file",
            field,
            field.to_uppercase()
        ))
    })
}
