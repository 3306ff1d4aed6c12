//! Service configuration
//!
//! Defaults cover local development. A YAML file overrides them; its path
//! comes from the `PORTAL_CONFIG` environment variable. Partial files are
//! fine: every section falls back to its default.
//!
//! ```yaml
//! server:
//!   bind: "0.0.0.0:8080"
//! pagination:
//!   default_limit: 20
//!   max_limit: 50
//! ```

use crate::core::error::ConfigError;
use serde::Deserialize;

/// Environment variable naming the config file path.
pub const CONFIG_ENV: &str = "PORTAL_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size when the caller does not ask for one.
    pub default_limit: usize,
    /// Hard ceiling; larger requests are clamped, not rejected.
    pub max_limit: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

impl AppConfig {
    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Configuration from `PORTAL_CONFIG` when set, defaults otherwise.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_yaml_file(&path),
            Err(_) => Ok(Self::default()),
        }
    }
}
