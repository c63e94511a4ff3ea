//! Pipeline logging configuration using Figment
//!
//! Sources are merged in precedence order, later ones overriding earlier
//! ones:
//!
//! 1. Defaults ([`LoggingConfig::default`])
//! 2. An explicit configuration file (TOML, YAML or JSON, by extension)
//! 3. Environment variables prefixed with `FP_`
//!
//! ```toml
//! minimum_level = "warning"
//! filter = "info,my_service=debug"
//! ansi = false
//! ```

use crate::error::{ConfigError, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use functional_processing::LogLevel;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "FP_";

/// Settings for the logging pipeline and tracing bootstrap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Failures declared below this level pass through without being logged
    #[serde(deserialize_with = "deserialize_level")]
    pub minimum_level: LogLevel,
    /// `tracing-subscriber` filter directive
    pub filter: String,
    /// Colored output
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            minimum_level: LogLevel::Trace,
            filter: "info".to_string(),
            ansi: true,
        }
    }
}

// Accepts the same spellings as `LogLevel::from_str` ("info", "WARN", ...)
fn deserialize_level<'de, D>(deserializer: D) -> std::result::Result<LogLevel, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Format for `path`, by extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat { format: extension }),
        }
    }
}

/// Loads a [`LoggingConfig`] from defaults, an optional file and the environment
///
/// Nothing is cached; each [`load`](Self::load) reads the sources again.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    file: Option<PathBuf>,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also read `path`, which must exist
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<LoggingConfig> {
        let config: LoggingConfig = self.build_figment()?.extract()?;
        debug!(
            minimum_level = %config.minimum_level,
            filter = %config.filter,
            "Loaded logging configuration"
        );
        Ok(config)
    }

    fn build_figment(&self) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(LoggingConfig::default()));

        if let Some(path) = &self.file {
            figment = figment.merge(Self::load_file(path)?);
        }

        trace!("Merging {}* environment variables", ENV_PREFIX);
        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    fn load_file(path: &Path) -> Result<Figment> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        trace!("Loading config file: {}", path.display());
        Ok(match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => Figment::from(Toml::file(path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
            ConfigFormat::Json => Figment::from(Json::file(path)),
        })
    }
}

/// Load configuration from defaults and the environment
pub fn load_configuration() -> Result<LoggingConfig> {
    ConfigProvider::new().load()
}
