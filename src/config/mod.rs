//! Configuration for prefix trees and the logging that surrounds them.
//!
//! Settings can be built in code, or loaded from a file (TOML, YAML, JSON)
//! with environment variable overrides through [`ConfigLoader`]. Every value
//! is validated before use.

use crate::error::config::ConfigError;
use config::{Config, ConfigError as ExternalConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "PREFIX_TREE";

/// A trait for types that can be validated.
pub trait Validate {
    /// Validates that the configuration is correct.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the configuration is valid
    /// * `Err(ConfigError)` if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Tree configuration
    pub tree: TreeConfig,

    /// Log configuration
    pub log: LogConfig,
}

impl Settings {
    /// Renders the settings as a TOML document.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Writes the settings to `path` as TOML, creating parent directories.
    pub fn write_toml<P: AsRef<Path>>(&self, path: P) -> crate::error::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        tracing::info!(path = %path.display(), "Wrote prefix tree settings");
        Ok(())
    }
}

impl Validate for Settings {
    fn validate(&self) -> ConfigResult<()> {
        self.tree.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

/// Per-tree configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Longest accepted key, in symbols. Longer keys are rejected as invalid.
    pub max_key_len: usize,

    /// Number of node slots reserved up front
    pub initial_capacity: usize,
}

impl TreeConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the longest accepted key.
    pub fn with_max_key_len(mut self, max_key_len: usize) -> Self {
        self.max_key_len = max_key_len;
        self
    }

    /// Sets the number of node slots reserved up front.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_key_len: 1024,
            initial_capacity: 64,
        }
    }
}

impl Validate for TreeConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_key_len == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "tree.max_key_len".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if self.initial_capacity == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "tree.initial_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Whether to log in JSON format
    pub json: bool,

    /// Whether to include source code locations in logs
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            source_location: true,
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationError(format!(
                "Invalid log level: {}",
                self.level
            ))),
        }
    }
}

/// Loads [`Settings`] from defaults, an optional file and the environment.
#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to the configuration file
    /// * `env_prefix` - Prefix for environment variables that override configuration values
    pub fn new<P: AsRef<Path>>(config_path: Option<P>, env_prefix: &str) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            env_prefix: env_prefix.to_string(),
        }
    }

    /// Loads the configuration from a file and environment variables.
    ///
    /// Environment variables use `__` as the separator, for example
    /// `PREFIX_TREE__TREE__MAX_KEY_LEN=64`.
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` if the configuration was loaded successfully
    /// * `Err(ConfigError)` if there was an error loading the configuration
    pub fn load(&self) -> ConfigResult<Settings> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Settings::default())
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
        );

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }

            let format = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => FileFormat::Toml,
                Some("json") => FileFormat::Json,
                Some("yaml" | "yml") => FileFormat::Yaml,
                _ => {
                    return Err(ConfigError::ParseError(format!(
                        "Unsupported file extension for: {path:?}"
                    )))
                }
            };
            builder = builder.add_source(File::from(path.as_path()).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(|e| match e {
            ExternalConfigError::NotFound(path) => ConfigError::FileNotFound(PathBuf::from(path)),
            ExternalConfigError::FileParse { uri, cause } => ConfigError::ParseError(format!(
                "Error parsing config file {}: {cause}",
                uri.unwrap_or_default()
            )),
            other => ConfigError::ParseError(other.to_string()),
        })?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        settings.validate()?;
        tracing::debug!(
            max_key_len = settings.tree.max_key_len,
            log_level = %settings.log.level,
            "Loaded prefix tree settings"
        );

        Ok(settings)
    }
}
