//! Configuration management for the `cinqueterre` fetcher
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::CinqueTerreError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable the Anthropic SDKs read the credential from
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CinqueTerreConfig {
    /// Language model API configuration
    #[serde(default)]
    pub anthropic: AnthropicConfig,
    /// Output file configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Anthropic Messages API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicConfig {
    /// API key; falls back to `ANTHROPIC_API_KEY` when unset
    pub api_key: Option<String>,
    /// Base URL for the API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Value of the `anthropic-version` header
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Model used for every request
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Retries for transient failures (0 disables retrying)
    #[serde(default)]
    pub max_retries: u32,
    /// Upper bound on web searches per request
    pub web_search_max_uses: Option<u32>,
}

/// Output file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the JSON documents are written to
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Location interpolated into every prompt
    #[serde(default = "default_location")]
    pub location: String,
}

// Default value functions
fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_timeout() -> u32 {
    600
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("./riomaggiore_data")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_location() -> String {
    "Riomaggiore, Cinque Terre, Italy".to_string()
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            api_version: default_api_version(),
            model: default_model(),
            timeout_seconds: default_timeout(),
            max_retries: 0,
            web_search_max_uses: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
        }
    }
}

impl CinqueTerreConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = &config_path {
            if !path.exists() {
                return Err(CinqueTerreError::config(format!(
                    "Config file not found: {}",
                    path.display()
                ))
                .into());
            }
        }

        let config_file = config_path.or_else(Self::get_config_path);

        if let Some(config_file) = config_file.filter(|path| path.exists()) {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // CINQUETERRE_ANTHROPIC__MODEL=... overrides anthropic.model
        builder = builder.add_source(
            Environment::with_prefix("CINQUETERRE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: CinqueTerreConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cinqueterre").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.anthropic.base_url.is_empty() {
            self.anthropic.base_url = default_base_url();
        }
        if self.anthropic.api_version.is_empty() {
            self.anthropic.api_version = default_api_version();
        }
        if self.anthropic.model.is_empty() {
            self.anthropic.model = default_model();
        }
        if self.anthropic.timeout_seconds == 0 {
            self.anthropic.timeout_seconds = default_timeout();
        }
        if self.output.directory.as_os_str().is_empty() {
            self.output.directory = default_output_directory();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.location.trim().is_empty() {
            self.defaults.location = default_location();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Resolve the API key from the config or the process environment
    pub fn resolve_api_key(&self) -> crate::Result<String> {
        let key = self
            .anthropic
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty());

        key.ok_or_else(|| {
            CinqueTerreError::config(format!(
                "No Anthropic API key configured; set {API_KEY_ENV} or anthropic.api_key"
            ))
        })
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.anthropic.timeout_seconds > 3600 {
            return Err(
                CinqueTerreError::config("API timeout cannot exceed 3600 seconds").into(),
            );
        }

        if self.anthropic.max_retries > 10 {
            return Err(CinqueTerreError::config("API max retries cannot exceed 10").into());
        }

        if self.anthropic.web_search_max_uses == Some(0) {
            return Err(CinqueTerreError::config(
                "web_search_max_uses must be at least 1 when set",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(CinqueTerreError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(CinqueTerreError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.anthropic.base_url.starts_with("http://")
            && !self.anthropic.base_url.starts_with("https://")
        {
            return Err(CinqueTerreError::config(
                "Anthropic base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.anthropic.model.trim().is_empty() {
            return Err(CinqueTerreError::config("Model name cannot be empty").into());
        }

        if self.defaults.location.trim().is_empty() {
            return Err(CinqueTerreError::config("Default location cannot be empty").into());
        }

        Ok(())
    }
}
