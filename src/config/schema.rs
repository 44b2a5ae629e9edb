//! Runner configuration schema
//!
//! This module defines the process-level settings read from
//! `piwik-export.toml`. Every section and field has a default, so an empty
//! file (or no file at all) is a valid configuration.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by a report document's hostname in `api.base_url`
pub const HOSTNAME_PLACEHOLDER: &str = "{hostname}";

/// Root runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunnerConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Analytics API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RunnerConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value found
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.paths.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Analytics API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL template; `{hostname}` is replaced per report document
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Overall request timeout in seconds (unset = no client-side limit)
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("api.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("api.base_url must start with http:// or https://".to_string());
        }

        if self.timeout_seconds == Some(0) {
            return Err("api.timeout_seconds must be > 0 when set".to_string());
        }

        if self.connect_timeout_seconds == 0 {
            return Err("api.connect_timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }

    /// Base URL for one tenant, without a trailing slash
    ///
    /// ```
    /// use piwik_export::config::ApiConfig;
    ///
    /// let api = ApiConfig::default();
    /// assert_eq!(api.base_url_for("acme"), "https://acme.piwik.pro");
    /// ```
    pub fn base_url_for(&self, hostname: &str) -> String {
        self.base_url
            .replace(HOSTNAME_PLACEHOLDER, hostname)
            .trim_end_matches('/')
            .to_string()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
            connect_timeout_seconds: default_connect_timeout_seconds(),
        }
    }
}

/// Input and output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding one JSON report document per export
    #[serde(default = "default_config_dir")]
    pub config_dir: String,

    /// Directory receiving the CSV files (must already exist)
    #[serde(default = "default_export_dir")]
    pub export_dir: String,

    /// File extension identifying report documents, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl PathsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.config_dir.is_empty() {
            return Err("paths.config_dir cannot be empty".to_string());
        }
        if self.export_dir.is_empty() {
            return Err("paths.export_dir cannot be empty".to_string());
        }
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(format!(
                "paths.extension must be a non-empty extension without a leading dot, got '{}'",
                self.extension
            ));
        }
        Ok(())
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            export_dir: default_export_dir(),
            extension: default_extension(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging next to the console output
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://{hostname}.piwik.pro".to_string()
}

fn default_connect_timeout_seconds() -> u64 {
    30
}

fn default_config_dir() -> String {
    "config".to_string()
}

fn default_export_dir() -> String {
    "export".to_string()
}

fn default_extension() -> String {
    "json".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
