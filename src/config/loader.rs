//! Runner configuration loader with TOML parsing and environment overrides

use super::schema::RunnerConfig;
use crate::domain::errors::PiwikExportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix of environment variables that override loaded values
pub const ENV_PREFIX: &str = "PIWIK_EXPORT";

/// Loads the runner configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into [`RunnerConfig`]
/// 4. Applies environment variable overrides (PIWIK_EXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a `Configuration` error if the file is missing or unreadable,
/// references an unset variable, is not valid TOML, or fails validation.
///
/// # Examples
///
/// ```no_run
/// use piwik_export::config::loader::load_config;
///
/// let config = load_config("piwik-export.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RunnerConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PiwikExportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PiwikExportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: RunnerConfig = toml::from_str(&contents)
        .map_err(|e| PiwikExportError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finish(config)
}

/// Builds the default configuration, with environment overrides applied
///
/// Used when no configuration file exists at the default location.
pub fn default_config() -> Result<RunnerConfig> {
    finish(RunnerConfig::default())
}

fn finish(mut config: RunnerConfig) -> Result<RunnerConfig> {
    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        PiwikExportError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PiwikExportError::Configuration(e.to_string()))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(PiwikExportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the PIWIK_EXPORT_* prefix
///
/// Variables follow the pattern PIWIK_EXPORT_<SECTION>_<KEY>, for example
/// PIWIK_EXPORT_API_BASE_URL or PIWIK_EXPORT_PATHS_EXPORT_DIR. Values that
/// fail to parse are ignored.
fn apply_env_overrides(config: &mut RunnerConfig) {
    let var = |key: &str| std::env::var(format!("{ENV_PREFIX}_{key}")).ok();

    if let Some(val) = var("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Some(val) = var("API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Some(val) = var("API_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.api.timeout_seconds = Some(secs);
        }
    }
    if let Some(val) = var("API_CONNECT_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.api.connect_timeout_seconds = secs;
        }
    }

    if let Some(val) = var("PATHS_CONFIG_DIR") {
        config.paths.config_dir = val;
    }
    if let Some(val) = var("PATHS_EXPORT_DIR") {
        config.paths.export_dir = val;
    }
    if let Some(val) = var("PATHS_EXTENSION") {
        config.paths.extension = val;
    }

    if let Some(val) = var("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = var("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = var("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
