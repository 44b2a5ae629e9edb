//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for piwik-export using clap.

pub mod commands;

use crate::config::{default_config, load_config, RunnerConfig};
use crate::domain::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

/// Runner configuration path used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "piwik-export.toml";

/// piwik-export - Piwik PRO report exporter
#[derive(Parser, Debug)]
#[command(name = "piwik-export")]
#[command(version, about, long_about = None)]
#[command(author = "Piwik Export Contributors")]
pub struct Cli {
    /// Path to runner configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, env = "PIWIK_EXPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PIWIK_EXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export every report document to CSV
    Export(commands::export::ExportArgs),

    /// Validate the runner configuration and report documents
    ValidateConfig(commands::validate::ValidateArgs),

    /// Create a sample runner configuration and report document
    Init(commands::init::InitArgs),
}

/// Load the runner configuration for a CLI invocation
///
/// A missing file at the default path means "use defaults"; a missing file
/// at an explicitly chosen path is an error.
pub fn load_runner_config(path: &str) -> Result<RunnerConfig> {
    if path == DEFAULT_CONFIG_PATH && !Path::new(path).exists() {
        tracing::debug!(path = %path, "No runner configuration file, using defaults");
        return default_config();
    }
    load_config(path)
}
