//! Configuration management for piwik-export.
//!
//! Two kinds of configuration exist:
//!
//! - the **runner configuration** ([`RunnerConfig`]), an optional TOML file
//!   with process-level settings: API base URL, timeouts, directories, logging;
//! - **report documents** ([`ReportConfig`]), one JSON file per export job in
//!   the report directory.
//!
//! # Example Runner Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [api]
//! base_url = "https://{hostname}.piwik.pro"
//! timeout_seconds = 120
//!
//! [paths]
//! config_dir = "config"
//! export_dir = "export"
//! ```
//!
//! # Environment Variables
//!
//! `${VAR_NAME}` placeholders are substituted when the file is read, and
//! `PIWIK_EXPORT_<SECTION>_<KEY>` variables override loaded values:
//!
//! ```bash
//! export PIWIK_EXPORT_PATHS_EXPORT_DIR=/data/exports
//! ```

pub mod loader;
pub mod report;
pub mod schema;
pub mod secret;

pub use loader::{default_config, load_config};
pub use report::{ColumnSpec, ReportConfig, ReportDocument, ReportDocuments};
pub use schema::{ApiConfig, ApplicationConfig, LoggingConfig, PathsConfig, RunnerConfig};
pub use secret::{secret_string, SecretString, SecretValue};
