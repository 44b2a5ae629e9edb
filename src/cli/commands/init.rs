//! Init command implementation
//!
//! This module implements the `init` command for generating a sample runner
//! configuration and, optionally, a sample report document.

use crate::cli::DEFAULT_CONFIG_PATH;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the runner configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: String,

    /// Also create a sample report document named `<REPORT>.json`
    #[arg(long, value_name = "REPORT")]
    pub report: Option<String>,

    /// Directory for the sample report document
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, report = ?self.report, "Initializing configuration");

        println!("📝 Initializing piwik-export configuration");
        println!();

        let report_path = self.report_path();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }
        if let Some(path) = &report_path {
            if path.exists() && !self.force {
                println!("❌ Report document already exists: {}", path.display());
                println!("   Use --force to overwrite");
                return Ok(2);
            }
        }

        if let Err(e) = fs::write(&self.output, Self::generate_runner_config()) {
            println!("❌ Failed to write configuration file");
            println!("   Error: {e}");
            return Ok(5);
        }
        println!("✅ Configuration file created: {}", self.output);

        if let Some(path) = &report_path {
            let written = fs::create_dir_all(&self.config_dir)
                .and_then(|_| fs::write(path, Self::generate_report_document()));
            if let Err(e) = written {
                println!("❌ Failed to write report document");
                println!("   Error: {e}");
                return Ok(5);
            }
            println!("✅ Report document created: {}", path.display());
        }

        println!();
        println!("Next steps:");
        println!("  1. Edit {} if the defaults do not fit", self.output);
        println!("  2. Fill in credentials, tenant and website_id in each report document");
        println!("  3. Create the export directory: mkdir export");
        println!("  4. Validate configuration: piwik-export validate-config");
        println!("  5. Run export: piwik-export export");
        println!();
        Ok(0)
    }

    fn report_path(&self) -> Option<PathBuf> {
        self.report
            .as_ref()
            .map(|name| Path::new(&self.config_dir).join(format!("{name}.json")))
    }

    /// Sample runner configuration
    fn generate_runner_config() -> String {
        r#"# piwik-export runner configuration
#
# Every key is optional. Values can reference environment variables with
# ${VAR} and be overridden with PIWIK_EXPORT_<SECTION>_<KEY>.

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[api]
# Tenant base URL; {hostname} is replaced by the document's piwik_hostname
base_url = "https://{hostname}.piwik.pro"
# Whole-request timeout in seconds (unset waits indefinitely)
# timeout_seconds = 300
connect_timeout_seconds = 30

[paths]
# Directory holding the report documents
config_dir = "config"
# Directory receiving the CSV files (must exist)
export_dir = "export"
# Report document extension
extension = "json"

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "logs"
# daily, hourly or never
local_rotation = "daily"
"#
        .to_string()
    }

    /// Sample report document
    fn generate_report_document() -> String {
        r#"{
    "client_id": "xxx_client_id",
    "client_secret": "xxx_client_secret",
    "piwik_hostname": "your-tenant",
    "website_id": "00000000-0000-0000-0000-000000000000",
    "columns": [
        { "column_id": "timestamp", "transformation_id": "to_start_of_month" },
        { "column_id": "source_medium" },
        { "column_id": "sessions" }
    ],
    "order_by": [[0, "asc"]],
    "filters": null,
    "metric_filters": null
}
"#
        .to_string()
    }
}
