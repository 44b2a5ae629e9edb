//! Export command implementation
//!
//! This module implements the `export` command, which turns every report
//! document into a CSV file.

use crate::config::RunnerConfig;
use crate::core::export::{BatchSummary, ExportCoordinator, OutcomeStatus};
use clap::Args;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Override the report document directory
    #[arg(long)]
    pub config_dir: Option<String>,

    /// Override the CSV output directory
    #[arg(long)]
    pub export_dir: Option<String>,

    /// Export only these document stems (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

impl ExportArgs {
    /// Apply CLI overrides on top of the runner configuration
    pub fn apply_overrides(&self, config: &mut RunnerConfig) {
        if let Some(dir) = &self.config_dir {
            tracing::info!(config_dir = %dir, "Overriding config directory from CLI");
            config.paths.config_dir = dir.clone();
        }
        if let Some(dir) = &self.export_dir {
            tracing::info!(export_dir = %dir, "Overriding export directory from CLI");
            config.paths.export_dir = dir.clone();
        }
    }

    fn selected_stems(&self) -> Option<Vec<String>> {
        let stems: Vec<String> = self
            .only
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        (!stems.is_empty()).then_some(stems)
    }

    /// Execute the export command
    pub async fn execute(
        &self,
        mut config: RunnerConfig,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let mut coordinator = match ExportCoordinator::new(&config, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(5);
            }
        };
        if let Some(stems) = self.selected_stems() {
            tracing::info!(only = ?stems, "Restricting export to selected documents");
            coordinator = coordinator.with_only(stems);
        }

        println!("🚀 Exporting reports from {}", config.paths.config_dir);
        println!();

        let today = chrono::Local::now().date_naive();
        let summary = match coordinator.execute_export(today).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5);
            }
        };

        print_summary(&summary);

        Ok(exit_code(&summary))
    }
}

fn print_summary(summary: &BatchSummary) {
    for outcome in &summary.outcomes {
        match &outcome.status {
            OutcomeStatus::Exported { path, bytes } => {
                println!("  ✅ {} → {} ({bytes} bytes)", outcome.document, path.display());
            }
            OutcomeStatus::Failed { stage, reason } => {
                println!("  ❌ {} [{stage}] {reason}", outcome.document);
            }
        }
    }

    println!();
    println!("📊 Export Summary:");
    println!("  Documents: {}", summary.total());
    println!("  Exported: {}", summary.exported());
    println!("  Failed: {}", summary.failed());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if summary.interrupted {
        println!("⚠️  Export interrupted before all documents were processed.");
    } else if summary.is_successful() {
        println!("✅ Export completed successfully!");
    } else {
        println!("⚠️  Export completed with failures");
    }
}

/// Process exit code for a finished batch
///
/// 130 when interrupted, 1 when any document failed, 0 otherwise.
pub fn exit_code(summary: &BatchSummary) -> i32 {
    if summary.interrupted {
        130
    } else if summary.is_successful() {
        0
    } else {
        1
    }
}
