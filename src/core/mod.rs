//! Core business logic for piwik-export.
//!
//! # Modules
//!
//! - [`export`] - Batch coordination, CSV output and summaries
//!
//! # Export Workflow
//!
//! For every report document in the configured directory:
//!
//! 1. **Parse**: Load the JSON document
//! 2. **Resolve dates**: Use the configured range or the previous calendar year
//! 3. **Authenticate**: Exchange client credentials for a bearer token
//! 4. **Query**: Request the report as CSV (first 10000 rows)
//! 5. **Write**: Save the payload to `{export_dir}/{stem}_{from}_{to}.csv`
//!
//! A failing step ends that document only; the next one starts fresh.
//!
//! # Example
//!
//! ```rust,no_run
//! use piwik_export::config::RunnerConfig;
//! use piwik_export::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RunnerConfig::default();
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! let coordinator = ExportCoordinator::new(&config, shutdown_rx)?;
//! let summary = coordinator
//!     .execute_export(chrono::Local::now().date_naive())
//!     .await?;
//!
//! println!("Exported: {}", summary.exported());
//! println!("Failed: {}", summary.failed());
//! # Ok(())
//! # }
//! ```

pub mod export;
