// Piwik Export - Piwik PRO report exporter
// Copyright (c) 2025 Piwik Export Contributors
// Licensed under the MIT License

//! # piwik-export - Piwik PRO report exporter
//!
//! piwik-export reads report documents (one JSON file per report), fetches
//! each report from the Piwik PRO Analytics API as CSV and writes it to an
//! export directory unchanged.
//!
//! ## Overview
//!
//! For every report document the exporter:
//! - **Resolves** the date range, defaulting to the whole previous year
//! - **Authenticates** with the document's client credentials
//! - **Queries** the analytics endpoint for CSV output
//! - **Writes** `{export_dir}/{stem}_{date_from}_{date_to}.csv`
//!
//! A failing document is logged and skipped; the rest of the batch continues.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Batch coordination and CSV export
//! - [`adapters`] - Piwik PRO HTTP client
//! - [`domain`] - Errors and date ranges
//! - [`config`] - Runner configuration and report documents
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use piwik_export::config::load_config;
//! use piwik_export::core::export::ExportCoordinator;
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("piwik-export.toml")?;
//!     let (_shutdown_tx, shutdown_rx) = watch::channel(false);
//!
//!     let coordinator = ExportCoordinator::new(&config, shutdown_rx)?;
//!     let summary = coordinator
//!         .execute_export(chrono::Local::now().date_naive())
//!         .await?;
//!
//!     println!("Exported {} of {} reports", summary.exported(), summary.total());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], whose error type is
//! [`domain::PiwikExportError`]. API failures carry the HTTP status and
//! response body in [`domain::ApiError`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
