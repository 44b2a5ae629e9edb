//! Validate config command implementation
//!
//! This module implements the `validate-config` command. It checks the
//! runner configuration and every report document without contacting the
//! analytics API.

use crate::config::{ReportConfig, ReportDocuments, RunnerConfig};
use crate::core::export::CsvExporter;
use crate::domain::DateRange;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Override the report document directory
    #[arg(long)]
    pub config_dir: Option<String>,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, mut config: RunnerConfig) -> anyhow::Result<i32> {
        if let Some(dir) = &self.config_dir {
            config.paths.config_dir = dir.clone();
        }
        tracing::info!(config_dir = %config.paths.config_dir, "Validating configuration");

        if let Err(e) = config.validate() {
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            return Ok(2);
        }

        println!("✅ Runner configuration is valid");
        println!("  Log Level: {}", config.application.log_level);
        println!("  API Base URL: {}", config.api.base_url);
        println!("  Config Directory: {}", config.paths.config_dir);
        println!("  Export Directory: {}", config.paths.export_dir);
        println!();

        let documents = match ReportDocuments::open(&config.paths.config_dir, &config.paths.extension) {
            Ok(documents) => documents,
            Err(e) => {
                println!("❌ {e}");
                return Ok(2);
            }
        };

        let exporter = CsvExporter::new(&config.paths.export_dir);
        let today = chrono::Local::now().date_naive();
        let mut total = 0;
        let mut invalid = 0;

        for document in documents {
            total += 1;
            let report = match document.load() {
                Ok(report) => report,
                Err(e) => {
                    invalid += 1;
                    println!("❌ {e}");
                    continue;
                }
            };

            let range = report.resolve_date_range(today);
            println!(
                "✅ {} ({}) → {}",
                document.file_name,
                range,
                exporter.target_path(&document.stem, &range).display()
            );
            for warning in document_warnings(&report, &range) {
                tracing::warn!(document = %document.file_name, warning = %warning, "Report document warning");
                println!("   ⚠️  {warning}");
            }
        }

        println!();
        println!("Documents: {total}, invalid: {invalid}");

        if !std::path::Path::new(&config.paths.export_dir).is_dir() {
            println!("⚠️  Export directory {} does not exist", config.paths.export_dir);
        }

        Ok(if invalid == 0 { 0 } else { 2 })
    }
}

/// Non-fatal problems the API is likely to reject
pub fn document_warnings(report: &ReportConfig, range: &DateRange) -> Vec<String> {
    let mut warnings = Vec::new();

    if uuid::Uuid::parse_str(&report.website_id).is_err() {
        warnings.push(format!("website_id '{}' is not a UUID", report.website_id));
    }
    if !range.is_iso() {
        warnings.push(format!("date range {range} is not in YYYY-MM-DD format"));
    }
    for (index, column) in report.columns.iter().enumerate() {
        if column.column_id().is_none() {
            warnings.push(format!("column {index} has no column_id"));
        }
    }

    let column_count = report.columns.len();
    let order_by = report.effective_order_by();
    let entries = order_by.as_array().map(Vec::as_slice).unwrap_or_default();
    for position in entries.iter().filter_map(|entry| entry.get(0)?.as_u64()) {
        if position as usize >= column_count {
            warnings.push(format!(
                "order_by column index {position} is out of range for {column_count} column(s)"
            ));
        }
    }

    warnings
}
