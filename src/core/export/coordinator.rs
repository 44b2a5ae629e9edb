//! Export coordinator - runs the batch over every report document
//!
//! Documents are processed one at a time. Each one goes through
//! parse → resolve dates → authenticate → query → write, and whatever
//! happens is recorded as a [`DocumentOutcome`]; a failure never stops the
//! documents that follow.

use crate::adapters::piwik::{AnalyticsApi, PiwikClient, QueryRequest};
use crate::config::{PathsConfig, ReportDocument, ReportDocuments, RunnerConfig};
use crate::core::export::summary::{BatchSummary, DocumentOutcome, FailureStage};
use crate::core::export::writer::CsvExporter;
use crate::domain::{DateRange, PiwikExportError, Result};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tracing::Instrument;

/// Export coordinator
pub struct ExportCoordinator {
    api: Arc<dyn AnalyticsApi>,
    exporter: CsvExporter,
    config_dir: PathBuf,
    extension: String,
    only: Option<Vec<String>>,
    shutdown_signal: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a coordinator backed by the Piwik PRO HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &RunnerConfig, shutdown_signal: watch::Receiver<bool>) -> Result<Self> {
        let client = PiwikClient::new(&config.api)?;
        Ok(Self::with_api(
            Arc::new(client),
            &config.paths,
            shutdown_signal,
        ))
    }

    /// Create a coordinator around any [`AnalyticsApi`] implementation
    pub fn with_api(
        api: Arc<dyn AnalyticsApi>,
        paths: &PathsConfig,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Self {
        Self {
            api,
            exporter: CsvExporter::new(&paths.export_dir),
            config_dir: PathBuf::from(&paths.config_dir),
            extension: paths.extension.clone(),
            only: None,
            shutdown_signal,
        }
    }

    /// Restrict the run to documents whose stem is in `stems`
    pub fn with_only(mut self, stems: Vec<String>) -> Self {
        self.only = Some(stems);
        self
    }

    /// Execute the batch
    ///
    /// `today` anchors the previous-year default date range.
    ///
    /// # Errors
    ///
    /// Only failing to read the report directory is an error; per-document
    /// failures are part of the returned summary.
    pub async fn execute_export(&self, today: NaiveDate) -> Result<BatchSummary> {
        let start_time = Instant::now();
        let mut summary = BatchSummary::new();

        tracing::info!(
            config_dir = %self.config_dir.display(),
            export_dir = %self.exporter.export_dir().display(),
            today = %today,
            "Starting export batch"
        );

        let documents: Vec<ReportDocument> =
            ReportDocuments::open(&self.config_dir, &self.extension)?.collect();

        if let Some(only) = &self.only {
            for stem in unmatched_stems(only, &documents) {
                tracing::warn!(stem = %stem, "Selected document not found in config directory");
            }
        }

        for document in documents {
            if let Some(only) = &self.only {
                if !only.iter().any(|stem| *stem == document.stem) {
                    tracing::debug!(document = %document.file_name, "Skipping document not selected");
                    continue;
                }
            }

            if *self.shutdown_signal.borrow() {
                tracing::warn!(
                    processed = summary.total(),
                    "Shutdown requested, stopping before next document"
                );
                summary.interrupted = true;
                break;
            }

            let span = tracing::info_span!("report", document = %document.file_name);
            let outcome = self.process_document(&document, today).instrument(span).await;
            summary.record(outcome);
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Process one document, turning every failure into an outcome
    async fn process_document(&self, document: &ReportDocument, today: NaiveDate) -> DocumentOutcome {
        let name = document.file_name.as_str();
        tracing::info!(document = %name, "Processing report document");

        let report = match document.load() {
            Ok(report) => report,
            Err(e) => return failure(name, None, FailureStage::Parse, e),
        };

        let range = report.resolve_date_range(today);
        tracing::debug!(
            document = %name,
            hostname = %report.hostname,
            website_id = %report.website_id,
            date_range = %range,
            "Resolved date range"
        );

        let token = match self
            .api
            .authenticate(&report.hostname, &report.client_id, &report.client_secret)
            .await
        {
            Ok(token) => token,
            Err(e) => return failure(name, Some(range), FailureStage::Authentication, e),
        };
        tracing::info!(document = %name, hostname = %report.hostname, "Authenticated");

        let request = QueryRequest::new(&report, &range);
        let data = match self.api.fetch_report(&report.hostname, &token, &request).await {
            Ok(data) => data,
            Err(e) => return failure(name, Some(range), FailureStage::Request, e),
        };
        tracing::info!(document = %name, bytes = data.len(), "Report data received");

        match self.exporter.write(&document.stem, &range, &data.body).await {
            Ok(path) => {
                tracing::info!(
                    document = %name,
                    path = %path.display(),
                    bytes = data.len(),
                    "Report saved"
                );
                DocumentOutcome::exported(name, range, path, data.len())
            }
            Err(e) => failure(name, Some(range), FailureStage::Write, e),
        }
    }
}

/// Requested stems that match no discovered document
fn unmatched_stems<'a>(only: &'a [String], documents: &[ReportDocument]) -> Vec<&'a str> {
    only.iter()
        .filter(|stem| !documents.iter().any(|d| d.stem == **stem))
        .map(String::as_str)
        .collect()
}

fn failure(
    document: &str,
    range: Option<DateRange>,
    stage: FailureStage,
    error: PiwikExportError,
) -> DocumentOutcome {
    tracing::error!(document = %document, stage = %stage, error = %error, "Report export failed");
    DocumentOutcome::failed(document, range, stage, error.to_string())
}
