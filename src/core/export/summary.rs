//! Batch summary and reporting
//!
//! Every report document handled by a run produces one [`DocumentOutcome`];
//! the [`BatchSummary`] collects them in processing order.

use crate::domain::DateRange;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Step at which a document's export stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// Reading or parsing the report document
    Parse,
    /// Token exchange
    Authentication,
    /// Report query
    Request,
    /// Writing the export file
    Write,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureStage::Parse => "parse",
            FailureStage::Authentication => "authentication",
            FailureStage::Request => "request",
            FailureStage::Write => "write",
        };
        f.write_str(name)
    }
}

/// Result of processing one report document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// The report was fetched and written
    Exported { path: PathBuf, bytes: usize },
    /// Processing stopped at `stage`
    Failed { stage: FailureStage, reason: String },
}

/// Outcome for one report document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutcome {
    /// Source file name, e.g. `siteA.json`
    pub document: String,

    /// Resolved range, once the document has been parsed
    pub date_range: Option<DateRange>,

    pub status: OutcomeStatus,
}

impl DocumentOutcome {
    /// Successful export
    pub fn exported(
        document: impl Into<String>,
        date_range: DateRange,
        path: PathBuf,
        bytes: usize,
    ) -> Self {
        Self {
            document: document.into(),
            date_range: Some(date_range),
            status: OutcomeStatus::Exported { path, bytes },
        }
    }

    /// Failed export
    pub fn failed(
        document: impl Into<String>,
        date_range: Option<DateRange>,
        stage: FailureStage,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            document: document.into(),
            date_range,
            status: OutcomeStatus::Failed {
                stage,
                reason: reason.into(),
            },
        }
    }

    pub fn is_exported(&self) -> bool {
        matches!(self.status, OutcomeStatus::Exported { .. })
    }

    /// Path of the written file, if any
    pub fn export_path(&self) -> Option<&PathBuf> {
        match &self.status {
            OutcomeStatus::Exported { path, .. } => Some(path),
            OutcomeStatus::Failed { .. } => None,
        }
    }
}

/// Summary of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// One entry per processed document, in processing order
    pub outcomes: Vec<DocumentOutcome>,

    /// Wall-clock duration of the run
    pub duration: Duration,

    /// Whether a shutdown signal stopped the run early
    pub interrupted: bool,
}

impl BatchSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record an outcome
    pub fn record(&mut self, outcome: DocumentOutcome) {
        self.outcomes.push(outcome);
    }

    /// Number of processed documents
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of documents exported
    pub fn exported(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_exported()).count()
    }

    /// Number of documents that failed
    pub fn failed(&self) -> usize {
        self.total() - self.exported()
    }

    /// Failed outcomes
    pub fn failures(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|o| !o.is_exported())
    }

    /// Outcome for a given document name
    pub fn outcome(&self, document: &str) -> Option<&DocumentOutcome> {
        self.outcomes.iter().find(|o| o.document == document)
    }

    /// True when every processed document was exported and the run finished
    pub fn is_successful(&self) -> bool {
        self.failed() == 0 && !self.interrupted
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.total(),
            exported = self.exported(),
            failed = self.failed(),
            interrupted = self.interrupted,
            duration_ms = self.duration.as_millis() as u64,
            "Batch completed"
        );

        for outcome in self.failures() {
            if let OutcomeStatus::Failed { stage, reason } = &outcome.status {
                tracing::warn!(
                    document = %outcome.document,
                    stage = %stage,
                    reason = %reason,
                    "Report not exported"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> DateRange {
        DateRange::new("2024-01-01", "2024-12-31")
    }

    #[test]
    fn test_empty_summary() {
        let summary = BatchSummary::new();
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.exported(), 0);
        assert_eq!(summary.failed(), 0);
        assert!(summary.is_successful());
    }

    #[test]
    fn test_counts() {
        let mut summary = BatchSummary::new();
        summary.record(DocumentOutcome::exported(
            "a.json",
            range(),
            PathBuf::from("export/a_2024-01-01_2024-12-31.csv"),
            120,
        ));
        summary.record(DocumentOutcome::failed(
            "b.json",
            Some(range()),
            FailureStage::Authentication,
            "status 401",
        ));
        summary.record(DocumentOutcome::failed(
            "c.json",
            None,
            FailureStage::Parse,
            "missing field `columns`",
        ));

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.exported(), 1);
        assert_eq!(summary.failed(), 2);
        assert!(!summary.is_successful());

        let failed: Vec<&str> = summary.failures().map(|o| o.document.as_str()).collect();
        assert_eq!(failed, vec!["b.json", "c.json"]);
    }

    #[test]
    fn test_interrupted_is_not_successful() {
        let summary = BatchSummary {
            interrupted: true,
            ..Default::default()
        };
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_outcome_lookup_and_path() {
        let mut summary = BatchSummary::new();
        let path = PathBuf::from("export/a_2024-01-01_2024-12-31.csv");
        summary.record(DocumentOutcome::exported("a.json", range(), path.clone(), 1));

        let outcome = summary.outcome("a.json").unwrap();
        assert_eq!(outcome.export_path(), Some(&path));
        assert!(summary.outcome("missing.json").is_none());
    }

    #[test]
    fn test_failure_stage_display() {
        assert_eq!(FailureStage::Parse.to_string(), "parse");
        assert_eq!(FailureStage::Write.to_string(), "write");
    }

    #[test]
    fn test_with_duration() {
        let summary = BatchSummary::new().with_duration(Duration::from_secs(3));
        assert_eq!(summary.duration, Duration::from_secs(3));
    }
}
