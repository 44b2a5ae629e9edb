//! Export orchestration
//!
//! This module provides the batch logic for piwik-export:
//! - Export coordination over the report documents
//! - CSV file output
//! - Per-document outcomes and the batch summary

pub mod coordinator;
pub mod summary;
pub mod writer;

pub use coordinator::ExportCoordinator;
pub use summary::{BatchSummary, DocumentOutcome, FailureStage, OutcomeStatus};
pub use writer::CsvExporter;
