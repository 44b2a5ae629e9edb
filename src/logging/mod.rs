//! Logging and observability
//!
//! Structured logging built on `tracing`:
//! - human-readable console output
//! - optional JSON file output with rotation
//! - `RUST_LOG` / configured level filtering
//!
//! Per-document events carry a `document` field so a failed report can be
//! traced back to its source file.

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
