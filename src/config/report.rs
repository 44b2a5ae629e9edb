//! Report documents
//!
//! A report document is a JSON file describing one export: the credentials
//! and tenant to authenticate against, the site to query, and the report
//! shape (columns, ordering, filters, optional date range).
//!
//! ```json
//! {
//!     "client_id": "xxx_client_id",
//!     "client_secret": "xxx_client_secret",
//!     "piwik_hostname": "lifelong-learning",
//!     "website_id": "3f2c9e1a-5d4b-4c7e-9a8f-1b2c3d4e5f60",
//!     "date_from": "2024-05-01",
//!     "date_to": "2024-12-08",
//!     "columns": [
//!         { "column_id": "timestamp", "transformation_id": "to_start_of_month" },
//!         { "column_id": "sessions" }
//!     ],
//!     "order_by": [[1, "asc"]],
//!     "filters": null,
//!     "metric_filters": null
//! }
//! ```
//!
//! Documents are discovered with [`ReportDocuments`], which lists a directory
//! eagerly but parses each document only when [`ReportDocument::load`] is
//! called, so one broken file never hides the others.

use super::secret::SecretString;
use crate::domain::{DateRange, PiwikExportError, Result};
use chrono::NaiveDate;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

/// One report export job, as read from a report document
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// OAuth client identifier
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: SecretString,

    /// Tenant name, the `xxx` in `xxx.piwik.pro`
    #[serde(rename = "piwik_hostname")]
    pub hostname: String,

    /// Site (app) identifier inside the tenant
    pub website_id: String,

    /// First day of the report (`YYYY-MM-DD`)
    #[serde(default)]
    pub date_from: Option<String>,

    /// Last day of the report (`YYYY-MM-DD`)
    #[serde(default)]
    pub date_to: Option<String>,

    /// Requested dimensions and metrics, in output order
    pub columns: Vec<ColumnSpec>,

    /// Sort order as `[column position, direction]` pairs, sent as written
    #[serde(default)]
    pub order_by: Option<serde_json::Value>,

    /// Dimension filters, forwarded untouched
    #[serde(default)]
    pub filters: Option<serde_json::Value>,

    /// Metric filters, forwarded untouched
    #[serde(default)]
    pub metric_filters: Option<serde_json::Value>,
}

impl ReportConfig {
    /// Parse a report document
    ///
    /// `document` names the source in error messages.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` if the input is not JSON, lacks one of the
    /// required fields, or has an empty required string.
    pub fn from_json(document: &str, contents: &str) -> Result<Self> {
        let config: ReportConfig =
            serde_json::from_str(contents).map_err(|e| PiwikExportError::ConfigParse {
                document: document.to_string(),
                message: e.to_string(),
            })?;

        config
            .check_required()
            .map_err(|message| PiwikExportError::ConfigParse {
                document: document.to_string(),
                message,
            })?;

        Ok(config)
    }

    fn check_required(&self) -> std::result::Result<(), String> {
        if self.client_id.is_empty() {
            return Err("client_id cannot be empty".to_string());
        }
        if self.client_secret.expose_secret().is_empty() {
            return Err("client_secret cannot be empty".to_string());
        }
        if self.hostname.is_empty() {
            return Err("piwik_hostname cannot be empty".to_string());
        }
        if self.website_id.is_empty() {
            return Err("website_id cannot be empty".to_string());
        }
        Ok(())
    }

    /// Effective date range for this report as of `today`
    pub fn resolve_date_range(&self, today: NaiveDate) -> DateRange {
        DateRange::resolve(self.date_from.as_deref(), self.date_to.as_deref(), today)
    }

    /// Sort order to send, `[[0, "desc"]]` when none is configured
    pub fn effective_order_by(&self) -> serde_json::Value {
        self.order_by
            .clone()
            .unwrap_or_else(|| json!([[0, "desc"]]))
    }
}

/// A requested dimension or metric
///
/// The column object is kept exactly as written in the document, including
/// qualifiers set to `null` and keys this crate does not know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSpec(serde_json::Map<String, serde_json::Value>);

impl ColumnSpec {
    /// Column without qualifiers
    pub fn new(column_id: impl Into<String>) -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert("column_id".to_string(), json!(column_id.into()));
        Self(fields)
    }

    /// `column_id`, when present and a string
    pub fn column_id(&self) -> Option<&str> {
        self.0.get("column_id").and_then(serde_json::Value::as_str)
    }

    /// Any key of the column object
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }
}

/// A report document found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    /// Full path to the file
    pub path: PathBuf,

    /// File name, e.g. `siteA.json`
    pub file_name: String,

    /// File name without extension, e.g. `siteA`
    pub stem: String,
}

impl ReportDocument {
    /// Build a document handle from a path
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            file_name,
            stem,
        }
    }

    /// Read and parse the document
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` if the file cannot be read or parsed.
    pub fn load(&self) -> Result<ReportConfig> {
        let contents =
            fs::read_to_string(&self.path).map_err(|e| PiwikExportError::ConfigParse {
                document: self.file_name.clone(),
                message: format!("failed to read {}: {e}", self.path.display()),
            })?;
        ReportConfig::from_json(&self.file_name, &contents)
    }
}

/// Report documents in a directory, in file-name order
///
/// # Example
///
/// ```no_run
/// use piwik_export::config::ReportDocuments;
///
/// # fn example() -> piwik_export::domain::Result<()> {
/// for document in ReportDocuments::open("config", "json")? {
///     match document.load() {
///         Ok(report) => println!("{}: {}", document.file_name, report.hostname),
///         Err(e) => eprintln!("{e}"),
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ReportDocuments {
    entries: std::vec::IntoIter<ReportDocument>,
}

impl ReportDocuments {
    /// List the regular files in `dir` whose name ends in `.{extension}`
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the directory cannot be read.
    /// Unreadable individual entries are logged and skipped.
    pub fn open(dir: impl AsRef<Path>, extension: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let suffix = format!(".{extension}");

        let read_dir = fs::read_dir(dir).map_err(|e| {
            PiwikExportError::Configuration(format!(
                "Failed to read report directory {}: {e}",
                dir.display()
            ))
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };

            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !file_name.ends_with(&suffix) {
                continue;
            }

            match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => {
                    tracing::debug!(entry = %file_name, "Skipping directory");
                    continue;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(entry = %file_name, error = %e, "Skipping entry with unknown type");
                    continue;
                }
            }

            entries.push(ReportDocument::from_path(entry.path()));
        }

        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        tracing::debug!(
            dir = %dir.display(),
            count = entries.len(),
            "Discovered report documents"
        );

        Ok(Self {
            entries: entries.into_iter(),
        })
    }
}

impl Iterator for ReportDocuments {
    type Item = ReportDocument;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}
