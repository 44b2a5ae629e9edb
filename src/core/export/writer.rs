//! CSV export files
//!
//! Reports are written to `{export_dir}/{stem}_{date_from}_{date_to}.csv`
//! byte for byte as received. The export directory is expected to exist.

use crate::domain::{DateRange, PiwikExportError, Result};
use std::path::{Path, PathBuf};

/// Writes report payloads into an export directory
#[derive(Debug, Clone)]
pub struct CsvExporter {
    export_dir: PathBuf,
}

impl CsvExporter {
    /// Exporter writing into `export_dir`
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// File name for a document stem and date range
    ///
    /// ```
    /// use piwik_export::core::export::CsvExporter;
    /// use piwik_export::domain::DateRange;
    ///
    /// let range = DateRange::new("2024-01-01", "2024-12-31");
    /// assert_eq!(
    ///     CsvExporter::file_name("siteA", &range),
    ///     "siteA_2024-01-01_2024-12-31.csv"
    /// );
    /// ```
    pub fn file_name(stem: &str, range: &DateRange) -> String {
        format!("{stem}_{}_{}.csv", range.date_from, range.date_to)
    }

    /// Full target path for a document stem and date range
    pub fn target_path(&self, stem: &str, range: &DateRange) -> PathBuf {
        self.export_dir.join(Self::file_name(stem, range))
    }

    /// Write `data` verbatim, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns `ExportWrite` if the file cannot be written, including when
    /// the export directory does not exist.
    pub async fn write(&self, stem: &str, range: &DateRange, data: &[u8]) -> Result<PathBuf> {
        let path = self.target_path(stem, range);

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| PiwikExportError::ExportWrite {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Export file written");

        Ok(path)
    }
}
