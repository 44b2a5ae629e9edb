//! Report date ranges
//!
//! A report covers an inclusive `date_from`..`date_to` window expressed as
//! `YYYY-MM-DD` strings. When a report document does not provide both ends
//! of the window, the whole previous calendar year is used.

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Date format used on the wire and in export file names
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive report date range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    /// First day of the report (inclusive)
    pub date_from: String,

    /// Last day of the report (inclusive)
    pub date_to: String,
}

impl DateRange {
    /// Create a range from explicit bounds
    pub fn new(date_from: impl Into<String>, date_to: impl Into<String>) -> Self {
        Self {
            date_from: date_from.into(),
            date_to: date_to.into(),
        }
    }

    /// January 1st through December 31st of the year before `today`
    pub fn previous_year(today: NaiveDate) -> Self {
        let year = today.year() - 1;
        Self::new(format!("{year:04}-01-01"), format!("{year:04}-12-31"))
    }

    /// Resolve the effective range for a report
    ///
    /// Configured bounds are returned untouched only when both are present and
    /// non-empty. A single configured bound is ignored and the previous-year
    /// default is used for both ends.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use piwik_export::domain::DateRange;
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    /// let range = DateRange::resolve(Some("2024-05-01"), None, today);
    /// assert_eq!(range, DateRange::new("2024-01-01", "2024-12-31"));
    /// ```
    pub fn resolve(date_from: Option<&str>, date_to: Option<&str>, today: NaiveDate) -> Self {
        match (non_empty(date_from), non_empty(date_to)) {
            (Some(from), Some(to)) => Self::new(from, to),
            _ => Self::previous_year(today),
        }
    }

    /// Whether both bounds parse as calendar dates
    pub fn is_iso(&self) -> bool {
        parse_iso_date(&self.date_from).is_some() && parse_iso_date(&self.date_to).is_some()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.date_from, self.date_to)
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
