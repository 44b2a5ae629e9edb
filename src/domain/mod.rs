//! Domain types for piwik-export.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Date ranges** ([`DateRange`]) and the previous-year default
//! - **Error types** ([`PiwikExportError`], [`ApiError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, PiwikExportError>`]:
//!
//! ```rust,no_run
//! use piwik_export::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = piwik_export::config::load_config("piwik-export.toml")?;
//!     println!("{}", config.paths.config_dir);
//!     Ok(())
//! }
//! ```

pub mod date_range;
pub mod errors;
pub mod result;

pub use date_range::{parse_iso_date, DateRange};
pub use errors::{ApiError, PiwikExportError};
pub use result::Result;
