//! External system integrations for piwik-export.
//!
//! - [`piwik`] - Piwik PRO authentication and analytics query API
//!
//! The coordinator talks to the platform only through the
//! [`piwik::AnalyticsApi`] trait, so tests can drive it with a stub.
//!
//! ```rust,no_run
//! use piwik_export::adapters::piwik::PiwikClient;
//! use piwik_export::config::ApiConfig;
//!
//! # fn example() -> piwik_export::domain::Result<()> {
//! let client = PiwikClient::new(&ApiConfig::default())?;
//! # Ok(())
//! # }
//! ```

pub mod piwik;
