//! Piwik PRO analytics API adapter
//!
//! Provides the client-credentials token exchange ([`auth`]), the report
//! query ([`query`]) and the [`AnalyticsApi`] trait tying them together.

pub mod auth;
pub mod client;
pub mod models;
pub mod query;

pub use client::{AnalyticsApi, PiwikClient};
pub use models::{AccessToken, QueryRequest, ReportData};
