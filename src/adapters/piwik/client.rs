//! Piwik PRO HTTP client
//!
//! [`AnalyticsApi`] is the seam between the export coordinator and the
//! remote API; [`PiwikClient`] is its reqwest-backed implementation.

use super::auth::exchange_client_credentials;
use super::models::{AccessToken, QueryRequest, ReportData};
use super::query::run_query;
use crate::config::{ApiConfig, SecretString};
use crate::domain::{PiwikExportError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Operations the exporter needs from the analytics platform
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// Obtain a bearer token for one tenant
    async fn authenticate(
        &self,
        hostname: &str,
        client_id: &str,
        client_secret: &SecretString,
    ) -> Result<AccessToken>;

    /// Run one report query and return the raw payload
    async fn fetch_report(
        &self,
        hostname: &str,
        token: &AccessToken,
        request: &QueryRequest<'_>,
    ) -> Result<ReportData>;
}

/// reqwest-backed Piwik PRO client
///
/// One client serves every tenant; the base URL is derived per call from
/// the configured template and the report's hostname. Tokens are not cached.
///
/// # Example
///
/// ```no_run
/// use piwik_export::adapters::piwik::{AnalyticsApi, PiwikClient};
/// use piwik_export::config::{secret_string, ApiConfig};
///
/// # async fn example() -> piwik_export::domain::Result<()> {
/// let client = PiwikClient::new(&ApiConfig::default())?;
/// let token = client
///     .authenticate("acme", "client-id", &secret_string("client-secret".to_string()))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PiwikClient {
    http: Client,
    api: ApiConfig,
}

impl PiwikClient {
    /// Build a client from the API settings
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the HTTP client cannot be built.
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .user_agent(concat!("piwik-export/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(api.connect_timeout_seconds));

        if let Some(secs) = api.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder.build().map_err(|e| {
            PiwikExportError::Configuration(format!("Failed to create HTTP client: {e}"))
        })?;

        tracing::debug!(
            base_url = %api.base_url,
            timeout_seconds = ?api.timeout_seconds,
            connect_timeout_seconds = api.connect_timeout_seconds,
            "Piwik PRO client initialized"
        );

        Ok(Self {
            http,
            api: api.clone(),
        })
    }

    /// Base URL used for `hostname`
    pub fn base_url_for(&self, hostname: &str) -> String {
        self.api.base_url_for(hostname)
    }
}

#[async_trait]
impl AnalyticsApi for PiwikClient {
    async fn authenticate(
        &self,
        hostname: &str,
        client_id: &str,
        client_secret: &SecretString,
    ) -> Result<AccessToken> {
        let base_url = self.base_url_for(hostname);
        exchange_client_credentials(&self.http, &base_url, client_id, client_secret).await
    }

    async fn fetch_report(
        &self,
        hostname: &str,
        token: &AccessToken,
        request: &QueryRequest<'_>,
    ) -> Result<ReportData> {
        let base_url = self.base_url_for(hostname);
        run_query(&self.http, &base_url, token, request).await
    }
}
