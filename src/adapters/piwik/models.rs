//! Piwik PRO API data models

use crate::config::{secret_string, ColumnSpec, ReportConfig, SecretString};
use crate::domain::DateRange;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Media type of query requests
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Rows requested per report; only the first page is fetched
pub const PAGE_LIMIT: u32 = 10_000;

/// Output format requested from the query endpoint
pub const CSV_FORMAT: &str = "csv";

/// Token endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default)]
    pub token_type: Option<String>,

    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Bearer token obtained from a client-credentials exchange
#[derive(Debug, Clone)]
pub struct AccessToken {
    value: SecretString,

    /// Lifetime in seconds, when the server reports one
    pub expires_in: Option<u64>,
}

impl AccessToken {
    /// Wrap a raw token
    pub fn new(value: String, expires_in: Option<u64>) -> Self {
        Self {
            value: secret_string(value),
            expires_in,
        }
    }

    /// `Authorization` header value
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.value.expose_secret().as_ref())
    }
}

/// Analytics query body
///
/// Borrows everything from the report document it was built from; the page
/// window and output format are fixed.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    pub date_from: &'a str,
    pub date_to: &'a str,
    pub website_id: &'a str,
    pub offset: u32,
    pub limit: u32,
    pub format: &'static str,
    pub columns: &'a [ColumnSpec],
    pub order_by: serde_json::Value,
    pub filters: Option<&'a serde_json::Value>,
    pub metric_filters: Option<&'a serde_json::Value>,
}

impl<'a> QueryRequest<'a> {
    /// Build the query for one report over `range`
    pub fn new(config: &'a ReportConfig, range: &'a DateRange) -> Self {
        Self {
            date_from: &range.date_from,
            date_to: &range.date_to,
            website_id: &config.website_id,
            offset: 0,
            limit: PAGE_LIMIT,
            format: CSV_FORMAT,
            columns: &config.columns,
            order_by: config.effective_order_by(),
            filters: config.filters.as_ref(),
            metric_filters: config.metric_filters.as_ref(),
        }
    }
}

/// Raw report payload, exactly as received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportData {
    pub body: Vec<u8>,

    /// `Content-Type` of the response, if any
    pub content_type: Option<String>,
}

impl ReportData {
    /// Payload size in bytes
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(extra: serde_json::Value) -> ReportConfig {
        let mut doc = json!({
            "client_id": "id",
            "client_secret": "secret",
            "piwik_hostname": "acme",
            "website_id": "3f2c9e1a-5d4b-4c7e-9a8f-1b2c3d4e5f60",
            "columns": [
                {"column_id": "timestamp", "transformation_id": "to_start_of_month"},
                {"column_id": "sessions"}
            ]
        });
        for (k, v) in extra.as_object().unwrap() {
            doc[k] = v.clone();
        }
        ReportConfig::from_json("test.json", &doc.to_string()).unwrap()
    }

    #[test]
    fn test_query_request_body() {
        let config = report(json!({}));
        let range = DateRange::new("2024-01-01", "2024-12-31");
        let body = serde_json::to_value(QueryRequest::new(&config, &range)).unwrap();

        assert_eq!(
            body,
            json!({
                "date_from": "2024-01-01",
                "date_to": "2024-12-31",
                "website_id": "3f2c9e1a-5d4b-4c7e-9a8f-1b2c3d4e5f60",
                "offset": 0,
                "limit": 10000,
                "format": "csv",
                "columns": [
                    {"column_id": "timestamp", "transformation_id": "to_start_of_month"},
                    {"column_id": "sessions"}
                ],
                "order_by": [[0, "desc"]],
                "filters": null,
                "metric_filters": null
            })
        );
    }

    #[test]
    fn test_query_request_passes_filters_and_order_through() {
        let filters = json!({"operator": "and", "conditions": [
            {"column_id": "referrer_type", "condition": {"operator": "eq", "value": 2}}
        ]});
        let config = report(json!({
            "order_by": [[1, "asc"]],
            "filters": filters.clone(),
        }));
        let range = DateRange::new("2024-05-01", "2024-12-08");
        let body = serde_json::to_value(QueryRequest::new(&config, &range)).unwrap();

        assert_eq!(body["order_by"], json!([[1, "asc"]]));
        assert_eq!(body["filters"], filters);
        assert_eq!(body["metric_filters"], serde_json::Value::Null);
    }

    #[test]
    fn test_query_request_sends_document_values_verbatim() {
        let columns = json!([
            {"column_id": "timestamp", "transformation_id": null},
            {"column_id": "sessions", "requires_events": 0}
        ]);
        let config = report(json!({
            "columns": columns.clone(),
            "order_by": [[1, "DESC"]],
        }));
        let range = DateRange::new("2024-01-01", "2024-12-31");
        let body = serde_json::to_value(QueryRequest::new(&config, &range)).unwrap();

        assert_eq!(body["columns"], columns);
        assert_eq!(body["order_by"], json!([[1, "DESC"]]));
    }

    #[test]
    fn test_bearer_header() {
        let token = AccessToken::new("abc".to_string(), Some(1800));
        assert_eq!(token.bearer_header(), "Bearer abc");
        assert!(!format!("{token:?}").contains("abc"));
    }

    #[test]
    fn test_token_response_tolerates_missing_fields() {
        let resp: TokenResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.access_token.is_none());
        assert!(resp.expires_in.is_none());
    }
}
