//! Analytics report query

use super::models::{AccessToken, QueryRequest, ReportData, JSON_API_MEDIA_TYPE};
use crate::domain::{ApiError, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};

/// Query endpoint path, relative to the tenant base URL
pub const QUERY_PATH: &str = "/api/analytics/v1/query/";

/// Submit a report query and return the raw response body
///
/// The body is not decoded: CSV bytes come back exactly as sent by the
/// server.
///
/// # Errors
///
/// - `ApiError::Request` for any status other than 200
/// - `ApiError::Connection` when no complete response is received
pub async fn run_query(
    http: &Client,
    base_url: &str,
    token: &AccessToken,
    request: &QueryRequest<'_>,
) -> Result<ReportData> {
    let url = format!("{base_url}{QUERY_PATH}");
    let payload = serde_json::to_vec(request)?;

    tracing::debug!(
        url = %url,
        website_id = %request.website_id,
        date_from = %request.date_from,
        date_to = %request.date_to,
        columns = request.columns.len(),
        "Submitting report query"
    );

    let resp = http
        .post(&url)
        .header(AUTHORIZATION, token.bearer_header())
        .header(CONTENT_TYPE, JSON_API_MEDIA_TYPE)
        .body(payload)
        .send()
        .await
        .map_err(|e| ApiError::Connection(e.to_string()))?;

    let status = resp.status();
    if status != StatusCode::OK {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Request {
            status: status.as_u16(),
            body,
        }
        .into());
    }

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = resp
        .bytes()
        .await
        .map_err(|e| ApiError::Connection(format!("failed to read report body: {e}")))?
        .to_vec();

    Ok(ReportData { body, content_type })
}
