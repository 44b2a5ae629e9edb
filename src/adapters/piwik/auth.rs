//! Client-credentials token exchange

use super::models::{AccessToken, TokenResponse};
use crate::config::SecretString;
use crate::domain::{ApiError, Result};
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;

/// Token endpoint path, relative to the tenant base URL
pub const TOKEN_PATH: &str = "/auth/token";

/// Exchange client credentials for a bearer token
///
/// Sends `grant_type=client_credentials` with the client id and secret as
/// a form body to `{base_url}/auth/token`.
///
/// # Errors
///
/// - `ApiError::Authentication` for any status other than 200
/// - `ApiError::InvalidResponse` when a 200 body carries no `access_token`
/// - `ApiError::Connection` when no response is received
pub async fn exchange_client_credentials(
    http: &Client,
    base_url: &str,
    client_id: &str,
    client_secret: &SecretString,
) -> Result<AccessToken> {
    let url = format!("{base_url}{TOKEN_PATH}");

    tracing::debug!(url = %url, client_id = %client_id, "Requesting access token");

    let form = [
        ("grant_type", "client_credentials"),
        ("client_id", client_id),
        ("client_secret", client_secret.expose_secret().as_ref()),
    ];

    let resp = http
        .post(&url)
        .form(&form)
        .send()
        .await
        .map_err(|e| ApiError::Connection(e.to_string()))?;

    let status = resp.status();
    if status != StatusCode::OK {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Authentication {
            status: status.as_u16(),
            body,
        }
        .into());
    }

    let token: TokenResponse = resp
        .json()
        .await
        .map_err(|e| ApiError::InvalidResponse(format!("token response: {e}")))?;

    let access_token = token.access_token.filter(|t| !t.is_empty()).ok_or_else(|| {
        ApiError::InvalidResponse("token response has no access_token".to_string())
    })?;

    tracing::debug!(
        token_type = token.token_type.as_deref().unwrap_or("unknown"),
        expires_in = ?token.expires_in,
        "Access token obtained"
    );

    Ok(AccessToken::new(access_token, token.expires_in))
}
