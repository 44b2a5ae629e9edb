//! Domain error types
//!
//! This module defines the error hierarchy for piwik-export.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main piwik-export error type
///
/// Every failure that can happen while processing a single report document
/// maps to one of these variants, so the coordinator can record it against
/// that document and move on.
#[derive(Debug, Error)]
pub enum PiwikExportError {
    /// Runner configuration errors (TOML file, environment, CLI overrides)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Report document is not valid JSON or lacks a required field
    #[error("Failed to parse report document '{document}': {message}")]
    ConfigParse { document: String, message: String },

    /// Analytics API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Export file could not be written
    #[error("Failed to write export file '{path}': {message}")]
    ExportWrite { path: String, message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Analytics API errors
///
/// Status codes and bodies are kept as plain values so callers never see
/// the HTTP client's own error types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-200 response from the token endpoint
    #[error("Authentication failed with status {status}: {body}")]
    Authentication { status: u16, body: String },

    /// Non-200 response from the report query endpoint
    #[error("Report request failed with status {status}: {body}")]
    Request { status: u16, body: String },

    /// The request never produced a response
    #[error("Failed to reach analytics API: {0}")]
    Connection(String),

    /// A 200 response whose body could not be understood
    #[error("Invalid response from analytics API: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Authentication { status, .. } | ApiError::Request { status, .. } => {
                Some(*status)
            }
            ApiError::Connection(_) | ApiError::InvalidResponse(_) => None,
        }
    }
}

impl From<std::io::Error> for PiwikExportError {
    fn from(err: std::io::Error) -> Self {
        PiwikExportError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PiwikExportError {
    fn from(err: serde_json::Error) -> Self {
        PiwikExportError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for PiwikExportError {
    fn from(err: toml::de::Error) -> Self {
        PiwikExportError::Configuration(format!("TOML parse error: {err}"))
    }
}
