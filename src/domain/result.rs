//! Result type alias for piwik-export

use super::errors::PiwikExportError;

/// Result type alias for piwik-export operations
///
/// # Examples
///
/// ```
/// use piwik_export::domain::result::Result;
/// use piwik_export::domain::errors::PiwikExportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PiwikExportError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PiwikExportError>;
