//! Provider error type.

use thiserror::Error;

use crate::route::RouteError;
use crate::search::SearchError;

/// Errors raised by the concrete providers before they are mapped onto the
/// search and route error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Server answered with a non-success status
    #[error("HTTP {status} from server")]
    HttpStatus { status: u16, body: String },

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    ParseError(String),

    /// Local data file could not be read
    #[error("I/O error: {0}")]
    Io(String),

    /// Provider cannot be built from the given settings
    #[error("Provider configuration error: {0}")]
    Configuration(String),
}

impl From<ProviderError> for SearchError {
    fn from(e: ProviderError) -> Self {
        SearchError::Provider(e.to_string())
    }
}

impl From<ProviderError> for RouteError {
    fn from(e: ProviderError) -> Self {
        RouteError::Provider(e.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::ParseError(e.to_string())
    }
}
