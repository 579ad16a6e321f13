//! Error types for the news module

use thiserror::Error;
use watch_core::WatchError;

/// Errors that can occur in the news module
#[derive(Debug, Error)]
pub enum NewsError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Upstream returned an error response
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Failed to parse the feed or page
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<NewsError> for WatchError {
    fn from(e: NewsError) -> Self {
        match e {
            NewsError::ParseError(msg) => WatchError::parse(msg),
            other => WatchError::source_unavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_watch_error() {
        let err: WatchError = NewsError::ParseError("not a feed".to_string()).into();
        assert!(matches!(err, WatchError::Parse(ref m) if m == "not a feed"));

        let err: WatchError = NewsError::ApiError {
            status: 503,
            message: "busy".to_string(),
        }
        .into();
        assert!(matches!(err, WatchError::SourceUnavailable(_)));

        let err: WatchError = NewsError::RequestFailed("timeout".to_string()).into();
        assert!(matches!(err, WatchError::SourceUnavailable(_)));
    }
}
