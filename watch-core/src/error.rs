//! Error types for the watcher

use thiserror::Error;

/// Watcher-wide error type
///
/// The first four variants follow how a run recovers: a source failure is
/// treated as an empty result, an analysis failure skips the item, a delivery
/// failure is logged and the item stays processed, and missing configuration
/// only disables the collaborator that needs it.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailure(String),

    #[error("Delivery failed: {0}")]
    DeliveryFailure(String),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WatchError {
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        WatchError::SourceUnavailable(msg.into())
    }

    pub fn analysis(msg: impl Into<String>) -> Self {
        WatchError::AnalysisFailure(msg.into())
    }

    pub fn delivery(msg: impl Into<String>) -> Self {
        WatchError::DeliveryFailure(msg.into())
    }

    pub fn config_missing(msg: impl Into<String>) -> Self {
        WatchError::ConfigurationMissing(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        WatchError::Parse(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        WatchError::Internal(msg.into())
    }
}

/// Result type alias for watcher operations
pub type WatchResult<T> = Result<T, WatchError>;
