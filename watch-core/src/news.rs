//! News data structures as retrieved from feed sources

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outlet that published an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSource {
    /// Name of the outlet (e.g., "CafeF", "VnEconomy")
    pub name: String,
    /// URL of the outlet's website
    pub url: String,
}

/// A raw news entry returned by a feed query
///
/// Read-only inside the pipeline. `summary` is kept as delivered by the feed
/// and may contain HTML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    /// Article title
    pub title: String,
    /// Article URL (may carry tracking parameters)
    pub link: String,
    /// Raw snippet/description
    #[serde(default)]
    pub summary: String,
    /// Publication date, absent when the feed omits it or it fails to parse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// Outlet information, when the feed exposes it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<NewsSource>,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, link: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            summary: summary.into(),
            published_at: None,
            source: None,
        }
    }

    pub fn published(mut self, at: DateTime<Utc>) -> Self {
        self.published_at = Some(at);
        self
    }

    pub fn with_source(mut self, source: NewsSource) -> Self {
        self.source = Some(source);
        self
    }
}
