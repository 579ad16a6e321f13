//! Interfaces of the I/O collaborators driven by the pipeline
//!
//! The filtering core never performs I/O itself. Feed retrieval, article
//! extraction, analysis and delivery sit behind these traits so the
//! orchestrator can be exercised with in-memory implementations.

use async_trait::async_trait;

use crate::entity::TrackedEntity;
use crate::error::WatchResult;
use crate::news::NewsItem;

/// Search-driven news feed
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Search queries to run for an entity, in execution order
    fn queries_for(&self, entity: &TrackedEntity) -> Vec<String>;

    /// Fetch items for a query in feed order, at most `max_items`
    async fn fetch(&self, query: &str, max_items: usize) -> WatchResult<Vec<NewsItem>>;
}

/// Best-effort article body extraction
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// Plain-text body of the article, or an empty string on any failure
    async fn fetch_text(&self, link: &str) -> String;
}

/// Everything the analyst sees about one item
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub code: String,
    pub display_name: String,
    pub title: String,
    /// HTML-stripped snippet
    pub snippet: String,
    /// Extracted article body, empty when extraction failed
    pub body: String,
    pub link: String,
}

/// External text-generation service
#[async_trait]
pub trait NewsAnalyst: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> WatchResult<String>;
}

/// Outbound message channel
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    async fn deliver(&self, message: &str) -> WatchResult<()>;
}
