//! News retrieval clients for the equity watcher
//!
//! This crate provides:
//! - Google News RSS search: per-entity queries scoped to preferred outlets
//! - Article extraction: best-effort plain text of an article page

pub mod article;
pub mod error;
pub mod google_news;

pub use article::{ArticleExtractor, DEFAULT_MAX_ARTICLE_CHARS};
pub use error::NewsError;
pub use google_news::{build_queries, GoogleNewsClient};
