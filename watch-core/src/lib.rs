//! Core types for the equity news watcher
//!
//! This crate defines the shared data structures used across the watcher,
//! including tracked entities, news items, and the collaborator traits the
//! pipeline drives (feed source, article fetcher, analyst, delivery channel).

pub mod collaborator;
pub mod entity;
pub mod error;
pub mod news;

pub use collaborator::{AnalysisRequest, ArticleFetcher, DeliveryChannel, FeedSource, NewsAnalyst};
pub use entity::{AliasRule, TrackedEntity};
pub use error::{WatchError, WatchResult};
pub use news::{NewsItem, NewsSource};
