//! Article body extraction
//!
//! Fetches an article page and pulls the main text out of it, trying the
//! content containers used by Vietnamese financial outlets before falling
//! back to the whole body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use watch_core::ArticleFetcher;

use crate::error::NewsError;

/// Default cap on extracted article length, in characters
pub const DEFAULT_MAX_ARTICLE_CHARS: usize = 8000;

/// Content containers, most specific first
const CONTENT_SELECTORS: &[&str] = &[
    ".detail__content",
    ".ArticleContent",
    ".article__content",
    ".article-body",
    ".content-detail",
    ".article-content",
    "article",
];

/// Client for fetching article pages
#[derive(Debug, Clone)]
pub struct ArticleExtractor {
    client: Client,
    max_chars: usize,
}

impl ArticleExtractor {
    pub fn new(max_chars: usize) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
                .build()
                .unwrap_or_else(|_| Client::new()),
            max_chars,
        }
    }

    /// Fetch a page and extract its main text
    pub async fn extract(&self, link: &str) -> Result<String, NewsError> {
        debug!("Fetching article: {}", link);

        let response = self
            .client
            .get(link)
            .send()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NewsError::ApiError {
                status: response.status().as_u16(),
                message: format!("Failed to fetch article {}", link),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        Ok(extract_text_from_html(&html, self.max_chars))
    }
}

impl Default for ArticleExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ARTICLE_CHARS)
    }
}

#[async_trait]
impl ArticleFetcher for ArticleExtractor {
    async fn fetch_text(&self, link: &str) -> String {
        if link.is_empty() {
            return String::new();
        }
        match self.extract(link).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to fetch article {}: {}", link, e);
                String::new()
            }
        }
    }
}

/// Extract the main text of a page, collapsed to single spaces and capped
fn extract_text_from_html(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);

    let mut text = String::new();
    for selector_str in CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(node) = document.select(&selector).next() {
                text = collapse_whitespace(&node.text().collect::<Vec<_>>().join(" "));
                break;
            }
        }
    }

    if text.is_empty() {
        if let Ok(body_selector) = Selector::parse("body") {
            let root = document.root_element();
            let body = document.select(&body_selector).next().unwrap_or(root);
            text = collapse_whitespace(&body.text().collect::<Vec<_>>().join(" "));
        }
    }

    truncate_chars(text, max_chars)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_content_container() {
        let html = r#"<html><body>
            <nav>Trang chủ   Chứng khoán</nav>
            <div class="detail__content"><p>Hòa Phát   báo lãi</p><p>quý 3</p></div>
        </body></html>"#;
        assert_eq!(extract_text_from_html(html, 8000), "Hòa Phát báo lãi quý 3");
    }

    #[test]
    fn test_falls_back_to_body() {
        let html = "<html><body><div>Tin <b>HPG</b></div></body></html>";
        assert_eq!(extract_text_from_html(html, 8000), "Tin HPG");
    }

    #[test]
    fn test_truncates_by_characters() {
        assert_eq!(truncate_chars("Hòa Phát".to_string(), 3), "Hòa...");
        assert_eq!(truncate_chars("HPG".to_string(), 3), "HPG");
    }

    #[tokio::test]
    async fn test_empty_link_yields_empty_text() {
        let extractor = ArticleExtractor::default();
        assert_eq!(extractor.fetch_text("").await, "");
    }
}
