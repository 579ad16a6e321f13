//! Google News RSS client for equity news
//!
//! Builds one search query per preferred outlet (plus a broad query) from an
//! entity's code, name and aliases, and parses the returned RSS into
//! `NewsItem`s. Summaries are kept raw; HTML stripping happens in the
//! filtering pipeline.

use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::Client;
use tracing::{debug, info, instrument};

use watch_core::{FeedSource, NewsItem, NewsSource, TrackedEntity, WatchResult};

use crate::error::NewsError;

/// The outlet label Google appends to every description
static SOURCE_FONT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<font[^>]*>.*?</font>").expect("font pattern is valid")
});

/// Google News RSS client
pub struct GoogleNewsClient {
    client: Client,
    base_url: String,
    sources: Vec<String>,
}

impl GoogleNewsClient {
    /// Create a new Google News client; each of `sources` gets its own `site:` query
    pub fn new(sources: Vec<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(20))
                .user_agent("Mozilla/5.0 (compatible; EquityNewsWatch/1.0)")
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: "https://news.google.com/rss/search".to_string(),
            sources,
        }
    }

    /// Point the client at a different RSS search endpoint
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Search Google News (Vietnamese edition) for a query
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<NewsItem>, NewsError> {
        let url = format!(
            "{}?q={}&hl=vi&gl=VN&ceid=VN:vi",
            self.base_url,
            urlencoding::encode(query)
        );

        debug!("Fetching Google News RSS: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NewsError::ApiError {
                status: response.status().as_u16(),
                message: format!("Google News returned status {}", response.status()),
            });
        }

        let content = response
            .bytes()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        let mut items = parse_feed(&content)?;
        info!("Google News returned {} items for '{}'", items.len(), query);

        items.truncate(limit);
        Ok(items)
    }
}

#[async_trait]
impl FeedSource for GoogleNewsClient {
    fn queries_for(&self, entity: &TrackedEntity) -> Vec<String> {
        build_queries(entity, &self.sources)
    }

    async fn fetch(&self, query: &str, max_items: usize) -> WatchResult<Vec<NewsItem>> {
        Ok(self.search(query, max_items).await?)
    }
}

/// Build the search queries for an entity
///
/// Every term (code, name, aliases) is quoted and OR-ed together; the
/// resulting group is scoped to each outlet with `site:` and finally issued
/// once without a site restriction.
pub fn build_queries(entity: &TrackedEntity, sources: &[String]) -> Vec<String> {
    let mut terms: Vec<&str> = Vec::new();
    if !entity.code.is_empty() {
        terms.push(&entity.code);
    }
    if !entity.display_name.is_empty() {
        terms.push(&entity.display_name);
    }
    terms.extend(entity.aliases.iter().map(|a| a.as_str()));

    if terms.is_empty() {
        return Vec::new();
    }

    let base = format!(
        "({})",
        terms
            .iter()
            .map(|t| format!("\"{}\"", t))
            .collect::<Vec<_>>()
            .join(" OR ")
    );

    let mut queries: Vec<String> = sources
        .iter()
        .map(|domain| format!("{} site:{}", base, domain))
        .collect();
    queries.push(base);
    queries
}

/// Parse a feed body, RSS first and Atom as a fallback
fn parse_feed(content: &[u8]) -> Result<Vec<NewsItem>, NewsError> {
    if let Ok(channel) = rss::Channel::read_from(content) {
        return Ok(parse_rss_channel(&channel));
    }

    if let Ok(feed) = atom_syndication::Feed::read_from(content) {
        return Ok(parse_atom_feed(&feed));
    }

    Err(NewsError::ParseError("Failed to parse Google News feed".to_string()))
}

/// Convert RSS items into NewsItems, keeping feed order
fn parse_rss_channel(channel: &rss::Channel) -> Vec<NewsItem> {
    channel
        .items()
        .iter()
        .filter_map(|item| {
            let raw_title = item.title()?;
            let link = item.link()?.to_string();

            let published_at = item.pub_date().and_then(parse_date);

            let (title, source) = match item.source() {
                Some(src) => {
                    let name = src.title().unwrap_or_default().trim().to_string();
                    let title = strip_source_suffix(raw_title, &name);
                    let source = NewsSource {
                        name,
                        url: src.url().to_string(),
                    };
                    (title, source)
                }
                None => {
                    let (title, name) = extract_source_from_google_title(raw_title);
                    (title, source_from_link(&link, name))
                }
            };

            Some(NewsItem {
                title,
                link,
                summary: strip_source_label(item.description().unwrap_or_default()),
                published_at,
                source: Some(source),
            })
        })
        .collect()
}

/// Convert Atom entries into NewsItems
fn parse_atom_feed(feed: &atom_syndication::Feed) -> Vec<NewsItem> {
    feed.entries()
        .iter()
        .filter_map(|entry| {
            let link = entry.links().first().map(|l| l.href().to_string())?;
            if link.is_empty() {
                return None;
            }

            let published_at = entry
                .published()
                .or_else(|| Some(entry.updated()))
                .map(|d| d.with_timezone(&Utc));

            let summary = entry
                .summary()
                .map(|s| s.as_str().to_string())
                .or_else(|| entry.content().and_then(|c| c.value()).map(String::from))
                .unwrap_or_default();

            let (title, name) = extract_source_from_google_title(&entry.title().to_string());
            let source = source_from_link(&link, name);

            Some(NewsItem {
                title,
                link,
                summary,
                published_at,
                source: Some(source),
            })
        })
        .collect()
}

/// Remove the `<font>` outlet label so copies of one story share a summary
fn strip_source_label(description: &str) -> String {
    SOURCE_FONT_RE.replace_all(description, "").trim().to_string()
}

/// Parse a feed timestamp, RFC 2822 then RFC 3339; anything else is absent
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw.trim())
        .or_else(|_| DateTime::parse_from_rfc3339(raw.trim()))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Drop a trailing " - <source>" that Google appends to titles
fn strip_source_suffix(title: &str, source: &str) -> String {
    if source.is_empty() {
        return title.trim().to_string();
    }
    title
        .trim()
        .strip_suffix(source)
        .and_then(|rest| rest.strip_suffix(" - "))
        .unwrap_or(title.trim())
        .trim()
        .to_string()
}

/// Extract source name from Google News title format: "Article Title - Source Name"
fn extract_source_from_google_title(title: &str) -> (String, Option<String>) {
    if let Some(pos) = title.rfind(" - ") {
        let clean_title = title[..pos].trim().to_string();
        let source = title[pos + 3..].trim().to_string();
        (clean_title, Some(source))
    } else {
        (title.trim().to_string(), None)
    }
}

/// Source information from the article link, named after the host when unknown
fn source_from_link(link: &str, name: Option<String>) -> NewsSource {
    let parsed = url::Url::parse(link).ok();
    let host = parsed
        .as_ref()
        .and_then(|u| u.host_str())
        .unwrap_or("news.google.com");

    let base_url = parsed
        .as_ref()
        .map(|u| format!("{}://{}", u.scheme(), host))
        .unwrap_or_else(|| "https://news.google.com".to_string());

    NewsSource {
        name: name.unwrap_or_else(|| host.strip_prefix("www.").unwrap_or(host).to_string()),
        url: base_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>"HPG" - Google News</title>
    <link>https://news.google.com</link>
    <description>Google News</description>
    <item>
      <title>HPG công bố lợi nhuận quý 3 - CafeF</title>
      <link>https://news.google.com/rss/articles/abc?oc=5</link>
      <pubDate>Mon, 13 Oct 2025 07:00:00 GMT</pubDate>
      <description>&lt;a href="https://cafef.vn/x"&gt;HPG công bố lợi nhuận&lt;/a&gt;</description>
      <source url="https://cafef.vn">CafeF</source>
    </item>
    <item>
      <title>Hòa Phát Dung Quất - Vietstock</title>
      <link>https://news.google.com/rss/articles/def</link>
      <pubDate>not a date</pubDate>
    </item>
  </channel>
</rss>"#;

    fn hpg() -> TrackedEntity {
        TrackedEntity::new("HPG", "Hòa Phát", ["HPA", "Dung Quất"])
    }

    #[test]
    fn test_build_queries() {
        let sources = vec!["cafef.vn".to_string(), "ndh.vn".to_string()];
        let queries = build_queries(&hpg(), &sources);

        assert_eq!(queries.len(), 3);
        assert_eq!(
            queries[0],
            r#"("HPG" OR "Hòa Phát" OR "HPA" OR "Dung Quất") site:cafef.vn"#
        );
        assert!(queries[1].ends_with("site:ndh.vn"));
        assert!(!queries[2].contains("site:"));
    }

    #[test]
    fn test_build_queries_without_terms() {
        let entity = TrackedEntity::new("", "", Vec::<String>::new());
        assert!(build_queries(&entity, &["cafef.vn".to_string()]).is_empty());
    }

    #[test]
    fn test_parse_rss_channel() {
        let items = parse_feed(SAMPLE_RSS.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);

        let first = &items[0];
        assert_eq!(first.title, "HPG công bố lợi nhuận quý 3");
        assert!(first.summary.contains("<a href"));
        assert!(first.published_at.is_some());
        let source = first.source.as_ref().unwrap();
        assert_eq!(source.name, "CafeF");
        assert_eq!(source.url, "https://cafef.vn");

        let second = &items[1];
        assert_eq!(second.title, "Hòa Phát Dung Quất");
        assert!(second.published_at.is_none());
        assert_eq!(second.source.as_ref().unwrap().name, "Vietstock");
    }

    #[test]
    fn test_parse_invalid_feed() {
        assert!(parse_feed(b"<html>nope</html>").is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("Mon, 13 Oct 2025 07:00:00 GMT").is_some());
        assert!(parse_date("2025-10-13T07:00:00+07:00").is_some());
        assert!(parse_date("13/10/2025").is_none());
    }

    #[test]
    fn test_extract_source_from_google_title() {
        let (title, source) = extract_source_from_google_title("Thép Hòa Phát tăng giá - VnEconomy");
        assert_eq!(title, "Thép Hòa Phát tăng giá");
        assert_eq!(source.as_deref(), Some("VnEconomy"));

        let (title, source) = extract_source_from_google_title("Không có nguồn");
        assert_eq!(title, "Không có nguồn");
        assert!(source.is_none());
    }

    #[test]
    fn test_strip_source_suffix_only_when_matching() {
        assert_eq!(strip_source_suffix("Tin A - CafeF", "CafeF"), "Tin A");
        assert_eq!(strip_source_suffix("Tin A - B", "CafeF"), "Tin A - B");
    }

    #[test]
    fn test_strip_source_label() {
        let cafef = r##"<a href="https://news.google.com/rss/articles/AAA">HPG tăng giá</a>&nbsp;&nbsp;<font color="#6f6f6f">CafeF</font>"##;
        let vietstock = r##"<a href="https://news.google.com/rss/articles/BBB">HPG tăng giá</a>&nbsp;&nbsp;<FONT color="#6f6f6f">Vietstock</FONT>"##;
        assert!(!strip_source_label(cafef).contains("CafeF"));
        assert!(!strip_source_label(vietstock).contains("Vietstock"));
        assert!(strip_source_label(cafef).ends_with("&nbsp;&nbsp;"));
        assert_eq!(strip_source_label("no label"), "no label");
    }

    #[test]
    fn test_source_from_link() {
        let source = source_from_link("https://www.cafef.vn/bai-viet.chn", None);
        assert_eq!(source.name, "cafef.vn");
        assert_eq!(source.url, "https://www.cafef.vn");
    }
}
