//! Pipeline Orchestrator
//!
//! Walks entities, their queries and each query's items strictly in order,
//! runs every item through the filtering core and hands survivors to the
//! analysis and delivery collaborators. The run stops as soon as the
//! emission cap is reached.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use watch_core::{
    AnalysisRequest, ArticleFetcher, DeliveryChannel, FeedSource, NewsAnalyst, NewsItem,
    TrackedEntity,
};
use watch_notify::format_message;

use crate::budget::RunBudget;
use crate::config::default_noise_keywords;
use crate::fingerprint::{fingerprint, SeenFingerprintSet};
use crate::matcher::EntityMatcher;
use crate::noise::NoiseClassifier;
use crate::recency::is_within_days;
use crate::text::strip_html;

/// Orchestrator settings
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub lookback_days: u32,
    pub scan_per_feed: usize,
    pub max_send_per_run: usize,
    /// Pause after each successful delivery
    pub send_delay: Duration,
    pub noise_keywords: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            scan_per_feed: 200,
            max_send_per_run: 5,
            send_delay: Duration::from_secs(3),
            noise_keywords: default_noise_keywords(),
        }
    }
}

/// How a run ended. Both are successful completions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every entity, query and item was examined
    #[default]
    Done,
    /// The emission cap was reached
    Halted,
}

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub entities: usize,
    pub queries: usize,
    pub feed_failures: usize,
    pub items_examined: usize,
    pub skipped_stale: usize,
    pub skipped_duplicate: usize,
    pub skipped_noise: usize,
    pub skipped_irrelevant: usize,
    pub analysis_failures: usize,
    pub delivery_failures: usize,
    pub emitted: usize,
    pub outcome: RunOutcome,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} emitted from {} items ({} entities, {} queries); skipped: {} stale, {} duplicate, {} noise, {} irrelevant; failures: {} feed, {} analysis, {} delivery; {:?}",
            self.emitted,
            self.items_examined,
            self.entities,
            self.queries,
            self.skipped_stale,
            self.skipped_duplicate,
            self.skipped_noise,
            self.skipped_irrelevant,
            self.feed_failures,
            self.analysis_failures,
            self.delivery_failures,
            self.outcome,
        )
    }
}

/// Per-run mutable state, created fresh by [`NewsPipeline::run`]
struct RunState {
    seen: SeenFingerprintSet,
    budget: RunBudget,
    summary: RunSummary,
}

/// What happened to a single item
enum ItemStep {
    Skipped,
    Emitted,
}

/// Relevance pipeline over the injected collaborators
pub struct NewsPipeline {
    feed: Arc<dyn FeedSource>,
    articles: Arc<dyn ArticleFetcher>,
    analyst: Arc<dyn NewsAnalyst>,
    delivery: Arc<dyn DeliveryChannel>,
    noise: NoiseClassifier,
    config: PipelineConfig,
}

impl NewsPipeline {
    pub fn new(
        feed: Arc<dyn FeedSource>,
        articles: Arc<dyn ArticleFetcher>,
        analyst: Arc<dyn NewsAnalyst>,
        delivery: Arc<dyn DeliveryChannel>,
        config: PipelineConfig,
    ) -> Self {
        let noise = NoiseClassifier::new(&config.noise_keywords);
        Self {
            feed,
            articles,
            analyst,
            delivery,
            noise,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run once over `entities` in order
    pub async fn run(&self, entities: &[TrackedEntity]) -> RunSummary {
        info!(
            "Scanning news from the last {} days (cap {} per run)",
            self.config.lookback_days, self.config.max_send_per_run
        );

        let mut state = RunState {
            seen: SeenFingerprintSet::new(),
            budget: RunBudget::new(self.config.max_send_per_run),
            summary: RunSummary::default(),
        };

        let outcome = self.scan(entities, &mut state).await;
        state.summary.outcome = outcome;
        state.summary.emitted = state.budget.emitted();

        if state.summary.emitted == 0 {
            info!(
                "No matching news in the last {} days",
                self.config.lookback_days
            );
        }
        info!("Run finished: {}", state.summary);

        state.summary
    }

    async fn scan(&self, entities: &[TrackedEntity], state: &mut RunState) -> RunOutcome {
        if state.budget.is_exhausted() {
            info!("Emission cap is {}, nothing to do", state.budget.cap());
            return RunOutcome::Halted;
        }

        for entity in entities {
            state.summary.entities += 1;
            let matcher = EntityMatcher::new(entity);
            info!("Scanning {} ({})", entity.label(), entity.display_name);

            for query in self.feed.queries_for(entity) {
                state.summary.queries += 1;
                debug!("Query: {}", query);

                let items = match self.feed.fetch(&query, self.config.scan_per_feed).await {
                    Ok(items) => items,
                    Err(e) => {
                        warn!("Feed fetch failed for {}: {}", query, e);
                        state.summary.feed_failures += 1;
                        Vec::new()
                    }
                };

                for item in items.iter().take(self.config.scan_per_feed) {
                    state.summary.items_examined += 1;
                    if let ItemStep::Emitted = self.process_item(entity, &matcher, item, state).await {
                        if state.budget.is_exhausted() {
                            info!("Reached cap of {} items, stopping", state.budget.cap());
                            return RunOutcome::Halted;
                        }
                    }
                }
            }
        }

        RunOutcome::Done
    }

    async fn process_item(
        &self,
        entity: &TrackedEntity,
        matcher: &EntityMatcher,
        item: &NewsItem,
        state: &mut RunState,
    ) -> ItemStep {
        if !is_within_days(item, self.config.lookback_days) {
            debug!("Skip stale: {}", item.title);
            state.summary.skipped_stale += 1;
            return ItemStep::Skipped;
        }

        let fp = fingerprint(&item.title, &item.summary);
        if state.seen.is_duplicate(&fp) {
            debug!("Skip duplicate {}: {}", fp, item.title);
            state.summary.skipped_duplicate += 1;
            return ItemStep::Skipped;
        }

        if self.noise.is_noise(&item.title, &item.summary) {
            debug!("Skip derivative noise: {}", item.title);
            state.summary.skipped_noise += 1;
            return ItemStep::Skipped;
        }

        if !matcher.matches_item(item) {
            debug!("Skip irrelevant: {}", item.title);
            state.summary.skipped_irrelevant += 1;
            return ItemStep::Skipped;
        }

        let snippet = strip_html(&item.summary)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let body = self.articles.fetch_text(&item.link).await;

        let request = AnalysisRequest {
            code: entity.code.clone(),
            display_name: entity.display_name.clone(),
            title: item.title.clone(),
            snippet: snippet.clone(),
            body,
            link: item.link.clone(),
        };

        let analysis = match self.analyst.analyze(&request).await {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("Analysis failed for {}: {}", item.link, e);
                state.summary.analysis_failures += 1;
                return ItemStep::Skipped;
            }
        };

        state.seen.record(fp);

        let message = format_message(
            entity.label(),
            &item.title,
            &snippet,
            &analysis,
            &item.link,
            item.source.as_ref().map(|s| s.name.as_str()),
        );
        if let Err(e) = self.delivery.deliver(&message).await {
            warn!("Delivery failed for {}: {}", item.link, e);
            state.summary.delivery_failures += 1;
            return ItemStep::Skipped;
        }

        state.budget.try_consume();
        info!(
            "Sent {}/{}: {}",
            state.budget.emitted(),
            state.budget.cap(),
            item.title
        );

        if !self.config.send_delay.is_zero() {
            tokio::time::sleep(self.config.send_delay).await;
        }

        ItemStep::Emitted
    }
}
