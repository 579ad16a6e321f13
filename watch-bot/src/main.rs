//! Equity News Watcher
//!
//! Runs the relevance pipeline once over the configured entities and exits.
//! Scheduling is left to an external trigger such as cron.

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use watch_analysis::{LlmAnalyst, DEFAULT_API_BASE, DEFAULT_MODEL};
use watch_news::{ArticleExtractor, GoogleNewsClient};
use watch_notify::TelegramChannel;
use watch_services::{NewsPipeline, WatchConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,watch_bot=debug")),
        )
        .init();

    info!("Starting equity news watcher");

    let config = WatchConfig::from_env().context("Invalid configuration")?;

    // Analysis credentials are required before any feed is touched
    let api_key = config.gemini_api_key.as_deref().unwrap_or_default();
    let api_base = config.genai_api_base.as_deref().unwrap_or(DEFAULT_API_BASE);
    let analyst = match LlmAnalyst::new(api_key, api_base) {
        Ok(analyst) => analyst.with_model(config.genai_model.as_deref().unwrap_or(DEFAULT_MODEL)),
        Err(e) => {
            error!("GEMINI_API_KEY is not set, cannot analyse news: {}", e);
            return Err(e).context("Analysis service unavailable");
        }
    };
    info!("Analysis model: {}", analyst.model());

    let delivery = TelegramChannel::new(
        config.telegram_token.as_deref().unwrap_or_default(),
        config.telegram_chat_id.as_deref().unwrap_or_default(),
        config.dry_run,
    )
    .context("TELEGRAM_TOKEN and TELEGRAM_CHAT_ID are required unless DRY_RUN=1")?;
    if delivery.is_dry_run() {
        warn!("Dry run: messages will be logged, not sent");
    }

    let pipeline = NewsPipeline::new(
        Arc::new(GoogleNewsClient::new(config.sources.clone())),
        Arc::new(ArticleExtractor::default()),
        Arc::new(analyst),
        Arc::new(delivery),
        config.pipeline_config(),
    );

    info!(
        "Tracking {} entities: {}",
        config.entities.len(),
        config
            .entities
            .iter()
            .map(|e| e.label().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let summary = pipeline.run(&config.entities).await;

    info!(
        "Done: {} sent, {} analysis failures, {} delivery failures",
        summary.emitted, summary.analysis_failures, summary.delivery_failures
    );

    Ok(())
}
