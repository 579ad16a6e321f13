//! Telegram Bot API sender

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use watch_core::{DeliveryChannel, WatchError, WatchResult};

/// How much of a message is echoed to the log in dry-run mode
const DRY_RUN_PREVIEW_CHARS: usize = 800;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram delivery channel
pub struct TelegramChannel {
    client: Client,
    base_url: String,
    token: String,
    chat_id: String,
    dry_run: bool,
}

impl TelegramChannel {
    /// Create a sender; credentials are required unless `dry_run` is set
    pub fn new(token: &str, chat_id: &str, dry_run: bool) -> WatchResult<Self> {
        let token = token.trim();
        let chat_id = chat_id.trim();

        if !dry_run && (token.is_empty() || chat_id.is_empty()) {
            return Err(WatchError::config_missing(
                "TELEGRAM_TOKEN or TELEGRAM_CHAT_ID is not set",
            ));
        }

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: "https://api.telegram.org".to_string(),
            token: token.to_string(),
            chat_id: chat_id.to_string(),
            dry_run,
        })
    }

    /// Sender that only logs
    pub fn dry_run() -> Self {
        Self {
            client: Client::new(),
            base_url: "https://api.telegram.org".to_string(),
            token: String::new(),
            chat_id: String::new(),
            dry_run: true,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    async fn send_message(&self, text: &str) -> WatchResult<()> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: "Markdown",
        };

        let response = self
            .client
            .post(format!("{}/bot{}/sendMessage", self.base_url, self.token))
            .json(&request)
            .send()
            .await
            .map_err(|e| WatchError::delivery(format!("Telegram request failed: {}", e)))?;

        let status = response.status();
        let body: TelegramResponse = response
            .json()
            .await
            .map_err(|e| WatchError::delivery(format!("Telegram returned status {}: {}", status, e)))?;

        if !status.is_success() || !body.ok {
            return Err(WatchError::delivery(format!(
                "Telegram rejected message (status {}): {}",
                status,
                body.description.unwrap_or_default()
            )));
        }

        debug!("Telegram message delivered to chat {}", self.chat_id);
        Ok(())
    }
}

#[async_trait]
impl DeliveryChannel for TelegramChannel {
    #[instrument(skip(self, message), fields(dry_run = self.dry_run))]
    async fn deliver(&self, message: &str) -> WatchResult<()> {
        if self.dry_run {
            let preview: String = message.chars().take(DRY_RUN_PREVIEW_CHARS).collect();
            info!("[DRY_RUN] Would send Telegram message:\n{}", preview);
            return Ok(());
        }
        self.send_message(message).await
    }
}
