//! Watcher configuration
//!
//! Everything is read from environment variables, with defaults that track
//! Hòa Phát (HPG) on the main Vietnamese financial outlets.

use std::env;
use std::time::Duration;

use watch_core::TrackedEntity;

use crate::pipeline::PipelineConfig;

/// Full runtime configuration
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Recency window in days
    pub lookback_days: u32,
    /// Maximum items taken from each query's feed
    pub scan_per_feed: usize,
    /// Emission cap per run
    pub max_send_per_run: usize,
    /// Log messages instead of sending them
    pub dry_run: bool,
    /// Pause after each successful emission
    pub send_delay: Duration,
    /// Entities in scan order
    pub entities: Vec<TrackedEntity>,
    /// Derivative-noise substrings
    pub noise_keywords: Vec<String>,
    /// Outlets that get their own `site:` query
    pub sources: Vec<String>,
    pub gemini_api_key: Option<String>,
    pub genai_model: Option<String>,
    pub genai_api_base: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            scan_per_feed: 200,
            max_send_per_run: 5,
            dry_run: false,
            send_delay: Duration::from_secs(3),
            entities: default_entities(),
            noise_keywords: default_noise_keywords(),
            sources: default_sources(),
            gemini_api_key: None,
            genai_model: None,
            genai_api_base: None,
            telegram_token: None,
            telegram_chat_id: None,
        }
    }
}

impl WatchConfig {
    /// Load configuration from the process environment
    ///
    /// Recognized variables: LOOKBACK_DAYS, SCAN_PER_FEED, MAX_SEND_PER_RUN,
    /// DRY_RUN, SEND_DELAY_SECS, TRACKED_ENTITIES (JSON array),
    /// NOISE_KEYWORDS (JSON array), NEWS_SOURCES (comma-separated),
    /// GEMINI_API_KEY, GENAI_MODEL, GENAI_API_BASE, TELEGRAM_TOKEN,
    /// TELEGRAM_CHAT_ID.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(v) = var("LOOKBACK_DAYS") {
            config.lookback_days = parse_number("LOOKBACK_DAYS", &v)?;
        }
        if let Some(v) = var("SCAN_PER_FEED") {
            config.scan_per_feed = parse_number("SCAN_PER_FEED", &v)?;
        }
        if let Some(v) = var("MAX_SEND_PER_RUN") {
            config.max_send_per_run = parse_number("MAX_SEND_PER_RUN", &v)?;
        }
        if let Some(v) = var("SEND_DELAY_SECS") {
            config.send_delay = Duration::from_secs(parse_number("SEND_DELAY_SECS", &v)?);
        }
        if let Some(v) = var("DRY_RUN") {
            config.dry_run = matches!(v.to_lowercase().as_str(), "1" | "true" | "yes");
        }

        if let Some(v) = var("TRACKED_ENTITIES") {
            let entities: Vec<TrackedEntity> =
                serde_json::from_str(&v).map_err(|e| ConfigError::InvalidJson {
                    field: "TRACKED_ENTITIES".to_string(),
                    error: e.to_string(),
                })?;
            if entities.is_empty() {
                return Err(ConfigError::EmptyEntityList);
            }
            config.entities = entities;
        }

        if let Some(v) = var("NOISE_KEYWORDS") {
            config.noise_keywords =
                serde_json::from_str(&v).map_err(|e| ConfigError::InvalidJson {
                    field: "NOISE_KEYWORDS".to_string(),
                    error: e.to_string(),
                })?;
        }

        if let Some(v) = var("NEWS_SOURCES") {
            config.sources = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        config.gemini_api_key = var("GEMINI_API_KEY");
        config.genai_model = var("GENAI_MODEL");
        config.genai_api_base = var("GENAI_API_BASE");
        config.telegram_token = var("TELEGRAM_TOKEN");
        config.telegram_chat_id = var("TELEGRAM_CHAT_ID");

        Ok(config)
    }

    /// The subset of settings the pipeline itself uses
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            lookback_days: self.lookback_days,
            scan_per_feed: self.scan_per_feed,
            max_send_per_run: self.max_send_per_run,
            send_delay: self.send_delay,
            noise_keywords: self.noise_keywords.clone(),
        }
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Hòa Phát and the names its ecosystem shows up under
pub fn default_entities() -> Vec<TrackedEntity> {
    vec![TrackedEntity::new(
        "HPG",
        "Hòa Phát",
        [
            "HPA",
            "Nông nghiệp Hòa Phát",
            "Hoa Phat Agriculture",
            "Trần Đình Long",
            "Dung Quất",
            "Khu liên hợp Dung Quất",
            "Hòa Phát Dung Quất",
        ],
    )]
}

/// Covered-warrant and derivative indicators; "chpg" catches CHPGxxxx warrant codes
pub fn default_noise_keywords() -> Vec<String> {
    [
        "chứng quyền",
        "cw.",
        "cw/",
        "covered warrant",
        "phái sinh",
        "cw hpg",
        "chpg",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub fn default_sources() -> Vec<String> {
    ["vietstock.vn", "vneconomy.vn", "cafef.vn", "ndh.vn"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid number in {field}: {value}")]
    InvalidNumber { field: String, value: String },

    #[error("Invalid JSON in {field}: {error}")]
    InvalidJson { field: String, error: String },

    #[error("TRACKED_ENTITIES cannot be empty")]
    EmptyEntityList,
}
