//! Filtering and orchestration services for the equity news watcher
//!
//! The filtering core (text normalization, entity matching, derivative-noise
//! suppression, recency windowing and fingerprint deduplication) is pure and
//! performs no I/O. `NewsPipeline` composes it with the collaborators from
//! `watch-core` and enforces the per-run emission cap.

pub mod budget;
pub mod config;
pub mod fingerprint;
pub mod matcher;
pub mod noise;
pub mod pipeline;
pub mod recency;
pub mod text;

pub use budget::RunBudget;
pub use config::{default_entities, default_noise_keywords, default_sources, ConfigError, WatchConfig};
pub use fingerprint::{fingerprint, Fingerprint, SeenFingerprintSet};
pub use matcher::{contains_code, is_relevant, EntityMatcher};
pub use noise::{is_derivative_noise, NoiseClassifier};
pub use pipeline::{NewsPipeline, PipelineConfig, RunOutcome, RunSummary};
pub use recency::{is_within_days, is_within_days_at};
pub use text::{normalize, strip_accents, strip_html};
