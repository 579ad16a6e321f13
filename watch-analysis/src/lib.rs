//! Impact analysis for equity news
//!
//! This crate turns a filtered news item into a short Vietnamese-language
//! analysis using a chat-completion model behind an OpenAI-compatible API
//! (Gemini/Gemma by default).

pub mod client;
pub mod prompt;

pub use client::{LlmAnalyst, DEFAULT_API_BASE, DEFAULT_MODEL};
pub use prompt::build_prompt;
