//! Delivery of news alerts
//!
//! Formats an analysed item into a chat message and sends it through the
//! Telegram Bot API, or only logs it in dry-run mode.

pub mod message;
pub mod telegram;

pub use message::{format_message, SNIPPET_MAX_CHARS};
pub use telegram::TelegramChannel;
