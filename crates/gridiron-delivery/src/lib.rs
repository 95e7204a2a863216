//! `gridiron-delivery` — the `DeliverySink` capability and its four
//! interchangeable webhook backends (GroupMe, Slack, Discord, Telegram).
//!
//! Exactly one sink is built at startup from [`BotConfig`]; the poll loop
//! only ever sees the trait object.

use std::sync::Arc;
use std::time::Duration;

use gridiron_core::config::{BotBackend, BotConfig};

pub mod discord;
pub mod error;
pub mod groupme;
pub mod sink;
pub mod slack;
pub mod telegram;

pub use error::DeliveryError;
pub use sink::DeliverySink;

/// Build the sink selected by `config.backend`.
///
/// Fails with `ConfigError` when the selected backend's section is missing.
pub fn build_sink(config: &BotConfig, timeout: Duration) -> Result<Arc<dyn DeliverySink>, DeliveryError> {
    let missing = |section: &str| {
        DeliveryError::ConfigError(format!("[bot.{section}] section is required for this backend"))
    };

    let sink: Arc<dyn DeliverySink> = match config.backend {
        BotBackend::GroupMe => {
            let c = config.groupme.as_ref().ok_or_else(|| missing("groupme"))?;
            Arc::new(groupme::GroupMeSink::new(&c.bot_id, timeout)?)
        }
        BotBackend::Slack => {
            let c = config.slack.as_ref().ok_or_else(|| missing("slack"))?;
            Arc::new(slack::SlackSink::new(&c.webhook_url, timeout)?)
        }
        BotBackend::Discord => {
            let c = config.discord.as_ref().ok_or_else(|| missing("discord"))?;
            Arc::new(discord::DiscordSink::new(&c.webhook_url, timeout)?)
        }
        BotBackend::Telegram => {
            let c = config.telegram.as_ref().ok_or_else(|| missing("telegram"))?;
            Arc::new(telegram::TelegramSink::new(&c.bot_token, c.chat_id, timeout)?)
        }
    };
    Ok(sink)
}
