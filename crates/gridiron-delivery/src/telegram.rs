//! Telegram Bot API backend.
//!
//! Reports are pre-formatted fixed-width text, so they are sent inside a
//! `<pre>` block with HTML parse mode. Notifications are silent — nobody
//! wants a push for Tuesday standings.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::error::DeliveryError;
use crate::sink::{check_status, split_chunks, DeliverySink};

/// Telegram's message limit is 4096 characters; leave headroom for the
/// `<pre>` wrapper.
const CHUNK_MAX: usize = 4000;

pub struct TelegramSink {
    http: reqwest::Client,
    base_url: String,
    chat_id: i64,
}

impl TelegramSink {
    pub fn new(bot_token: &str, chat_id: i64, timeout: Duration) -> Result<Self, DeliveryError> {
        Self::with_base_url(bot_token, chat_id, timeout, "https://api.telegram.org")
    }

    pub fn with_base_url(
        bot_token: &str,
        chat_id: i64,
        timeout: Duration,
        api_base: &str,
    ) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: format!("{}/bot{}", api_base.trim_end_matches('/'), bot_token),
            chat_id,
        })
    }

    async fn call(&self, method: &str, body: serde_json::Value) -> Result<(), DeliveryError> {
        let url = format!("{}/{}", self.base_url, method);
        let resp = self.http.post(&url).json(&body).send().await?;
        // Do not leak the bot token into error messages.
        check_status(&format!("telegram /{method}"), &resp)
    }
}

#[async_trait]
impl DeliverySink for TelegramSink {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send_message(&self, text: &str) -> Result<(), DeliveryError> {
        let chunks = split_chunks(text, CHUNK_MAX);
        let total = chunks.len();
        for (i, chunk) in chunks.into_iter().enumerate() {
            self.call(
                "sendMessage",
                json!({
                    "chat_id": self.chat_id,
                    "text": format!("<pre>{}</pre>", escape_html(&chunk)),
                    "parse_mode": "HTML",
                    "disable_notification": true,
                }),
            )
            .await?;
            if i + 1 < total {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        }
        debug!(chars = text.len(), "telegram message sent");
        Ok(())
    }

    async fn send_photo(&self, image_url: &str, caption: &str) -> Result<(), DeliveryError> {
        self.call(
            "sendPhoto",
            json!({
                "chat_id": self.chat_id,
                "photo": image_url,
                "caption": caption,
                "disable_notification": true,
            }),
        )
        .await?;
        debug!(%image_url, "telegram photo sent");
        Ok(())
    }
}

/// Escape the three characters HTML parse mode requires escaping inside `<pre>`.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_escapes_angle_brackets_and_ampersand() {
        assert_eq!(escape_html("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn escape_html_leaves_normal_text() {
        let input = "Matchup 1\nTeam A  101.22";
        assert_eq!(escape_html(input), input);
    }

    #[test]
    fn base_url_embeds_token() {
        let sink =
            TelegramSink::with_base_url("123:abc", 42, Duration::from_secs(5), "https://api.telegram.org")
                .unwrap();
        assert_eq!(sink.base_url, "https://api.telegram.org/bot123:abc");
        assert_eq!(sink.chat_id, 42);
    }
}
