//! Discord webhook backend.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::error::DeliveryError;
use crate::sink::{check_status, split_chunks, DeliverySink};

/// Discord caps webhook message content at 2000 characters.
const CONTENT_MAX: usize = 2000;

pub struct DiscordSink {
    http: reqwest::Client,
    webhook_url: String,
}

impl DiscordSink {
    pub fn new(webhook_url: &str, timeout: Duration) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            webhook_url: webhook_url.to_string(),
        })
    }

    async fn post_content(&self, content: &str) -> Result<(), DeliveryError> {
        let resp = self
            .http
            .post(&self.webhook_url)
            .json(&json!({ "content": content }))
            .send()
            .await?;
        check_status(&self.webhook_url, &resp)?;
        Ok(())
    }
}

#[async_trait]
impl DeliverySink for DiscordSink {
    fn name(&self) -> &str {
        "discord"
    }

    async fn send_message(&self, text: &str) -> Result<(), DeliveryError> {
        for chunk in split_chunks(text, CONTENT_MAX) {
            self.post_content(&chunk).await?;
        }
        debug!(chars = text.len(), "discord message sent");
        Ok(())
    }

    async fn send_photo(&self, image_url: &str, caption: &str) -> Result<(), DeliveryError> {
        let resp = self
            .http
            .post(&self.webhook_url)
            .json(&json!({
                "content": caption,
                "embeds": [{ "image": { "url": image_url } }],
            }))
            .send()
            .await?;
        check_status(&self.webhook_url, &resp)?;
        debug!(%image_url, "discord photo sent");
        Ok(())
    }
}

