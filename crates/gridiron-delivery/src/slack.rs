//! Slack incoming-webhook backend.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::error::DeliveryError;
use crate::sink::{check_status, DeliverySink};

pub struct SlackSink {
    http: reqwest::Client,
    webhook_url: String,
}

impl SlackSink {
    pub fn new(webhook_url: &str, timeout: Duration) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            webhook_url: webhook_url.to_string(),
        })
    }
}

#[async_trait]
impl DeliverySink for SlackSink {
    fn name(&self) -> &str {
        "slack"
    }

    async fn send_message(&self, text: &str) -> Result<(), DeliveryError> {
        let resp = self
            .http
            .post(&self.webhook_url)
            .json(&json!({ "text": text }))
            .send()
            .await?;
        check_status(&self.webhook_url, &resp)?;
        debug!(chars = text.len(), "slack message sent");
        Ok(())
    }
}
