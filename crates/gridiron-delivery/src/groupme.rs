//! GroupMe bot backend — posts through the bots API with a bot ID.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::error::DeliveryError;
use crate::sink::{check_status, DeliverySink};

const POST_URL: &str = "https://api.groupme.com/v3/bots/post";

pub struct GroupMeSink {
    http: reqwest::Client,
    bot_id: String,
    post_url: String,
}

impl GroupMeSink {
    pub fn new(bot_id: &str, timeout: Duration) -> Result<Self, DeliveryError> {
        Self::with_post_url(bot_id, timeout, POST_URL)
    }

    pub fn with_post_url(bot_id: &str, timeout: Duration, post_url: &str) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            bot_id: bot_id.to_string(),
            post_url: post_url.to_string(),
        })
    }
}

#[async_trait]
impl DeliverySink for GroupMeSink {
    fn name(&self) -> &str {
        "groupme"
    }

    async fn send_message(&self, text: &str) -> Result<(), DeliveryError> {
        let resp = self
            .http
            .post(&self.post_url)
            .json(&json!({ "bot_id": self.bot_id, "text": text }))
            .send()
            .await?;
        check_status(&self.post_url, &resp)?;
        debug!(chars = text.len(), "groupme message sent");
        Ok(())
    }

    async fn send_photo(&self, image_url: &str, caption: &str) -> Result<(), DeliveryError> {
        // GroupMe attaches images via the picture_url attachment type.
        let resp = self
            .http
            .post(&self.post_url)
            .json(&json!({
                "bot_id": self.bot_id,
                "text": caption,
                "attachments": [{ "type": "image", "url": image_url }],
            }))
            .send()
            .await?;
        check_status(&self.post_url, &resp)?;
        debug!(%image_url, "groupme photo sent");
        Ok(())
    }
}
