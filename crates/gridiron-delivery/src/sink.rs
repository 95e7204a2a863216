use async_trait::async_trait;

use gridiron_core::payload::ReportPayload;

use crate::error::DeliveryError;

/// Common interface implemented by every delivery backend.
///
/// Implementations must be `Send + Sync` so one sink can be shared with the
/// poll loop behind an `Arc`. Delivery is fallible and never fatal: the
/// caller logs a failed send and moves on.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    /// Stable lowercase identifier for this backend (e.g. `"slack"`).
    fn name(&self) -> &str;

    /// Deliver a plain text message.
    async fn send_message(&self, text: &str) -> Result<(), DeliveryError>;

    /// Deliver an image by URL with a caption.
    ///
    /// Backends without photo support keep this default.
    async fn send_photo(&self, image_url: &str, caption: &str) -> Result<(), DeliveryError> {
        let _ = (image_url, caption);
        Err(DeliveryError::Unsupported {
            backend: self.name().to_string(),
            what: "photo".to_string(),
        })
    }

    /// Route a [`ReportPayload`] to the matching send method.
    async fn deliver(&self, payload: &ReportPayload) -> Result<(), DeliveryError> {
        match payload {
            ReportPayload::Text { body } => self.send_message(body).await,
            ReportPayload::Photo { image_url, caption } => {
                self.send_photo(image_url, caption).await
            }
        }
    }
}

pub(crate) fn check_status(url: &str, resp: &reqwest::Response) -> Result<(), DeliveryError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(DeliveryError::Rejected {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(())
}

/// Newline-preferring splitter for messages over a backend's length cap.
///
/// Splits at the last newline before the limit, then the last space, falling
/// back to a hard cut for a single oversized run.
pub(crate) fn split_chunks(text: &str, max: usize) -> Vec<String> {
    if text.len() <= max {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut remaining = text;
    while remaining.len() > max {
        // Back off to a char boundary so multi-byte text never splits a
        // code point.
        let mut limit = max;
        while !remaining.is_char_boundary(limit) {
            limit -= 1;
        }
        let cut = remaining[..limit]
            .rfind('\n')
            .or_else(|| remaining[..limit].rfind(' '))
            .filter(|&i| i > 0)
            .unwrap_or(limit);
        chunks.push(remaining[..cut].to_string());
        remaining = remaining[cut..].trim_start_matches(['\n', ' ']);
    }
    if !remaining.is_empty() {
        chunks.push(remaining.to_string());
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_single_chunk() {
        let chunks = split_chunks("Scores\nMatchup 1", 2000);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "Scores\nMatchup 1");
    }

    #[test]
    fn over_limit_splits_on_newline() {
        let line = "a".repeat(900);
        let text = format!("{line}\n{line}\n{line}");
        let chunks = split_chunks(&text, 2000);
        assert!(chunks.len() >= 2);
        for c in &chunks {
            assert!(c.len() <= 2000, "chunk too large: {}", c.len());
        }
    }

    #[test]
    fn single_oversized_line_is_hard_cut() {
        let text = "x".repeat(4500);
        let chunks = split_chunks(&text, 2000);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() <= 2000));
    }
}
