//! Report payload — the boundary type between report producers and delivery sinks.

use serde::{Deserialize, Serialize};

/// A rendered report ready for delivery.
///
/// Producers build one of these with no side effects; the selected
/// `DeliverySink` implementation decides how to ship it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportPayload {
    /// Plain text message.
    Text { body: String },

    /// Image by URL with a caption. Backends without photo support reject
    /// this with `DeliveryError::Unsupported`.
    Photo { image_url: String, caption: String },
}

impl ReportPayload {
    pub fn text(body: impl Into<String>) -> Self {
        ReportPayload::Text { body: body.into() }
    }

    /// Short description for log lines (never the full body).
    pub fn describe(&self) -> String {
        match self {
            ReportPayload::Text { body } => format!("text ({} chars)", body.len()),
            ReportPayload::Photo { image_url, .. } => format!("photo ({image_url})"),
        }
    }
}
