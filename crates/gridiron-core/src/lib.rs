//! `gridiron-core` — configuration and shared types for the Gridiron bot.

pub mod config;
pub mod error;
pub mod payload;

pub use config::GridironConfig;
pub use error::{GridironError, Result};
pub use payload::ReportPayload;
