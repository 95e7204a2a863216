//! `gridiron-reports` — turns league data into the messages the bot sends.
//!
//! Split in three layers: [`view`] computes pure aggregates (scoreboards,
//! standings, bench points) from provider models, [`format`] renders them as
//! chat-ready strings, and [`actions`] binds the two to the provider clients
//! as [`ReportAction`](gridiron_scheduler::ReportAction) implementations the
//! scheduler can fire.

pub mod actions;
pub mod format;
pub mod view;

pub use actions::ReportContext;
