//! `gridiron-providers` — read-only HTTP clients for the two upstream APIs.
//!
//! [`sportsdata::SportsDataClient`] answers "what season/week is it and when
//! do the season segments start"; [`sleeper::SleeperClient`] answers
//! everything about the league itself (users, rosters, matchups, standings
//! data, drafts, player stats). Both are thin reqwest wrappers returning
//! typed models from [`models`].

pub mod error;
pub mod models;
pub mod sleeper;
pub mod sportsdata;

pub use error::{ProviderError, Result};
pub use sleeper::SleeperClient;
pub use sportsdata::SportsDataClient;
