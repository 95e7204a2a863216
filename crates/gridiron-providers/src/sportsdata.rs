//! sportsdata.io NFL scores client — season identity and segment schedules.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use gridiron_core::config::HTTP_USER_AGENT;

use crate::error::{ProviderError, Result};
use crate::models::ScheduledGame;

const BASE_URL: &str = "https://api.sportsdata.io/v3/nfl/scores/json";
/// Header carrying the subscription key on every request.
const API_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Season segment suffix appended to the season year in schedule queries
/// (`2021`, `2021PRE`, `2021POST`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonSegment {
    Pre,
    Regular,
    Post,
}

impl SeasonSegment {
    pub fn suffix(&self) -> &'static str {
        match self {
            SeasonSegment::Pre => "PRE",
            SeasonSegment::Regular => "",
            SeasonSegment::Post => "POST",
        }
    }
}

impl std::fmt::Display for SeasonSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeasonSegment::Regular => write!(f, "regular"),
            SeasonSegment::Pre => write!(f, "PRE"),
            SeasonSegment::Post => write!(f, "POST"),
        }
    }
}

/// Client for the sportsdata.io read API.
pub struct SportsDataClient {
    http: reqwest::Client,
    base_url: String,
}

impl SportsDataClient {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, timeout, BASE_URL)
    }

    /// Same as [`new`](Self::new) with an overridable base URL (tests).
    pub fn with_base_url(api_key: &str, timeout: Duration, base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(HTTP_USER_AGENT));
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(api_key).map_err(|_| {
                ProviderError::InvalidCredential("API key is not a valid header value".into())
            })?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Current season year, e.g. `"2021"`.
    pub async fn current_season(&self) -> Result<String> {
        let url = format!("{}/CurrentSeason", self.base_url);
        let resp = self.http.get(&url).send().await?;
        check_status(&url, &resp)?;
        // The endpoint returns the bare year; some gateways quote it.
        let body = resp.text().await?;
        let season = body.trim().trim_matches('"').to_string();
        debug!(%season, "resolved current season");
        Ok(season)
    }

    /// Current NFL week number.
    pub async fn current_week(&self) -> Result<u32> {
        let url = format!("{}/CurrentWeek", self.base_url);
        let resp = self.http.get(&url).send().await?;
        check_status(&url, &resp)?;
        let week: u32 = resp.json().await?;
        debug!(%week, "resolved current week");
        Ok(week)
    }

    /// Ordered game list for one season segment.
    pub async fn schedule(&self, season: &str, segment: SeasonSegment) -> Result<Vec<ScheduledGame>> {
        let url = format!("{}/Schedules/{}{}", self.base_url, season, segment.suffix());
        let resp = self.http.get(&url).send().await?;
        check_status(&url, &resp)?;
        let games: Vec<ScheduledGame> = resp.json().await?;
        debug!(%season, %segment, games = games.len(), "fetched segment schedule");
        Ok(games)
    }
}

pub(crate) fn check_status(url: &str, resp: &reqwest::Response) -> Result<()> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ProviderError::UpstreamUnavailable {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_suffixes_match_upstream_url_scheme() {
        assert_eq!(SeasonSegment::Pre.suffix(), "PRE");
        assert_eq!(SeasonSegment::Regular.suffix(), "");
        assert_eq!(SeasonSegment::Post.suffix(), "POST");
    }

    #[test]
    fn client_builds_with_plain_api_key() {
        let client = SportsDataClient::new("key-123", Duration::from_secs(10));
        assert!(client.is_ok());
    }

    #[test]
    fn client_rejects_non_header_api_key() {
        let client = SportsDataClient::new("bad\nkey", Duration::from_secs(10));
        assert!(client.is_err());
    }
}
