use chrono_tz::Tz;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Default poll-loop tick period, in seconds.
pub const DEFAULT_TICK_SECS: u64 = 50;
/// Default per-request HTTP timeout for upstream providers, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
/// Point difference under which a matchup counts as a close game.
pub const DEFAULT_CLOSE_NUM: f64 = 10.0;
/// User-Agent sent with every sportsdata.io request.
pub const HTTP_USER_AGENT: &str = "gridiron-bot/0.3";

/// Top-level config (gridiron.toml + GRIDIRON_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridironConfig {
    pub bot: BotConfig,
    pub league: LeagueConfig,
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// Which chat backend to deliver reports to, and its credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Backend selector: "groupme", "slack", "discord" or "telegram".
    pub backend: BotBackend,
    /// Send the welcome message once on startup (default: true).
    #[serde(default = "bool_true")]
    pub init_message: bool,
    pub groupme: Option<GroupMeConfig>,
    pub slack: Option<SlackConfig>,
    pub discord: Option<DiscordConfig>,
    pub telegram: Option<TelegramConfig>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BotBackend {
    GroupMe,
    Slack,
    Discord,
    Telegram,
}

impl std::fmt::Display for BotBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BotBackend::GroupMe => "groupme",
            BotBackend::Slack => "slack",
            BotBackend::Discord => "discord",
            BotBackend::Telegram => "telegram",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMeConfig {
    pub bot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    pub webhook_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    pub webhook_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: i64,
}

/// League identity and report tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueConfig {
    /// Sleeper league ID.
    pub id: String,
    /// Display name used in the welcome message.
    #[serde(default = "default_league_name")]
    pub name: String,
    /// Teams above the playoff cut line in the standings report.
    #[serde(default = "default_playoff_teams")]
    pub playoff_teams: usize,
    /// Point difference under which a matchup is reported as close.
    #[serde(default = "default_close_num")]
    pub close_num: f64,
    /// Sleeper stat key used for team scores (e.g. "pts_half_ppr", "pts_std").
    #[serde(default = "default_scoring_key")]
    pub scoring_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// sportsdata.io subscription key (Ocp-Apim-Subscription-Key header).
    pub sportsdata_api_key: String,
    /// Per-request timeout for all upstream HTTP calls.
    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,
}

/// Poll-loop tuning. All report times are local to `timezone`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// IANA zone all anchors and recurrence times are interpreted in.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    /// Poll-loop tick period in seconds.
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            tick_secs: default_tick_secs(),
        }
    }
}

fn bool_true() -> bool {
    true
}
fn default_league_name() -> String {
    "Gridiron League".to_string()
}
fn default_playoff_teams() -> usize {
    6
}
fn default_close_num() -> f64 {
    DEFAULT_CLOSE_NUM
}
fn default_scoring_key() -> String {
    "pts_half_ppr".to_string()
}
fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}
fn default_timezone() -> Tz {
    chrono_tz::America::Chicago
}
fn default_tick_secs() -> u64 {
    DEFAULT_TICK_SECS
}

impl GridironConfig {
    /// Load config from a TOML file with GRIDIRON_* env var overrides.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path.unwrap_or("gridiron.toml");

        let config: GridironConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("GRIDIRON_").split("_"))
            .extract()
            .map_err(|e| crate::error::GridironError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Credential sanity check: the selected backend must have its section.
    pub fn validate(&self) -> crate::error::Result<()> {
        let ok = match self.bot.backend {
            BotBackend::GroupMe => self.bot.groupme.is_some(),
            BotBackend::Slack => self.bot.slack.is_some(),
            BotBackend::Discord => self.bot.discord.is_some(),
            BotBackend::Telegram => self.bot.telegram.is_some(),
        };
        if !ok {
            return Err(crate::error::GridironError::Config(format!(
                "backend '{}' selected but its [bot.{}] section is missing",
                self.bot.backend, self.bot.backend
            )));
        }
        Ok(())
    }
}
