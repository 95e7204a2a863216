use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use chrono_tz::Tz;
use clap::Parser;
use tokio::sync::watch;
use tracing::{info, warn};

use gridiron_core::GridironConfig;
use gridiron_delivery::{build_sink, DeliverySink};
use gridiron_providers::{ProviderError, SleeperClient, SportsDataClient};
use gridiron_reports::format::welcome_message;
use gridiron_reports::ReportContext;
use gridiron_scheduler::calendar::{resolve_calendar, DraftSource, ScheduleSource};
use gridiron_scheduler::{PollLoop, SchedulerState, SeasonCalendar};

mod jobs;

/// First retry delay for season-calendar resolution (seconds).
const BACKOFF_BASE_SECS: u64 = 5;
/// Cap on the retry delay (seconds).
const BACKOFF_MAX_SECS: u64 = 60;
/// Attempts before startup gives up.
const MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Parser)]
#[command(name = "gridiron-bot", about = "Fantasy-league stats bot")]
struct Args {
    /// Path to gridiron.toml (default: ./gridiron.toml, or GRIDIRON_CONFIG).
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gridiron=info,gridiron_bot=info".into()),
        )
        .init();

    let args = Args::parse();
    let config_path = args.config.or_else(|| std::env::var("GRIDIRON_CONFIG").ok());
    let config = GridironConfig::load(config_path.as_deref()).context("loading config")?;
    config.validate().context("validating config")?;

    let timeout = Duration::from_secs(config.providers.timeout_secs);
    let tz = config.schedule.timezone;

    let sportsdata = Arc::new(
        SportsDataClient::new(&config.providers.sportsdata_api_key, timeout)
            .context("building sportsdata client")?,
    );
    let sleeper = Arc::new(
        SleeperClient::new(&config.league.id, timeout).context("building sleeper client")?,
    );

    // No calendar, no valid phase: resolution failure after retries is fatal.
    let calendar = resolve_with_backoff(sportsdata.as_ref(), sleeper.as_ref(), tz)
        .await
        .context("resolving season calendar")?;

    let sink = build_sink(&config.bot, timeout).context("building delivery sink")?;
    info!(backend = %sink.name(), league = %config.league.name, season = %calendar.season, "delivery sink ready");

    if config.bot.init_message {
        let welcome = welcome_message(&config.league.name, &calendar.season);
        if let Err(e) = sink.send_message(&welcome).await {
            warn!(error = %e, "welcome message failed, continuing");
        }
    }

    let ctx = Arc::new(ReportContext {
        sleeper,
        sportsdata,
        season: calendar.season.clone(),
        scoring_key: config.league.scoring_key.clone(),
        close_num: config.league.close_num,
        playoff_teams: config.league.playoff_teams,
    });

    let mut state = SchedulerState::new();
    let now = Utc::now().with_timezone(&tz);
    jobs::register_jobs(&mut state, &ctx, &calendar, tz, now);
    info!(jobs = state.job_count(), "job table registered");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, requesting shutdown");
            let _ = shutdown_tx.send(true);
        }
    });

    PollLoop::new(
        calendar,
        state,
        sink,
        tz,
        Duration::from_secs(config.schedule.tick_secs),
    )
    .run(shutdown_rx)
    .await;

    Ok(())
}

/// Resolve the season calendar with bounded exponential backoff:
/// 5 s → 10 s → 20 s → 40 s → give up.
async fn resolve_with_backoff<S, L>(
    schedule: &S,
    league: &L,
    tz: Tz,
) -> Result<SeasonCalendar, ProviderError>
where
    S: ScheduleSource,
    L: DraftSource,
{
    let mut delay_secs = BACKOFF_BASE_SECS;

    for attempt in 1..=MAX_ATTEMPTS {
        match resolve_calendar(schedule, league, tz).await {
            Ok(calendar) => return Ok(calendar),
            Err(e) if attempt == MAX_ATTEMPTS => return Err(e),
            Err(e) => {
                warn!(
                    attempt,
                    max = MAX_ATTEMPTS,
                    error = %e,
                    retry_after_secs = delay_secs,
                    "calendar resolution failed, retrying"
                );
                tokio::time::sleep(Duration::from_secs(delay_secs)).await;
                delay_secs = (delay_secs * 2).min(BACKOFF_MAX_SECS);
            }
        }
    }

    // Unreachable — the loop always returns inside the match arms above.
    unreachable!("backoff loop exited without returning")
}
