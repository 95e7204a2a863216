//! The poll loop — fixed-period tick, phase selection, due-job dispatch.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio::sync::watch;
use tracing::{debug, error, info};

use gridiron_delivery::DeliverySink;

use crate::calendar::SeasonCalendar;
use crate::job::SchedulerState;
use crate::phase::select_phase;

/// Single-threaded dispatcher: every tick it re-evaluates the active phase
/// and runs that phase's newly due jobs sequentially, one at a time.
///
/// Job failures are isolated at the job boundary: an action or delivery
/// error is logged with its phase, job name and timestamp, and neither stops
/// the loop nor blocks the remaining jobs of the tick.
pub struct PollLoop {
    calendar: SeasonCalendar,
    state: SchedulerState,
    sink: Arc<dyn DeliverySink>,
    tz: Tz,
    tick_period: Duration,
}

impl PollLoop {
    pub fn new(
        calendar: SeasonCalendar,
        state: SchedulerState,
        sink: Arc<dyn DeliverySink>,
        tz: Tz,
        tick_period: Duration,
    ) -> Self {
        Self {
            calendar,
            state,
            sink,
            tz,
            tick_period,
        }
    }

    /// Main event loop. Ticks until `shutdown` broadcasts `true`; the tick
    /// in progress always finishes before the loop exits.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            period_secs = self.tick_period.as_secs(),
            jobs = self.state.job_count(),
            "poll loop started"
        );

        let mut interval = tokio::time::interval(self.tick_period);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let now = Utc::now().with_timezone(&self.tz);
                    self.tick(now).await;
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("poll loop shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// Process one tick at `now`. Public so tests can drive the loop with a
    /// synthetic clock.
    pub async fn tick(&mut self, now: DateTime<Tz>) {
        let Some(phase) = select_phase(now, &self.calendar) else {
            debug!(%now, "no active phase, skipping tick");
            return;
        };

        let sink = Arc::clone(&self.sink);
        for job in self.state.collection_mut(phase).iter_mut() {
            if !job.is_due(now) {
                continue;
            }
            // Advance before running: a failed occurrence is not retried
            // until its next natural recurrence.
            job.mark_fired(now);
            info!(job = %job.name(), %phase, %now, "running due job");

            match job.produce().await {
                Ok(payload) => {
                    debug!(job = %job.name(), payload = %payload.describe(), "report produced");
                    if let Err(e) = sink.deliver(&payload).await {
                        error!(job = %job.name(), %phase, %now, error = %e, "delivery failed");
                    }
                }
                Err(e) => {
                    error!(job = %job.name(), %phase, %now, error = %e, "report action failed");
                }
            }
        }
    }

    pub fn calendar(&self) -> &SeasonCalendar {
        &self.calendar
    }
}
