//! Jobs, per-phase collections, and the scheduler state the poll loop owns.

use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;

use gridiron_core::payload::ReportPayload;

use crate::error::ActionError;
use crate::phase::Phase;
use crate::rule::RecurrenceRule;

/// A report producer bound to a job. Pure with respect to delivery: it
/// builds a payload (fetching upstream data as needed) and never sends.
#[async_trait]
pub trait ReportAction: Send + Sync {
    async fn produce(&self) -> Result<ReportPayload, ActionError>;
}

/// A recurrence rule paired with an action, plus the firing bookkeeping that
/// guarantees at-most-once per occurrence.
pub struct Job {
    name: String,
    rule: RecurrenceRule,
    action: Box<dyn ReportAction>,
    /// The next occurrence this job will fire for. Seeded at registration,
    /// advanced on every fire (successful or not — a failed occurrence is
    /// not retried until the next natural one).
    next_due: DateTime<Tz>,
    last_fired: Option<DateTime<Tz>>,
}

impl Job {
    /// Create a job; its first due time is the rule's next occurrence after
    /// `registered_at`.
    pub fn new(
        name: impl Into<String>,
        rule: RecurrenceRule,
        action: Box<dyn ReportAction>,
        registered_at: DateTime<Tz>,
    ) -> Self {
        Self {
            name: name.into(),
            rule,
            next_due: rule.next_occurrence(registered_at),
            last_fired: None,
            action,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> &RecurrenceRule {
        &self.rule
    }

    pub fn next_due(&self) -> DateTime<Tz> {
        self.next_due
    }

    pub fn last_fired(&self) -> Option<DateTime<Tz>> {
        self.last_fired
    }

    /// Whether the job's next occurrence has arrived.
    pub fn is_due(&self, now: DateTime<Tz>) -> bool {
        now >= self.next_due
    }

    /// Record a fire at `now` and advance to the next occurrence.
    pub fn mark_fired(&mut self, now: DateTime<Tz>) {
        self.last_fired = Some(now);
        self.next_due = self.rule.next_occurrence(now);
    }

    pub async fn produce(&self) -> Result<ReportPayload, ActionError> {
        self.action.produce().await
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("name", &self.name)
            .field("rule", &self.rule)
            .field("next_due", &self.next_due)
            .field("last_fired", &self.last_fired)
            .finish_non_exhaustive()
    }
}

/// Ordered set of jobs bound to one phase. Built once at startup; iteration
/// order is registration order.
#[derive(Debug, Default)]
pub struct JobCollection {
    jobs: Vec<Job>,
}

impl JobCollection {
    pub fn push(&mut self, job: Job) {
        self.jobs.push(job);
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Job> {
        self.jobs.iter_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// All job collections, owned by the poll loop. No ambient globals: built
/// once during startup configuration and passed into the loop.
///
/// Four collections back five phases: `PostDraft` and `RegularSeason`
/// deliberately share the season collection, matching the observed behavior
/// of the system this replaces (see DESIGN.md).
#[derive(Debug, Default)]
pub struct SchedulerState {
    pre_season: JobCollection,
    season: JobCollection,
    post_season: JobCollection,
    off_season: JobCollection,
}

impl SchedulerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a job to the collection backing `phase`.
    pub fn register(
        &mut self,
        phase: Phase,
        name: impl Into<String>,
        rule: RecurrenceRule,
        action: Box<dyn ReportAction>,
        registered_at: DateTime<Tz>,
    ) {
        let job = Job::new(name, rule, action, registered_at);
        tracing::info!(job = %job.name(), %phase, rule = %job.rule(), next_due = %job.next_due(), "job registered");
        self.collection_mut(phase).push(job);
    }

    pub fn collection(&self, phase: Phase) -> &JobCollection {
        match phase {
            Phase::PreSeason => &self.pre_season,
            Phase::PostDraft | Phase::RegularSeason => &self.season,
            Phase::PostSeason => &self.post_season,
            Phase::OffSeason => &self.off_season,
        }
    }

    pub fn collection_mut(&mut self, phase: Phase) -> &mut JobCollection {
        match phase {
            Phase::PreSeason => &mut self.pre_season,
            Phase::PostDraft | Phase::RegularSeason => &mut self.season,
            Phase::PostSeason => &mut self.post_season,
            Phase::OffSeason => &mut self.off_season,
        }
    }

    pub fn job_count(&self) -> usize {
        self.pre_season.len() + self.season.len() + self.post_season.len() + self.off_season.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::at;
    use chrono::TimeZone;
    use chrono_tz::America::Chicago;

    struct NoopAction;

    #[async_trait]
    impl ReportAction for NoopAction {
        async fn produce(&self) -> Result<ReportPayload, ActionError> {
            Ok(ReportPayload::text("ok"))
        }
    }

    #[test]
    fn job_seeds_next_due_from_registration_time() {
        let registered = Chicago.with_ymd_and_hms(2021, 9, 10, 9, 0, 0).unwrap();
        let job = Job::new(
            "daily",
            RecurrenceRule::Daily { at: at(18, 0) },
            Box::new(NoopAction),
            registered,
        );
        assert_eq!(
            job.next_due(),
            Chicago.with_ymd_and_hms(2021, 9, 10, 18, 0, 0).unwrap()
        );
        assert!(job.last_fired().is_none());
    }

    #[test]
    fn post_draft_and_regular_season_share_a_collection() {
        let registered = Chicago.with_ymd_and_hms(2021, 8, 1, 0, 0, 0).unwrap();
        let mut state = SchedulerState::new();
        state.register(
            Phase::RegularSeason,
            "scores",
            RecurrenceRule::Daily { at: at(10, 0) },
            Box::new(NoopAction),
            registered,
        );

        assert_eq!(state.collection(Phase::PostDraft).len(), 1);
        assert_eq!(state.collection(Phase::RegularSeason).len(), 1);
        assert_eq!(state.collection(Phase::PreSeason).len(), 0);
        assert_eq!(state.job_count(), 1);
    }
}
