//! Durable delayed-action scheduler.
//!
//! Every scheduled action lives as a pending row in the moderation action
//! table; in-memory timers are only a per-process cache over that durable
//! state. A periodic reconciliation pass re-derives timers from the store,
//! which is also the crash-recovery path: after a restart the first pass
//! re-arms everything still pending, so no action is lost as long as the
//! pass cadence is shorter than the shortest restriction.
//!
//! Delivery is at-least-once. Firing claims the row with a conditional
//! update before running the effect, so duplicate fires and concurrent
//! cancellations resolve through rows-affected checks in the store, never
//! through in-memory assumptions. Effects must be idempotent.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::AbortHandle;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::data::ModerationActionRepository;
use crate::error::AppError;
use crate::platform::ChatPlatform;
use entity::moderation_action::ActionKind;

#[cfg(test)]
mod test;

/// Cadence of the reconciliation pass, in seconds.
pub const SWEEP_INTERVAL_SECS: i64 = 600;

/// Cron spec matching the cadence: every tenth minute.
const SWEEP_CRON: &str = "0 */10 * * * *";

/// Margin past the cadence when selecting rows to arm, covering jitter
/// between the cron tick and the query.
const SWEEP_LOOKAHEAD_SECS: i64 = 60;

/// Key for the in-memory timer registry.
///
/// At most one timer is armed per subject and kind; arming again replaces
/// the previous timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionKey {
    pub subject_id: u64,
    pub kind: ActionKind,
}

struct ArmedTimer {
    action_id: i32,
    abort: AbortHandle,
}

/// Scheduler for durable delayed moderation actions.
///
/// Cheap to clone; clones share the timer registry and collaborators.
#[derive(Clone)]
pub struct ActionScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    db: DatabaseConnection,
    platform: Arc<dyn ChatPlatform>,
    timers: Mutex<HashMap<ActionKey, ArmedTimer>>,
}

impl ActionScheduler {
    pub fn new(db: DatabaseConnection, platform: Arc<dyn ChatPlatform>) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                db,
                platform,
                timers: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Schedules an action: durable row first, then an in-memory timer
    /// when the fire time is near enough for this process to reach before
    /// the next reconciliation pass.
    ///
    /// A `None` fire time records an indefinite action that only explicit
    /// cancellation removes. Scheduling over an existing key replaces the
    /// armed timer but leaves earlier durable rows untouched.
    pub async fn schedule(
        &self,
        subject_id: u64,
        staff_id: u64,
        kind: ActionKind,
        fire_at: Option<DateTime<Utc>>,
        reason: Option<String>,
    ) -> Result<entity::moderation_action::Model, AppError> {
        let repo = ModerationActionRepository::new(&self.inner.db);
        let action = repo
            .log(subject_id, staff_id, kind, reason, false, fire_at)
            .await?;

        if let Some(at) = fire_at {
            if at <= Utc::now() + Duration::seconds(SWEEP_INTERVAL_SECS + SWEEP_LOOKAHEAD_SECS) {
                self.arm_timer(ActionKey { subject_id, kind }, action.id, at);
            }
        }

        Ok(action)
    }

    /// Cancels the armed timer for the key, if any, and closes every
    /// pending durable row so reconciliation will not re-arm it.
    ///
    /// Idempotent: cancelling an unknown or already-fired action reports
    /// zero rows closed and is not an error.
    pub async fn cancel(&self, subject_id: u64, kind: ActionKind) -> Result<u64, AppError> {
        let key = ActionKey { subject_id, kind };
        if let Some(timer) = self.inner.timers.lock().unwrap().remove(&key) {
            timer.abort.abort();
        }

        let repo = ModerationActionRepository::new(&self.inner.db);
        let closed = repo.close_pending(subject_id, kind).await?;

        Ok(closed)
    }

    /// One reconciliation pass: arms a timer for every pending timed row
    /// due within the lookahead window that this process is not tracking
    /// yet. Returns the number of timers armed.
    pub async fn sweep(&self) -> Result<usize, AppError> {
        let repo = ModerationActionRepository::new(&self.inner.db);
        let horizon = Utc::now() + Duration::seconds(SWEEP_INTERVAL_SECS + SWEEP_LOOKAHEAD_SECS);
        let due = repo.due_before(horizon).await?;

        let mut armed = 0;
        for row in due {
            let Some(fire_at) = row.fire_at else {
                continue;
            };
            let subject_id = match row.subject_id.parse::<u64>() {
                Ok(id) => id,
                Err(_) => {
                    tracing::error!(
                        "Invalid subject id in action {}: {}",
                        row.id,
                        row.subject_id
                    );
                    continue;
                }
            };

            let key = ActionKey {
                subject_id,
                kind: row.kind,
            };
            if self.inner.timers.lock().unwrap().contains_key(&key) {
                continue;
            }

            self.arm_timer(key, row.id, fire_at);
            armed += 1;
        }

        Ok(armed)
    }

    /// Runs one immediate reconciliation pass, then starts the periodic
    /// job.
    ///
    /// The immediate pass is the restart-recovery path; its failure is a
    /// startup failure and propagates. Once the job is running, a failed
    /// pass is logged and retried on the next tick.
    pub async fn start(&self) -> Result<(), AppError> {
        let recovered = self.sweep().await?;
        if recovered > 0 {
            tracing::info!("Recovered {} pending scheduled actions", recovered);
        }

        let scheduler = JobScheduler::new().await?;

        let sweeper = self.clone();
        let job = Job::new_async(SWEEP_CRON, move |_uuid, _lock| {
            let sweeper = sweeper.clone();
            Box::pin(async move {
                match sweeper.sweep().await {
                    Ok(armed) if armed > 0 => {
                        tracing::debug!("Armed {} scheduled actions", armed);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::error!("Error reconciling scheduled actions: {}", e);
                    }
                }
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;

        tracing::info!("Action scheduler started");

        Ok(())
    }

    fn arm_timer(&self, key: ActionKey, action_id: i32, fire_at: DateTime<Utc>) {
        let delay = (fire_at - Utc::now())
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);
        let deadline = tokio::time::Instant::now() + delay;

        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            inner.fire(key, action_id).await;

            // Drop the registry entry only if it is still ours; a
            // replacement timer may have taken the key meanwhile.
            let mut timers = inner.timers.lock().unwrap();
            if timers.get(&key).is_some_and(|armed| armed.action_id == action_id) {
                timers.remove(&key);
            }
        });

        let mut timers = self.inner.timers.lock().unwrap();
        if let Some(previous) = timers.insert(
            key,
            ArmedTimer {
                action_id,
                abort: handle.abort_handle(),
            },
        ) {
            previous.abort.abort();
        }
    }

    #[cfg(test)]
    pub(crate) async fn fire(&self, key: ActionKey, action_id: i32) {
        self.inner.fire(key, action_id).await;
    }

    #[cfg(test)]
    pub(crate) fn armed_count(&self) -> usize {
        self.inner.timers.lock().unwrap().len()
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&self, subject_id: u64, kind: ActionKind) -> bool {
        self.inner
            .timers
            .lock()
            .unwrap()
            .contains_key(&ActionKey { subject_id, kind })
    }
}

impl SchedulerInner {
    /// Fires one due action.
    ///
    /// The row is claimed before the effect runs; losing the claim means a
    /// duplicate fire or a concurrent cancellation already owns it, and
    /// the effect is skipped. A claimed row whose effect fails is reopened
    /// so the next reconciliation pass retries it. Failures never
    /// propagate past this point; one action's trouble must not touch
    /// the others.
    async fn fire(&self, key: ActionKey, action_id: i32) {
        let repo = ModerationActionRepository::new(&self.db);

        match repo.claim(action_id).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!("Action {} already completed or cancelled", action_id);
                return;
            }
            Err(err) => {
                tracing::error!("Failed to claim action {}: {}", action_id, err);
                return;
            }
        }

        let effect = match key.kind {
            ActionKind::Mute => self.platform.remove_restriction(key.subject_id).await,
            other => {
                tracing::warn!("No effect defined for scheduled {} action", other);
                Ok(())
            }
        };

        match effect {
            Ok(()) => {
                tracing::info!("Restriction on {} expired and was removed", key.subject_id);
            }
            Err(err) => {
                tracing::warn!(
                    "Effect for action {} on {} failed, leaving for retry: {}",
                    action_id,
                    key.subject_id,
                    err
                );
                if let Err(err) = repo.reopen(action_id).await {
                    tracing::error!("Failed to reopen action {}: {}", action_id, err);
                }
            }
        }
    }
}
