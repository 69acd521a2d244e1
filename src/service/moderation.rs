//! Moderation workflow.
//!
//! Orchestrates restrictions, durable audit logging, the delayed-action
//! scheduler, and the ban-request escalation queue. Durable intent is
//! written before platform effects: a restriction that fails to land on
//! the platform still stands in the store and is re-applied when the
//! subject resurfaces.

use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, SqlErr};
use serenity::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::data::ban_request::NewBanRequest;
use crate::data::{BanRequestRepository, ModerationActionRepository};
use crate::error::AppError;
use crate::interaction::paginator::{
    ControlHandler, ControlOutcome, PageContext, PageFormatter, PaginatorBuilder, PaginatorHandle,
};
use crate::interaction::router::InteractionRouter;
use crate::platform::{ButtonStyle, ChannelRef, ChatPlatform, Component, RenderedPage};
use crate::scheduler::ActionScheduler;
use entity::moderation_action::ActionKind;

/// Component id of the terminal control on the escalation review view.
pub const CONTROL_RESOLVE_ALL: &str = "resolve-all";

/// Inactivity window for the escalation review view.
const REVIEW_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(900);

/// Allowed bounds for timed restrictions.
#[derive(Clone, Copy, Debug)]
pub struct RestrictionLimits {
    pub min: Duration,
    pub max: Duration,
}

impl RestrictionLimits {
    pub fn new(min_secs: i64, max_secs: i64) -> Self {
        Self {
            min: Duration::seconds(min_secs),
            max: Duration::seconds(max_secs),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.min_restriction_secs, config.max_restriction_secs)
    }
}

/// Outcome of applying a timed restriction.
pub struct RestrictionOutcome {
    pub action: entity::moderation_action::Model,
    /// Whether the platform restriction actually landed. The durable
    /// record stands either way; the intent was genuine.
    pub applied: bool,
}

/// Outcome of lifting a restriction.
pub struct LiftOutcome {
    /// Pending rows closed. Zero means the subject was not under a
    /// scheduled restriction.
    pub cancelled: u64,
    /// Whether the platform removal succeeded.
    pub removed: bool,
}

/// Outcome of resolving the escalation queue.
pub struct BatchOutcome {
    pub attempted: usize,
    pub banned: usize,
}

pub struct ModerationService<'a> {
    db: &'a DatabaseConnection,
    platform: Arc<dyn ChatPlatform>,
    scheduler: ActionScheduler,
    limits: RestrictionLimits,
}

impl<'a> ModerationService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        platform: Arc<dyn ChatPlatform>,
        scheduler: ActionScheduler,
        limits: RestrictionLimits,
    ) -> Self {
        Self {
            db,
            platform,
            scheduler,
            limits,
        }
    }

    /// Restricts a subject for `duration`, scheduling automatic removal.
    ///
    /// The duration is validated against the configured bounds before
    /// anything is written. The platform call is best-effort: a failure is
    /// reported in the outcome but never rolls back the durable record.
    pub async fn apply_restriction(
        &self,
        subject_id: u64,
        staff_id: u64,
        duration: Duration,
        reason: Option<String>,
    ) -> Result<RestrictionOutcome, AppError> {
        if duration < self.limits.min || duration > self.limits.max {
            return Err(AppError::InvalidDuration {
                given: duration.num_seconds(),
                min: self.limits.min.num_seconds(),
                max: self.limits.max.num_seconds(),
            });
        }

        let fire_at = Utc::now() + duration;
        let action = self
            .scheduler
            .schedule(
                subject_id,
                staff_id,
                ActionKind::Mute,
                Some(fire_at),
                reason.clone(),
            )
            .await?;

        let applied = match self.platform.add_restriction(subject_id).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("Failed to restrict {}: {}", subject_id, err);
                false
            }
        };

        tracing::info!(
            "{} restricted {} until {} for {}",
            staff_id,
            subject_id,
            fire_at,
            reason.as_deref().unwrap_or("no stated reason")
        );

        Ok(RestrictionOutcome { action, applied })
    }

    /// Lifts a subject's restriction ahead of schedule.
    ///
    /// Cancelling reports how many rows were actually pending, so the
    /// caller can tell "was not restricted" apart from a normal lift
    /// without a separate existence check. The platform removal is
    /// idempotent on an already-unrestricted subject.
    pub async fn lift_restriction(
        &self,
        subject_id: u64,
        staff_id: u64,
        reason: Option<String>,
    ) -> Result<LiftOutcome, AppError> {
        let cancelled = self.scheduler.cancel(subject_id, ActionKind::Mute).await?;

        let removed = match self.platform.remove_restriction(subject_id).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("Failed to unrestrict {}: {}", subject_id, err);
                false
            }
        };

        let repo = ModerationActionRepository::new(self.db);
        repo.log(subject_id, staff_id, ActionKind::Unmute, reason, true, None)
            .await?;

        tracing::info!("{} lifted restriction on {}", staff_id, subject_id);

        Ok(LiftOutcome { cancelled, removed })
    }

    /// Files a ban request for staff review and restricts the subject
    /// indefinitely until the queue is resolved.
    ///
    /// The unique index on the queue is the only deduplication check; a
    /// lost insert means an active request already exists, and nothing
    /// else (durable or platform-side) happens in that case.
    pub async fn request_escalation(
        &self,
        staff_id: u64,
        request: NewBanRequest,
    ) -> Result<entity::ban_request::Model, AppError> {
        let subject_id = request.subject_id;
        let reason = request.reason.clone();

        let repo = BanRequestRepository::new(self.db);
        let request = match repo.create(request).await {
            Ok(request) => request,
            Err(err) => {
                return Err(match err.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => {
                        AppError::DuplicateEscalation(subject_id)
                    }
                    _ => AppError::DbErr(err),
                });
            }
        };

        // No fire time: the restriction holds until the queue is resolved
        // or the request is withdrawn.
        self.scheduler
            .schedule(subject_id, staff_id, ActionKind::Mute, None, Some(reason))
            .await?;

        if let Err(err) = self.platform.add_restriction(subject_id).await {
            tracing::warn!("Failed to restrict {} for escalation: {}", subject_id, err);
        }

        tracing::info!("{} requested ban for {}", staff_id, subject_id);

        Ok(request)
    }

    /// Resolves the whole escalation queue: bans every listed subject
    /// best-effort and clears the queue in one durable operation.
    ///
    /// One subject's failed ban never blocks the rest; the queue rows are
    /// removed regardless and the outcome reports how many bans landed.
    pub async fn resolve_escalations_batch(&self, staff_id: u64) -> Result<BatchOutcome, AppError> {
        let repo = BanRequestRepository::new(self.db);
        let requests = repo.all().await?;

        tracing::info!(
            "{} resolving {} ban requests",
            staff_id,
            requests.len()
        );

        let mut banned = 0;
        let mut ids = Vec::with_capacity(requests.len());
        for request in &requests {
            ids.push(request.id);

            let subject_id = match request.subject_id.parse::<u64>() {
                Ok(id) => id,
                Err(_) => {
                    tracing::error!(
                        "Invalid subject id in ban request {}: {}",
                        request.id,
                        request.subject_id
                    );
                    continue;
                }
            };

            match self.platform.ban(subject_id, Some(&request.reason)).await {
                Ok(()) => banned += 1,
                Err(err) => {
                    tracing::warn!("Ban for {} failed: {}", request.subject_tag, err);
                }
            }

            // The indefinite restriction backing the request is spent
            // whether or not the ban landed.
            if let Err(err) = self.scheduler.cancel(subject_id, ActionKind::Mute).await {
                tracing::warn!(
                    "Failed to cancel scheduled restriction for {}: {}",
                    subject_id,
                    err
                );
            }
        }

        repo.delete_ids(ids).await?;

        Ok(BatchOutcome {
            attempted: requests.len(),
            banned,
        })
    }

    /// The platform reported the subject banned independently; an open
    /// request for them is moot.
    ///
    /// Delete-then-branch: the row count from the delete decides whether
    /// there is a scheduled restriction to cancel, with no existence
    /// pre-check. The ban is not re-applied.
    pub async fn handle_member_banned(&self, subject_id: u64) -> Result<(), AppError> {
        let repo = BanRequestRepository::new(self.db);
        if repo.delete_by_subject(subject_id).await? > 0 {
            self.scheduler.cancel(subject_id, ActionKind::Mute).await?;
            tracing::info!("Cleared ban request for {} after external ban", subject_id);
        }

        Ok(())
    }

    /// Re-applies the restriction to a rejoining subject still under a
    /// pending restriction or an open escalation, so leaving and
    /// rejoining does not shed it.
    ///
    /// Returns whether a restriction was due.
    pub async fn handle_member_join(&self, subject_id: u64) -> Result<bool, AppError> {
        let actions = ModerationActionRepository::new(self.db);
        let requests = BanRequestRepository::new(self.db);

        let restricted = actions
            .has_active_restriction(subject_id, Utc::now())
            .await?
            || requests.exists(subject_id).await?;

        if restricted {
            match self.platform.add_restriction(subject_id).await {
                Ok(()) => {
                    tracing::info!("Re-applied restriction to rejoining {}", subject_id);
                }
                Err(err) => {
                    tracing::warn!("Failed to re-restrict rejoining {}: {}", subject_id, err);
                }
            }
        }

        Ok(restricted)
    }

    /// Full audit history for a subject, newest first, for display through
    /// the paginator.
    pub async fn restriction_history(
        &self,
        subject_id: u64,
    ) -> Result<Vec<entity::moderation_action::Model>, AppError> {
        let repo = ModerationActionRepository::new(self.db);
        Ok(repo.history(subject_id).await?)
    }

    /// Starts a paginated review of the open ban-request queue bound to
    /// the requesting staff member, with a terminal control that resolves
    /// the whole queue.
    ///
    /// Returns `None` after posting a plain notice when the queue is
    /// empty.
    pub async fn review_escalations(
        &self,
        router: &InteractionRouter,
        channel: ChannelRef,
        staff_id: u64,
    ) -> Result<Option<PaginatorHandle>, AppError> {
        let requests = BanRequestRepository::new(self.db).all().await?;

        if requests.is_empty() {
            self.platform
                .send_message(channel, &RenderedPage::new("No ban requests found"), &[])
                .await?;
            return Ok(None);
        }

        let handler = ResolveQueueControl {
            db: self.db.clone(),
            platform: self.platform.clone(),
            scheduler: self.scheduler.clone(),
            limits: self.limits,
            staff_id,
        };

        let handle = PaginatorBuilder::new(requests, Arc::new(BanRequestPages))
            .per_page(5)
            .timeout(REVIEW_TIMEOUT)
            .bound_to(staff_id)
            .control(
                Component::button(CONTROL_RESOLVE_ALL, "BAN ALL", ButtonStyle::Danger),
                Box::new(handler),
            )
            .start(self.platform.clone(), router, channel)
            .await?;

        Ok(Some(handle))
    }
}

/// Formatter for the ban-request review pages.
struct BanRequestPages;

#[async_trait]
impl PageFormatter<entity::ban_request::Model> for BanRequestPages {
    async fn format_page(
        &self,
        items: &[entity::ban_request::Model],
        page: PageContext,
    ) -> RenderedPage {
        let mut body = String::new();
        for request in items {
            body.push_str(&format!(
                "**{}** - requested by {}\n{}\n",
                request.subject_tag, request.staff_tag, request.reason
            ));
            if let Some(link) = &request.evidence_link {
                body.push_str(link);
                body.push('\n');
            }
        }
        if body.is_empty() {
            body.push_str("No ban requests");
        }

        RenderedPage::titled("Ban Requests", body)
            .with_footer(format!("Page {}/{}", page.page, page.page_count))
    }
}

/// Terminal control on the review view: resolves the whole queue and
/// replaces the view with the outcome summary.
struct ResolveQueueControl {
    db: DatabaseConnection,
    platform: Arc<dyn ChatPlatform>,
    scheduler: ActionScheduler,
    limits: RestrictionLimits,
    staff_id: u64,
}

#[async_trait]
impl ControlHandler for ResolveQueueControl {
    async fn activate(&mut self, _actor_id: u64) -> Result<ControlOutcome, AppError> {
        let service = ModerationService::new(
            &self.db,
            self.platform.clone(),
            self.scheduler.clone(),
            self.limits,
        );
        let outcome = service.resolve_escalations_batch(self.staff_id).await?;

        Ok(ControlOutcome {
            replace: Some(RenderedPage::titled(
                "Ban Requests",
                format!("Banned {} of {} members", outcome.banned, outcome.attempted),
            )),
            terminal: true,
        })
    }
}
