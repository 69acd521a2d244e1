use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use entity::moderation_action::ActionKind;

/// Repository over the combined audit log / scheduled-action table.
pub struct ModerationActionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ModerationActionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an action row.
    ///
    /// `completed = false` makes the row a pending scheduled action;
    /// audit-only entries are inserted already completed. A null `fire_at`
    /// on a pending row is an indefinite restriction.
    pub async fn log(
        &self,
        subject_id: u64,
        staff_id: u64,
        kind: ActionKind,
        reason: Option<String>,
        completed: bool,
        fire_at: Option<DateTime<Utc>>,
    ) -> Result<entity::moderation_action::Model, DbErr> {
        entity::moderation_action::ActiveModel {
            subject_id: ActiveValue::Set(subject_id.to_string()),
            staff_id: ActiveValue::Set(staff_id.to_string()),
            kind: ActiveValue::Set(kind),
            reason: ActiveValue::Set(reason),
            completed: ActiveValue::Set(completed),
            fire_at: ActiveValue::Set(fire_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Pending timed actions due at or before `horizon`, oldest first.
    ///
    /// Indefinite rows (null `fire_at`) never show up here; they are only
    /// removed by explicit cancellation.
    pub async fn due_before(
        &self,
        horizon: DateTime<Utc>,
    ) -> Result<Vec<entity::moderation_action::Model>, DbErr> {
        entity::prelude::ModerationAction::find()
            .filter(entity::moderation_action::Column::Completed.eq(false))
            .filter(entity::moderation_action::Column::FireAt.is_not_null())
            .filter(entity::moderation_action::Column::FireAt.lte(horizon))
            .order_by_asc(entity::moderation_action::Column::FireAt)
            .all(self.db)
            .await
    }

    /// Claims one pending row for completion.
    ///
    /// Returns whether this caller won the claim; zero rows affected means
    /// another path (cancellation, a duplicate fire, another replica)
    /// already owns the row.
    pub async fn claim(&self, action_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::ModerationAction::update_many()
            .col_expr(
                entity::moderation_action::Column::Completed,
                Expr::value(true),
            )
            .filter(entity::moderation_action::Column::Id.eq(action_id))
            .filter(entity::moderation_action::Column::Completed.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Reopens a claimed row after its effect failed so the next
    /// reconciliation pass retries it.
    pub async fn reopen(&self, action_id: i32) -> Result<(), DbErr> {
        entity::prelude::ModerationAction::update_many()
            .col_expr(
                entity::moderation_action::Column::Completed,
                Expr::value(false),
            )
            .filter(entity::moderation_action::Column::Id.eq(action_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Closes every pending row for the subject and kind.
    ///
    /// Returns the number of rows closed, so callers can branch on whether
    /// anything was actually pending without a prior existence check.
    pub async fn close_pending(&self, subject_id: u64, kind: ActionKind) -> Result<u64, DbErr> {
        let result = entity::prelude::ModerationAction::update_many()
            .col_expr(
                entity::moderation_action::Column::Completed,
                Expr::value(true),
            )
            .filter(entity::moderation_action::Column::SubjectId.eq(subject_id.to_string()))
            .filter(entity::moderation_action::Column::Kind.eq(kind))
            .filter(entity::moderation_action::Column::Completed.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Whether the subject has a pending restriction still in force:
    /// indefinite, or timed with a fire time ahead of `now`.
    pub async fn has_active_restriction(
        &self,
        subject_id: u64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::ModerationAction::find()
            .filter(entity::moderation_action::Column::SubjectId.eq(subject_id.to_string()))
            .filter(entity::moderation_action::Column::Kind.eq(ActionKind::Mute))
            .filter(entity::moderation_action::Column::Completed.eq(false))
            .filter(
                Condition::any()
                    .add(entity::moderation_action::Column::FireAt.is_null())
                    .add(entity::moderation_action::Column::FireAt.gt(now)),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Full audit history for a subject, newest first.
    pub async fn history(
        &self,
        subject_id: u64,
    ) -> Result<Vec<entity::moderation_action::Model>, DbErr> {
        entity::prelude::ModerationAction::find()
            .filter(entity::moderation_action::Column::SubjectId.eq(subject_id.to_string()))
            .order_by_desc(entity::moderation_action::Column::CreatedAt)
            .all(self.db)
            .await
    }
}
