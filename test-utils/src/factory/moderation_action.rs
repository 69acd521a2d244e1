//! Moderation action factory for creating test action rows.

use chrono::{DateTime, Utc};
use entity::moderation_action::ActionKind;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for creating moderation action rows with customizable fields.
///
/// Defaults to a pending mute with no fire time (an indefinite
/// restriction); override fields as needed for the scenario under test.
pub struct ModerationActionFactory<'a> {
    db: &'a DatabaseConnection,
    subject_id: String,
    staff_id: String,
    kind: ActionKind,
    reason: Option<String>,
    completed: bool,
    fire_at: Option<DateTime<Utc>>,
}

impl<'a> ModerationActionFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - subject_id / staff_id: auto-incremented unique ids
    /// - kind: `ActionKind::Mute`
    /// - reason: `None`
    /// - completed: `false`
    /// - fire_at: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            subject_id: next_id().to_string(),
            staff_id: next_id().to_string(),
            kind: ActionKind::Mute,
            reason: None,
            completed: false,
            fire_at: None,
        }
    }

    pub fn subject_id(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = subject_id.into();
        self
    }

    pub fn staff_id(mut self, staff_id: impl Into<String>) -> Self {
        self.staff_id = staff_id.into();
        self
    }

    pub fn kind(mut self, kind: ActionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn fire_at(mut self, fire_at: Option<DateTime<Utc>>) -> Self {
        self.fire_at = fire_at;
        self
    }

    /// Builds and inserts the action row.
    ///
    /// # Returns
    /// - `Ok(entity::moderation_action::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::moderation_action::Model, DbErr> {
        entity::moderation_action::ActiveModel {
            subject_id: ActiveValue::Set(self.subject_id),
            staff_id: ActiveValue::Set(self.staff_id),
            kind: ActiveValue::Set(self.kind),
            reason: ActiveValue::Set(self.reason),
            completed: ActiveValue::Set(self.completed),
            fire_at: ActiveValue::Set(self.fire_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending timed mute for `subject_id` firing at `fire_at`.
pub async fn create_pending_mute(
    db: &DatabaseConnection,
    subject_id: u64,
    fire_at: DateTime<Utc>,
) -> Result<entity::moderation_action::Model, DbErr> {
    ModerationActionFactory::new(db)
        .subject_id(subject_id.to_string())
        .fire_at(Some(fire_at))
        .build()
        .await
}

/// Creates a pending indefinite mute for `subject_id`.
pub async fn create_indefinite_mute(
    db: &DatabaseConnection,
    subject_id: u64,
) -> Result<entity::moderation_action::Model, DbErr> {
    ModerationActionFactory::new(db)
        .subject_id(subject_id.to_string())
        .build()
        .await
}
