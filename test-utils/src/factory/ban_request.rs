//! Ban request factory for creating test queue entries.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for creating ban request rows with customizable fields.
pub struct BanRequestFactory<'a> {
    db: &'a DatabaseConnection,
    subject_id: String,
    subject_tag: String,
    staff_tag: String,
    reason: String,
    evidence_link: Option<String>,
}

impl<'a> BanRequestFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - subject_id: auto-incremented unique id
    /// - subject_tag: `"User {id}"`
    /// - staff_tag: `"Staff {id}"`
    /// - reason: `"Not provided"`
    /// - evidence_link: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            subject_id: id.to_string(),
            subject_tag: format!("User {}", id),
            staff_tag: format!("Staff {}", id),
            reason: "Not provided".to_string(),
            evidence_link: None,
        }
    }

    pub fn subject_id(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = subject_id.into();
        self
    }

    pub fn subject_tag(mut self, subject_tag: impl Into<String>) -> Self {
        self.subject_tag = subject_tag.into();
        self
    }

    pub fn staff_tag(mut self, staff_tag: impl Into<String>) -> Self {
        self.staff_tag = staff_tag.into();
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn evidence_link(mut self, evidence_link: Option<String>) -> Self {
        self.evidence_link = evidence_link;
        self
    }

    /// Builds and inserts the ban request row.
    ///
    /// # Returns
    /// - `Ok(entity::ban_request::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::ban_request::Model, DbErr> {
        entity::ban_request::ActiveModel {
            subject_id: ActiveValue::Set(self.subject_id),
            subject_tag: ActiveValue::Set(self.subject_tag),
            staff_tag: ActiveValue::Set(self.staff_tag),
            reason: ActiveValue::Set(self.reason),
            evidence_link: ActiveValue::Set(self.evidence_link),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a ban request for a specific subject with default values.
pub async fn create_ban_request(
    db: &DatabaseConnection,
    subject_id: u64,
) -> Result<entity::ban_request::Model, DbErr> {
    BanRequestFactory::new(db)
        .subject_id(subject_id.to_string())
        .build()
        .await
}
