use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

/// Parameters for a new ban request.
pub struct NewBanRequest {
    pub subject_id: u64,
    pub subject_tag: String,
    pub staff_tag: String,
    pub reason: String,
    pub evidence_link: Option<String>,
}

/// Repository over the pending ban-request queue.
pub struct BanRequestRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BanRequestRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a ban request.
    ///
    /// The unique index on `subject_id` rejects a second active request
    /// for the same subject; callers inspect the error's `sql_err()` to
    /// distinguish that conflict from other failures. No pre-check here:
    /// the constraint is the arbiter.
    pub async fn create(
        &self,
        request: NewBanRequest,
    ) -> Result<entity::ban_request::Model, DbErr> {
        entity::ban_request::ActiveModel {
            subject_id: ActiveValue::Set(request.subject_id.to_string()),
            subject_tag: ActiveValue::Set(request.subject_tag),
            staff_tag: ActiveValue::Set(request.staff_tag),
            reason: ActiveValue::Set(request.reason),
            evidence_link: ActiveValue::Set(request.evidence_link),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn exists(&self, subject_id: u64) -> Result<bool, DbErr> {
        let count = entity::prelude::BanRequest::find()
            .filter(entity::ban_request::Column::SubjectId.eq(subject_id.to_string()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// All open requests, oldest first.
    pub async fn all(&self) -> Result<Vec<entity::ban_request::Model>, DbErr> {
        entity::prelude::BanRequest::find()
            .order_by_asc(entity::ban_request::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Deletes the request for one subject. Returns the number of rows
    /// removed; zero means no request was open.
    pub async fn delete_by_subject(&self, subject_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::BanRequest::delete_many()
            .filter(entity::ban_request::Column::SubjectId.eq(subject_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes a batch of processed requests in one statement.
    pub async fn delete_ids(&self, ids: Vec<i32>) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::BanRequest::delete_many()
            .filter(entity::ban_request::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
