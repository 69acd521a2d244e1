use sea_orm::entity::prelude::*;

/// Pending ban request for staff review.
///
/// At most one active request may exist per subject; the unique index on
/// `subject_id` enforces deduplication at the store level.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ban_request")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub subject_id: String,
    pub subject_tag: String,
    pub staff_tag: String,
    pub reason: String,
    pub evidence_link: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
