use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create table
        manager
            .create_table(
                Table::create()
                    .table(BanRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(BanRequest::Id))
                    .col(string(BanRequest::SubjectId))
                    .col(string(BanRequest::SubjectTag))
                    .col(string(BanRequest::StaffTag))
                    .col(string(BanRequest::Reason))
                    .col(string_null(BanRequest::EvidenceLink))
                    .col(
                        timestamp(BanRequest::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create unique index for one active request per subject
        manager
            .create_index(
                Index::create()
                    .name("idx_ban_request_subject_id_unique")
                    .table(BanRequest::Table)
                    .col(BanRequest::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop index first
        manager
            .drop_index(
                Index::drop()
                    .name("idx_ban_request_subject_id_unique")
                    .table(BanRequest::Table)
                    .to_owned(),
            )
            .await?;

        // Drop table
        manager
            .drop_table(Table::drop().table(BanRequest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum BanRequest {
    Table,
    Id,
    SubjectId,
    SubjectTag,
    StaffTag,
    Reason,
    EvidenceLink,
    CreatedAt,
}
