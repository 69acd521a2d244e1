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
                    .table(ModerationAction::Table)
                    .if_not_exists()
                    .col(pk_auto(ModerationAction::Id))
                    .col(string(ModerationAction::SubjectId))
                    .col(string(ModerationAction::StaffId))
                    .col(string_len(ModerationAction::Kind, 16))
                    .col(string_null(ModerationAction::Reason))
                    .col(boolean(ModerationAction::Completed).default(false))
                    .col(timestamp_null(ModerationAction::FireAt))
                    .col(
                        timestamp(ModerationAction::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index for per-subject history lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_moderation_action_subject_id")
                    .table(ModerationAction::Table)
                    .col(ModerationAction::SubjectId)
                    .to_owned(),
            )
            .await?;

        // Create index for the reconciliation query over pending timed rows
        manager
            .create_index(
                Index::create()
                    .name("idx_moderation_action_pending")
                    .table(ModerationAction::Table)
                    .col(ModerationAction::Completed)
                    .col(ModerationAction::FireAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes first
        manager
            .drop_index(
                Index::drop()
                    .name("idx_moderation_action_pending")
                    .table(ModerationAction::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_moderation_action_subject_id")
                    .table(ModerationAction::Table)
                    .to_owned(),
            )
            .await?;

        // Drop table
        manager
            .drop_table(Table::drop().table(ModerationAction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ModerationAction {
    Table,
    Id,
    SubjectId,
    StaffId,
    Kind,
    Reason,
    Completed,
    FireAt,
    CreatedAt,
}
