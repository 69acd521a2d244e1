pub use sea_orm_migration::prelude::*;

mod m20260122_000001_create_moderation_action_table;
mod m20260122_000002_create_ban_request_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260122_000001_create_moderation_action_table::Migration),
            Box::new(m20260122_000002_create_ban_request_table::Migration),
        ]
    }
}
