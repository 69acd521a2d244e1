use chrono::{Duration, Utc};
use entity::moderation_action::ActionKind;
use sea_orm::EntityTrait;
use std::sync::Arc;
use test_utils::{builder::TestBuilder, context::TestContext, factory};

use crate::platform::fake::FakePlatform;
use crate::platform::ChatPlatform;
use crate::scheduler::{ActionKey, ActionScheduler};


async fn setup() -> (TestContext, Arc<FakePlatform>, ActionScheduler) {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();

    let fake = Arc::new(FakePlatform::new());
    let platform: Arc<dyn ChatPlatform> = fake.clone();
    let scheduler = ActionScheduler::new(test.db.clone().unwrap(), platform);

    (test, fake, scheduler)
}

/// Lets spawned timer tasks process everything already due.
async fn drain() {
    for _ in 0..25 {
        tokio::task::yield_now().await;
    }
}

async fn action_row(
    db: &sea_orm::DatabaseConnection,
    action_id: i32,
) -> entity::moderation_action::Model {
    entity::prelude::ModerationAction::find_by_id(action_id)
        .one(db)
        .await
        .unwrap()
        .unwrap()
}
