use chrono::{Duration, Utc};
use entity::moderation_action::ActionKind;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use std::sync::Arc;
use test_utils::{builder::TestBuilder, context::TestContext, factory};

use crate::data::ban_request::NewBanRequest;
use crate::platform::fake::FakePlatform;
use crate::scheduler::ActionScheduler;
use crate::service::moderation::{ModerationService, RestrictionLimits};

mod apply;
mod lift;
mod membership;
mod resolve_batch;
mod review;

const STAFF: u64 = 7;

struct Harness {
    test: TestContext,
    fake: Arc<FakePlatform>,
    scheduler: ActionScheduler,
    limits: RestrictionLimits,
}

impl Harness {
    async fn new() -> Self {
        let test = TestBuilder::new()
            .with_moderation_tables()
            .build()
            .await
            .unwrap();

        let fake = Arc::new(FakePlatform::new());
        let scheduler = ActionScheduler::new(test.db.clone().unwrap(), fake.clone());
        let limits = RestrictionLimits::new(600, 7 * 24 * 60 * 60);

        Self {
            test,
            fake,
            scheduler,
            limits,
        }
    }

    fn db(&self) -> &DatabaseConnection {
        self.test.db.as_ref().unwrap()
    }

    fn service(&self) -> ModerationService<'_> {
        ModerationService::new(
            self.db(),
            self.fake.clone(),
            self.scheduler.clone(),
            self.limits,
        )
    }
}

fn new_request(subject_id: u64) -> NewBanRequest {
    NewBanRequest {
        subject_id,
        subject_tag: format!("User {}", subject_id),
        staff_tag: "Staff 7".to_string(),
        reason: "repeated spam".to_string(),
        evidence_link: None,
    }
}

async fn action_count(db: &DatabaseConnection) -> u64 {
    entity::prelude::ModerationAction::find()
        .count(db)
        .await
        .unwrap()
}

async fn request_count(db: &DatabaseConnection) -> u64 {
    entity::prelude::BanRequest::find().count(db).await.unwrap()
}
