use super::*;

/// Tests that a pending timed restriction with a future fire time counts
/// as active.
///
/// Expected: true
#[tokio::test]
async fn future_timed_restriction_is_active() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::create_pending_mute(db, 1, now + Duration::minutes(30)).await?;

    let repo = ModerationActionRepository::new(db);
    assert!(repo.has_active_restriction(1, now).await?);

    Ok(())
}

/// Tests that an indefinite restriction counts as active.
///
/// Expected: true
#[tokio::test]
async fn indefinite_restriction_is_active() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_indefinite_mute(db, 1).await?;

    let repo = ModerationActionRepository::new(db);
    assert!(repo.has_active_restriction(1, Utc::now()).await?);

    Ok(())
}

/// Tests that an elapsed or completed restriction does not count.
///
/// Expected: false for both
#[tokio::test]
async fn elapsed_and_completed_restrictions_are_not_active() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::create_pending_mute(db, 1, now - Duration::minutes(5)).await?;
    factory::moderation_action::ModerationActionFactory::new(db)
        .subject_id("2")
        .completed(true)
        .fire_at(Some(now + Duration::minutes(30)))
        .build()
        .await?;

    let repo = ModerationActionRepository::new(db);
    assert!(!repo.has_active_restriction(1, now).await?);
    assert!(!repo.has_active_restriction(2, now).await?);

    Ok(())
}

/// Tests that audit entries of other kinds never count as restrictions.
///
/// Expected: false for a pending non-mute row
#[tokio::test]
async fn other_kinds_are_not_restrictions() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::moderation_action::ModerationActionFactory::new(db)
        .subject_id("1")
        .kind(ActionKind::Escalation)
        .build()
        .await?;

    let repo = ModerationActionRepository::new(db);
    assert!(!repo.has_active_restriction(1, Utc::now()).await?);

    Ok(())
}
