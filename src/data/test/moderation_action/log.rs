use super::*;
use sea_orm::EntityTrait;

/// Tests inserting a pending timed action.
///
/// Expected: Ok with the row pending and carrying the fire time
#[tokio::test]
async fn inserts_pending_timed_action() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let fire_at = Utc::now() + Duration::minutes(30);

    let repo = ModerationActionRepository::new(db);
    let action = repo
        .log(
            42,
            7,
            ActionKind::Mute,
            Some("spamming".to_string()),
            false,
            Some(fire_at),
        )
        .await?;

    assert_eq!(action.subject_id, "42");
    assert_eq!(action.staff_id, "7");
    assert_eq!(action.kind, ActionKind::Mute);
    assert!(!action.completed);
    // Compare timestamps allowing for storage precision differences
    let diff = (action.fire_at.unwrap() - fire_at).num_seconds().abs();
    assert!(diff < 2);

    let stored = entity::prelude::ModerationAction::find_by_id(action.id)
        .one(db)
        .await?;
    assert!(stored.is_some());

    Ok(())
}

/// Tests inserting an audit-only entry.
///
/// Expected: Ok with the row already completed and no fire time
#[tokio::test]
async fn inserts_completed_audit_entry() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ModerationActionRepository::new(db);
    let action = repo
        .log(42, 7, ActionKind::Unmute, None, true, None)
        .await?;

    assert!(action.completed);
    assert!(action.fire_at.is_none());
    assert!(action.reason.is_none());

    Ok(())
}

/// Tests that history returns a subject's entries newest first.
///
/// Expected: only the subject's rows, in reverse insertion order
#[tokio::test]
async fn history_is_scoped_and_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ModerationActionRepository::new(db);
    let first = repo.log(42, 7, ActionKind::Mute, None, true, None).await?;
    let second = repo.log(42, 7, ActionKind::Unmute, None, true, None).await?;
    repo.log(99, 7, ActionKind::Mute, None, true, None).await?;

    let history = repo.history(42).await?;

    assert_eq!(history.len(), 2);
    let ids: Vec<i32> = history.iter().map(|entry| entry.id).collect();
    assert!(ids.contains(&first.id));
    assert!(ids.contains(&second.id));
    assert!(history[0].created_at >= history[1].created_at);

    Ok(())
}
