use super::*;

/// Tests that closing reports how many rows were actually pending.
///
/// Expected: 2 rows closed, second call reports 0
#[tokio::test]
async fn reports_closed_row_count_and_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::create_pending_mute(db, 1, now + Duration::minutes(30)).await?;
    factory::create_indefinite_mute(db, 1).await?;

    let repo = ModerationActionRepository::new(db);
    assert_eq!(repo.close_pending(1, ActionKind::Mute).await?, 2);
    assert_eq!(repo.close_pending(1, ActionKind::Mute).await?, 0);

    Ok(())
}

/// Tests that closing is scoped to the subject and kind.
///
/// Expected: other subjects' rows stay pending
#[tokio::test]
async fn leaves_other_subjects_untouched() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::create_pending_mute(db, 1, now + Duration::minutes(30)).await?;
    factory::create_pending_mute(db, 2, now + Duration::minutes(30)).await?;

    let repo = ModerationActionRepository::new(db);
    assert_eq!(repo.close_pending(1, ActionKind::Mute).await?, 1);
    assert!(repo.has_active_restriction(2, now).await?);

    Ok(())
}
