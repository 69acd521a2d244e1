use super::*;
use sea_orm::EntityTrait;

/// Tests that claiming a pending row succeeds exactly once.
///
/// Expected: first claim true, second claim false, row completed
#[tokio::test]
async fn claim_wins_only_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let action = factory::create_pending_mute(db, 1, Utc::now()).await?;

    let repo = ModerationActionRepository::new(db);
    assert!(repo.claim(action.id).await?);
    assert!(!repo.claim(action.id).await?);

    let stored = entity::prelude::ModerationAction::find_by_id(action.id)
        .one(db)
        .await?
        .unwrap();
    assert!(stored.completed);

    Ok(())
}

/// Tests that claiming a missing row is a quiet no-op.
///
/// Expected: false, no error
#[tokio::test]
async fn claim_on_missing_row_returns_false() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ModerationActionRepository::new(db);
    assert!(!repo.claim(12345).await?);

    Ok(())
}

/// Tests that reopening a claimed row makes it claimable again.
///
/// Expected: claim succeeds after reopen
#[tokio::test]
async fn reopen_makes_the_row_claimable_again() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let action = factory::create_pending_mute(db, 1, Utc::now()).await?;

    let repo = ModerationActionRepository::new(db);
    assert!(repo.claim(action.id).await?);

    repo.reopen(action.id).await?;
    assert!(repo.claim(action.id).await?);

    Ok(())
}
