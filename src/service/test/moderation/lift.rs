use super::*;

/// Tests lifting an active restriction ahead of schedule.
///
/// Expected: pending row closed, platform removal called, audit entry
/// written
#[tokio::test]
async fn lifts_an_active_restriction() {
    let harness = Harness::new().await;
    let service = harness.service();

    service
        .apply_restriction(42, STAFF, Duration::seconds(600), None)
        .await
        .unwrap();

    let outcome = service
        .lift_restriction(42, STAFF, Some("appealed".to_string()))
        .await
        .unwrap();

    assert_eq!(outcome.cancelled, 1);
    assert!(outcome.removed);
    assert_eq!(harness.fake.removal_count(42), 1);
    assert!(!harness.scheduler.is_armed(42, ActionKind::Mute));

    let history = service.restriction_history(42).await.unwrap();
    assert!(history
        .iter()
        .any(|entry| entry.kind == ActionKind::Unmute && entry.completed));
}

/// Tests lifting a subject who was never restricted.
///
/// Expected: zero rows cancelled, removal still attempted idempotently,
/// no error
#[tokio::test]
async fn lifting_an_unrestricted_subject_reports_zero_rows() {
    let harness = Harness::new().await;
    let service = harness.service();

    let outcome = service.lift_restriction(42, STAFF, None).await.unwrap();

    assert_eq!(outcome.cancelled, 0);
    assert!(outcome.removed);
}

/// Tests that a failed platform removal is reported without losing the
/// cancellation.
///
/// Expected: rows cancelled, removed false
#[tokio::test]
async fn failed_removal_is_reported() {
    let harness = Harness::new().await;
    let service = harness.service();

    service
        .apply_restriction(42, STAFF, Duration::seconds(600), None)
        .await
        .unwrap();

    harness.fake.fail_removals(true);
    let outcome = service.lift_restriction(42, STAFF, None).await.unwrap();

    assert_eq!(outcome.cancelled, 1);
    assert!(!outcome.removed);
}
