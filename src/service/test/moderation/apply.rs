use super::*;
use crate::error::AppError;

/// Tests that durations outside the configured bounds are rejected before
/// anything is written.
///
/// Expected: InvalidDuration, no rows, no platform calls
#[tokio::test]
async fn out_of_bounds_duration_is_rejected() {
    let harness = Harness::new().await;
    let service = harness.service();

    for duration in [Duration::seconds(59), Duration::days(30)] {
        let result = service
            .apply_restriction(42, STAFF, duration, None)
            .await;
        assert!(matches!(result, Err(AppError::InvalidDuration { .. })));
    }

    assert_eq!(action_count(harness.db()).await, 0);
    assert_eq!(harness.fake.restriction_count(42), 0);
}

/// Tests the normal restriction path.
///
/// Expected: pending row with the fire time, platform restricted, timer
/// armed for a near-term expiry
#[tokio::test]
async fn restriction_is_recorded_and_applied() {
    let harness = Harness::new().await;
    let service = harness.service();

    let outcome = service
        .apply_restriction(42, STAFF, Duration::seconds(600), Some("spam".to_string()))
        .await
        .unwrap();

    assert!(outcome.applied);
    assert!(!outcome.action.completed);
    assert!(outcome.action.fire_at.is_some());
    assert_eq!(outcome.action.kind, ActionKind::Mute);
    assert_eq!(harness.fake.restriction_count(42), 1);
    assert!(harness.scheduler.is_armed(42, ActionKind::Mute));
}

/// Tests that a platform failure does not roll back the durable record.
///
/// Expected: outcome reports not applied, the pending row still stands
#[tokio::test]
async fn platform_failure_keeps_the_durable_record() {
    let harness = Harness::new().await;
    harness.fake.fail_restrictions(true);
    let service = harness.service();

    let outcome = service
        .apply_restriction(42, STAFF, Duration::seconds(600), None)
        .await
        .unwrap();

    assert!(!outcome.applied);
    assert_eq!(action_count(harness.db()).await, 1);
    assert!(harness.scheduler.is_armed(42, ActionKind::Mute));
}
