use super::*;

/// Tests that one failed ban neither blocks the rest nor keeps its row.
///
/// Expected: 3 attempted, 2 banned, queue empty, all backing
/// restrictions closed
#[tokio::test]
async fn partial_failure_still_clears_the_queue() {
    let harness = Harness::new().await;
    let service = harness.service();

    for subject in [1, 2, 3] {
        service
            .request_escalation(STAFF, new_request(subject))
            .await
            .unwrap();
    }

    harness.fake.fail_ban_for(2);

    let outcome = service.resolve_escalations_batch(STAFF).await.unwrap();

    assert_eq!(outcome.attempted, 3);
    assert_eq!(outcome.banned, 2);
    assert_eq!(request_count(harness.db()).await, 0);

    let banned = harness.fake.banned.lock().unwrap().clone();
    assert!(banned.contains(&1));
    assert!(!banned.contains(&2));
    assert!(banned.contains(&3));

    // No restriction is left pending for any processed subject.
    let repo = crate::data::ModerationActionRepository::new(harness.db());
    for subject in [1, 2, 3] {
        assert!(!repo
            .has_active_restriction(subject, Utc::now())
            .await
            .unwrap());
    }
}

/// Tests resolving an empty queue.
///
/// Expected: zero counts, no platform calls
#[tokio::test]
async fn empty_queue_resolves_to_nothing() {
    let harness = Harness::new().await;
    let service = harness.service();

    let outcome = service.resolve_escalations_batch(STAFF).await.unwrap();

    assert_eq!(outcome.attempted, 0);
    assert_eq!(outcome.banned, 0);
    assert!(harness.fake.banned.lock().unwrap().is_empty());
}
