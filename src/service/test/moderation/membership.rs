use super::*;

/// Tests cleanup when the platform bans an escalated subject on its own.
///
/// Expected: queue row removed, backing restriction closed, no re-ban
#[tokio::test]
async fn external_ban_clears_an_open_escalation() {
    let harness = Harness::new().await;
    let service = harness.service();

    service
        .request_escalation(STAFF, new_request(42))
        .await
        .unwrap();

    service.handle_member_banned(42).await.unwrap();

    assert_eq!(request_count(harness.db()).await, 0);
    let repo = crate::data::ModerationActionRepository::new(harness.db());
    assert!(!repo.has_active_restriction(42, Utc::now()).await.unwrap());
    assert!(harness.fake.banned.lock().unwrap().is_empty());
}

/// Tests that an external ban with no open escalation changes nothing.
///
/// Expected: no rows touched, no error
#[tokio::test]
async fn external_ban_without_escalation_is_a_no_op() {
    let harness = Harness::new().await;
    let service = harness.service();

    factory::create_pending_mute(harness.db(), 42, Utc::now() + Duration::minutes(30))
        .await
        .unwrap();

    service.handle_member_banned(42).await.unwrap();

    // The unrelated timed restriction is left alone.
    let repo = crate::data::ModerationActionRepository::new(harness.db());
    assert!(repo.has_active_restriction(42, Utc::now()).await.unwrap());
}

/// Tests that a rejoining subject under a live restriction is restricted
/// again.
///
/// Expected: true, one platform restriction call
#[tokio::test]
async fn rejoin_under_restriction_is_re_restricted() {
    let harness = Harness::new().await;
    let service = harness.service();

    factory::create_pending_mute(harness.db(), 42, Utc::now() + Duration::minutes(30))
        .await
        .unwrap();

    assert!(service.handle_member_join(42).await.unwrap());
    assert_eq!(harness.fake.restriction_count(42), 1);
}

/// Tests that an open escalation alone is enough to re-restrict.
///
/// Expected: true, one platform restriction call
#[tokio::test]
async fn rejoin_under_escalation_is_re_restricted() {
    let harness = Harness::new().await;
    let service = harness.service();

    factory::create_ban_request(harness.db(), 42).await.unwrap();

    assert!(service.handle_member_join(42).await.unwrap());
    assert_eq!(harness.fake.restriction_count(42), 1);
}

/// Tests that a clean subject rejoins untouched.
///
/// Expected: false, no platform call
#[tokio::test]
async fn clean_rejoin_is_untouched() {
    let harness = Harness::new().await;
    let service = harness.service();

    assert!(!service.handle_member_join(42).await.unwrap());
    assert_eq!(harness.fake.restriction_count(42), 0);
}
