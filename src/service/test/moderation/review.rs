use super::*;
use crate::interaction::router::InteractionRouter;
use crate::platform::ChannelRef;
use crate::service::moderation::CONTROL_RESOLVE_ALL;

const CHANNEL: ChannelRef = ChannelRef(55);

async fn drain() {
    for _ in 0..25 {
        tokio::task::yield_now().await;
    }
}

/// Tests that an empty queue short-circuits to a plain notice.
///
/// Expected: no session, one message without controls
#[tokio::test]
async fn empty_queue_posts_a_notice() {
    let harness = Harness::new().await;
    let service = harness.service();
    let router = InteractionRouter::new();

    let handle = service
        .review_escalations(&router, CHANNEL, STAFF)
        .await
        .unwrap();

    assert!(handle.is_none());
    let sent = harness.fake.last_sent().unwrap();
    assert!(sent.components.is_empty());
    assert_eq!(sent.content.body, "No ban requests found");
}

/// Tests that the review view carries the queue and the terminal control.
///
/// Expected: paginated message with five navigation controls plus the
/// resolve-all button
#[tokio::test]
async fn review_view_lists_the_queue() {
    let harness = Harness::new().await;
    let service = harness.service();
    let router = InteractionRouter::new();

    for subject in [1, 2, 3] {
        service
            .request_escalation(STAFF, new_request(subject))
            .await
            .unwrap();
    }

    let handle = service
        .review_escalations(&router, CHANNEL, STAFF)
        .await
        .unwrap()
        .unwrap();

    let sent = harness.fake.last_sent().unwrap();
    assert_eq!(sent.message, handle.message);
    assert_eq!(sent.components.len(), 6);
    assert_eq!(sent.components[5].id(), CONTROL_RESOLVE_ALL);
    assert!(sent.content.body.contains("User 1"));
    assert!(router.is_bound(handle.message.message_id));
}

/// Tests the full resolution flow through the terminal control.
///
/// Expected: every subject banned, queue cleared, view replaced by the
/// outcome summary with controls stripped
#[tokio::test]
async fn resolve_all_control_resolves_the_queue() {
    let harness = Harness::new().await;
    let service = harness.service();
    let router = InteractionRouter::new();

    for subject in [1, 2, 3] {
        service
            .request_escalation(STAFF, new_request(subject))
            .await
            .unwrap();
    }

    let handle = service
        .review_escalations(&router, CHANNEL, STAFF)
        .await
        .unwrap()
        .unwrap();

    router
        .dispatch(
            handle.message.message_id,
            STAFF,
            CONTROL_RESOLVE_ALL.to_string(),
        )
        .await;
    drain().await;

    assert_eq!(harness.fake.banned.lock().unwrap().len(), 3);
    assert_eq!(request_count(harness.db()).await, 0);

    let edit = harness.fake.last_edit().unwrap();
    assert_eq!(edit.content.body, "Banned 3 of 3 members");
    assert!(edit.components.is_empty());
    assert!(!router.is_bound(handle.message.message_id));
}

/// Tests that only the requesting staff member can drive the review.
///
/// Expected: a stranger's press changes nothing
#[tokio::test]
async fn review_is_bound_to_the_requesting_staff() {
    let harness = Harness::new().await;
    let service = harness.service();
    let router = InteractionRouter::new();

    service
        .request_escalation(STAFF, new_request(1))
        .await
        .unwrap();

    let handle = service
        .review_escalations(&router, CHANNEL, STAFF)
        .await
        .unwrap()
        .unwrap();

    router
        .dispatch(
            handle.message.message_id,
            999,
            CONTROL_RESOLVE_ALL.to_string(),
        )
        .await;
    drain().await;

    assert!(harness.fake.banned.lock().unwrap().is_empty());
    assert_eq!(request_count(harness.db()).await, 1);
    assert!(router.is_bound(handle.message.message_id));
}
