//! Integration tests for the notification inbox.

mod helpers;

use uuid::Uuid;

use threadline_core::error::ErrorKind;

#[tokio::test]
async fn test_list_newest_first() {
    let ctx = helpers::TestContext::new().await;
    let (u1, u2) = (Uuid::new_v4(), Uuid::new_v4());

    let first = ctx.send(u1, u2, "first", None).await;
    let second = ctx.send(u1, u2, "second", None).await;

    let notifications = ctx.notifications.list_for_user(u2).await.unwrap();
    let message_ids: Vec<Uuid> = notifications.iter().map(|n| n.message_id).collect();
    assert_eq!(message_ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn test_mark_read_updates_unread_count() {
    let ctx = helpers::TestContext::new().await;
    let (u1, u2) = (Uuid::new_v4(), Uuid::new_v4());

    ctx.send(u1, u2, "one", None).await;
    ctx.send(u1, u2, "two", None).await;
    assert_eq!(ctx.notifications.unread_count(u2).await.unwrap(), 2);
    assert_eq!(ctx.notifications.unread_count(u1).await.unwrap(), 0);

    let notifications = ctx.notifications.list_for_user(u2).await.unwrap();
    ctx.notifications.mark_read(notifications[0].id).await.unwrap();
    assert_eq!(ctx.notifications.unread_count(u2).await.unwrap(), 1);

    let stored = ctx
        .notif_repo
        .find_by_id(notifications[0].id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.is_read);
}

#[tokio::test]
async fn test_mark_read_missing_notification() {
    let ctx = helpers::TestContext::new().await;

    let err = ctx.notifications.mark_read(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_notification_does_not_mark_message_read() {
    let ctx = helpers::TestContext::new().await;
    let (u1, u2) = (Uuid::new_v4(), Uuid::new_v4());
    let message = ctx.send(u1, u2, "ping", None).await;

    let notifications = ctx.notifications.list_for_user(u2).await.unwrap();
    ctx.notifications.mark_read(notifications[0].id).await.unwrap();

    let unread = ctx.messages.unread_for(u2).await.unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].id, message.id);
}
