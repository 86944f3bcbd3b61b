//! Integration tests for cascading actor removal.

mod helpers;

use uuid::Uuid;

use threadline_core::error::ErrorKind;

#[tokio::test]
async fn test_remove_actor_sent_and_received() {
    let ctx = helpers::TestContext::new().await;
    let (u, other) = (Uuid::new_v4(), Uuid::new_v4());

    let m1 = ctx.send(u, other, "sent", None).await;
    let m2 = ctx.send(other, u, "received", None).await;
    ctx.messages.edit(m1.id, "sent, edited").await.unwrap();
    ctx.messages.edit(m2.id, "received, edited").await.unwrap();

    let report = ctx.messages.remove_actor(u).await.unwrap();
    assert_eq!(report.actor_id, u);
    assert_eq!(report.messages_removed, 2);
    assert_eq!(report.notifications_removed, 2);
    assert_eq!(report.edit_records_removed, 2);
    assert_eq!(report.total(), 6);

    for id in [m1.id, m2.id] {
        let err = ctx.messages.get(id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(ctx.notif_repo.find_by_message(id).await.unwrap().is_empty());
        assert_eq!(ctx.edit_repo.count_by_message(id).await.unwrap(), 0);
    }
    assert_eq!(ctx.message_repo.count_involving(u).await.unwrap(), 0);
}

#[tokio::test]
async fn test_remove_actor_takes_replies_from_others() {
    let ctx = helpers::TestContext::new().await;
    let (u, v, w) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    let root = ctx.send(u, v, "root by u", None).await;
    let reply = ctx.send(v, w, "v to w under u's message", Some(&root)).await;
    let nested = ctx.send(w, v, "w to v, deeper", Some(&reply)).await;
    ctx.messages.edit(nested.id, "w to v, deeper still").await.unwrap();
    let unrelated = ctx.send(v, w, "unrelated", None).await;

    let report = ctx.messages.remove_actor(u).await.unwrap();
    assert_eq!(report.messages_removed, 3);
    assert_eq!(report.notifications_removed, 3);
    assert_eq!(report.edit_records_removed, 1);

    for id in [root.id, reply.id, nested.id] {
        assert!(ctx.messages.get(id).await.unwrap_err().is(ErrorKind::NotFound));
    }
    assert_eq!(ctx.messages.get(unrelated.id).await.unwrap(), unrelated);

    let notifications = ctx.notifications.list_for_user(w).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message_id, unrelated.id);
}

#[tokio::test]
async fn test_remove_actor_keeps_ancestors_written_by_others() {
    let ctx = helpers::TestContext::new().await;
    let (u, v, w) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    let root = ctx.send(v, w, "root by v", None).await;
    let reply = ctx.send(u, v, "reply by u", Some(&root)).await;

    let report = ctx.messages.remove_actor(u).await.unwrap();
    assert_eq!(report.messages_removed, 1);

    assert!(ctx.messages.get(reply.id).await.unwrap_err().is(ErrorKind::NotFound));
    let tree = ctx.messages.thread_of(root.id).await.unwrap();
    assert!(tree.children.is_empty());
}

#[tokio::test]
async fn test_remove_unknown_actor_is_noop() {
    let ctx = helpers::TestContext::new().await;
    ctx.send(Uuid::new_v4(), Uuid::new_v4(), "stays", None).await;

    let report = ctx.messages.remove_actor(Uuid::new_v4()).await.unwrap();
    assert!(report.is_noop());
    assert_eq!(ctx.count("messages").await, 1);
    assert_eq!(ctx.count("notifications").await, 1);
}

#[tokio::test]
async fn test_remove_actor_failure_rolls_back() {
    let ctx = helpers::TestContext::new().await;
    let (u, v) = (Uuid::new_v4(), Uuid::new_v4());
    let message = ctx.send(u, v, "keep me", None).await;
    ctx.messages.edit(message.id, "kept").await.unwrap();

    sqlx::query(
        "CREATE TRIGGER block_message_delete BEFORE DELETE ON messages \
         BEGIN SELECT RAISE(ABORT, 'blocked'); END",
    )
    .execute(ctx.pool())
    .await
    .unwrap();

    let err = ctx.messages.remove_actor(u).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::TransactionFailure);

    assert_eq!(ctx.messages.get(message.id).await.unwrap().content, "kept");
    assert_eq!(ctx.count("notifications").await, 1);
    assert_eq!(ctx.count("message_edits").await, 1);
}
