use super::*;
use test_utils::factory::chat_message::ChatMessageFactory;

/// Tests that listing returns the ride's messages newest first.
///
/// Expected: messages in descending id order, other rides excluded
#[tokio::test]
async fn lists_newest_first_per_ride() {
    let test = TestBuilder::new().with_chat_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ride = factory::ride::create_ride(db).await.unwrap();
    let other = factory::ride::create_ride(db).await.unwrap();

    let first = factory::chat_message::create_message(db, ride.id, ride.client_id)
        .await
        .unwrap();
    let second = factory::chat_message::create_message(db, ride.id, ride.client_id)
        .await
        .unwrap();
    factory::chat_message::create_message(db, other.id, other.client_id)
        .await
        .unwrap();

    let messages = ChatMessageRepository::new(db)
        .list_for_ride(ride.id, 50, None, false)
        .await
        .unwrap();

    let ids: Vec<_> = messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

/// Tests keyset pagination with `before_id`.
///
/// Expected: only messages older than the cursor
#[tokio::test]
async fn filters_with_before_id() {
    let test = TestBuilder::new().with_chat_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ride = factory::ride::create_ride(db).await.unwrap();
    let first = factory::chat_message::create_message(db, ride.id, ride.client_id)
        .await
        .unwrap();
    let second = factory::chat_message::create_message(db, ride.id, ride.client_id)
        .await
        .unwrap();

    let messages = ChatMessageRepository::new(db)
        .list_for_ride(ride.id, 50, Some(second.id), false)
        .await
        .unwrap();

    let ids: Vec<_> = messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![first.id]);
}

/// Tests that soft-deleted messages are hidden unless asked for.
///
/// Expected: excluded by default, present with include_deleted
#[tokio::test]
async fn hides_deleted_messages_by_default() {
    let test = TestBuilder::new().with_chat_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ride = factory::ride::create_ride(db).await.unwrap();
    let kept = factory::chat_message::create_message(db, ride.id, ride.client_id)
        .await
        .unwrap();
    let deleted = ChatMessageFactory::new(db, ride.id, ride.client_id)
        .text("regretted")
        .build()
        .await
        .unwrap();

    let repo = ChatMessageRepository::new(db);
    assert!(repo.soft_delete(deleted.id, ride.client_id).await.unwrap());

    let visible = repo.list_for_ride(ride.id, 50, None, false).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, kept.id);

    let all = repo.list_for_ride(ride.id, 50, None, true).await.unwrap();
    assert_eq!(all.len(), 2);
}

/// Tests the page-size bound.
///
/// Expected: at most `limit` messages, the newest ones
#[tokio::test]
async fn respects_the_limit() {
    let test = TestBuilder::new().with_chat_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ride = factory::ride::create_ride(db).await.unwrap();
    for _ in 0..3 {
        factory::chat_message::create_message(db, ride.id, ride.client_id)
            .await
            .unwrap();
    }

    let messages = ChatMessageRepository::new(db)
        .list_for_ride(ride.id, 2, None, false)
        .await
        .unwrap();

    assert_eq!(messages.len(), 2);
}
