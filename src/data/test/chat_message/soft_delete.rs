use super::*;

/// Tests the author soft-deleting their own message.
///
/// Expected: Ok(true) and deleted_at set
#[tokio::test]
async fn author_deletes_their_message() {
    let test = TestBuilder::new().with_chat_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ride = factory::ride::create_ride(db).await.unwrap();
    let message = factory::chat_message::create_message(db, ride.id, ride.client_id)
        .await
        .unwrap();

    let repo = ChatMessageRepository::new(db);
    assert!(repo.soft_delete(message.id, ride.client_id).await.unwrap());

    let stored = repo
        .list_for_ride(ride.id, 50, None, true)
        .await
        .unwrap()
        .pop()
        .unwrap();
    assert!(stored.deleted_at.is_some());
}

/// Tests a non-author attempting the delete.
///
/// Expected: Ok(false), message untouched
#[tokio::test]
async fn non_author_cannot_delete() {
    let test = TestBuilder::new().with_chat_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ride = factory::ride::create_ride(db).await.unwrap();
    let message = factory::chat_message::create_message(db, ride.id, ride.client_id)
        .await
        .unwrap();

    let repo = ChatMessageRepository::new(db);
    assert!(!repo
        .soft_delete(message.id, ride.client_id + 1)
        .await
        .unwrap());

    let stored = repo
        .list_for_ride(ride.id, 50, None, false)
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
}

/// Tests deleting the same message twice.
///
/// The second call finds no live row and reports a no-op.
///
/// Expected: first Ok(true), second Ok(false)
#[tokio::test]
async fn repeat_delete_is_a_noop() {
    let test = TestBuilder::new().with_chat_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ride = factory::ride::create_ride(db).await.unwrap();
    let message = factory::chat_message::create_message(db, ride.id, ride.client_id)
        .await
        .unwrap();

    let repo = ChatMessageRepository::new(db);
    assert!(repo.soft_delete(message.id, ride.client_id).await.unwrap());
    assert!(!repo.soft_delete(message.id, ride.client_id).await.unwrap());
}
