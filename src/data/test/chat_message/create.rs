use super::*;

/// Tests storing a message with the full field set.
///
/// Expected: Ok with all fields echoed and no edit/delete markers
#[tokio::test]
async fn stores_a_message() {
    let test = TestBuilder::new().with_chat_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ride = factory::ride::create_ride(db).await.unwrap();

    let message = ChatMessageRepository::new(db)
        .create(
            ride.id,
            ride.client_id,
            Some(99),
            "be there in five".to_string(),
            MessageType::Text,
            Some(serde_json::json!({"image_url": null})),
        )
        .await
        .unwrap();

    assert_eq!(message.ride_id, ride.id);
    assert_eq!(message.sender_id, ride.client_id);
    assert_eq!(message.receiver_id, Some(99));
    assert_eq!(message.text, "be there in five");
    assert_eq!(message.message_type, MessageType::Text);
    assert!(message.is_moderated);
    assert!(message.edited_at.is_none());
    assert!(message.deleted_at.is_none());
}
