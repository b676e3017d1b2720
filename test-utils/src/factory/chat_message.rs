//! Chat message factory for creating test chat message entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::chat_message::MessageType;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test chat messages with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::chat_message::ChatMessageFactory;
///
/// let message = ChatMessageFactory::new(&db, ride.id, ride.client_id)
///     .text("custom text")
///     .build()
///     .await?;
/// ```
pub struct ChatMessageFactory<'a> {
    db: &'a DatabaseConnection,
    ride_id: i32,
    sender_id: i64,
    receiver_id: Option<i64>,
    text: String,
    message_type: MessageType,
}

impl<'a> ChatMessageFactory<'a> {
    /// Creates a new ChatMessageFactory with default values.
    ///
    /// Defaults:
    /// - text: `"Message {id}"` where id is auto-incremented
    /// - message_type: `MessageType::Text`
    /// - receiver_id: `None`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `ride_id` - Ride the message belongs to
    /// - `sender_id` - Author of the message
    ///
    /// # Returns
    /// - `ChatMessageFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, ride_id: i32, sender_id: i64) -> Self {
        Self {
            db,
            ride_id,
            sender_id,
            receiver_id: None,
            text: format!("Message {}", next_id()),
            message_type: MessageType::Text,
        }
    }

    /// Sets the message text.
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the direct recipient.
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn receiver_id(mut self, receiver_id: Option<i64>) -> Self {
        self.receiver_id = receiver_id;
        self
    }

    /// Sets the message type.
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn message_type(mut self, message_type: MessageType) -> Self {
        self.message_type = message_type;
        self
    }

    /// Builds and inserts the chat message entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::chat_message::Model)` - Created chat message entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::chat_message::Model, DbErr> {
        entity::chat_message::ActiveModel {
            ride_id: ActiveValue::Set(self.ride_id),
            sender_id: ActiveValue::Set(self.sender_id),
            receiver_id: ActiveValue::Set(self.receiver_id),
            text: ActiveValue::Set(self.text),
            message_type: ActiveValue::Set(self.message_type),
            is_moderated: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a chat message with default values.
///
/// Shorthand for `ChatMessageFactory::new(db, ride_id, sender_id).build().await`.
///
/// # Returns
/// - `Ok(entity::chat_message::Model)` - Created chat message entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_message(
    db: &DatabaseConnection,
    ride_id: i32,
    sender_id: i64,
) -> Result<entity::chat_message::Model, DbErr> {
    ChatMessageFactory::new(db, ride_id, sender_id).build().await
}
