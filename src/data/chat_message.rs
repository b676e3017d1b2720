use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use entity::chat_message::Column;

use crate::model::chat::{ChatMessage, MessageType};

pub struct ChatMessageRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ChatMessageRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a message that already passed moderation.
    ///
    /// # Arguments
    /// - `ride_id`: Ride the message belongs to
    /// - `sender_id`: Author of the message
    /// - `receiver_id`: Optional direct recipient
    /// - `text`: Message text, post-moderation
    /// - `message_type`: Payload kind
    /// - `attachments`: Optional structured attachment data
    ///
    /// # Returns
    /// - `Ok(ChatMessage)`: The stored message
    /// - `Err(DbErr)`: Database error
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        ride_id: i32,
        sender_id: i64,
        receiver_id: Option<i64>,
        text: String,
        message_type: MessageType,
        attachments: Option<serde_json::Value>,
    ) -> Result<ChatMessage, DbErr> {
        let message = entity::chat_message::ActiveModel {
            ride_id: ActiveValue::Set(ride_id),
            sender_id: ActiveValue::Set(sender_id),
            receiver_id: ActiveValue::Set(receiver_id),
            text: ActiveValue::Set(text),
            message_type: ActiveValue::Set(message_type),
            attachments: ActiveValue::Set(attachments),
            is_moderated: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(ChatMessage::from_entity(message))
    }

    /// Reads up to `limit` messages for a ride, newest first.
    ///
    /// Keyset pagination: with `before_id`, only messages with a smaller id
    /// are returned. Soft-deleted messages are excluded unless
    /// `include_deleted` is set.
    ///
    /// # Returns
    /// - `Ok(Vec<ChatMessage>)`: Messages in descending id order
    /// - `Err(DbErr)`: Database error
    pub async fn list_for_ride(
        &self,
        ride_id: i32,
        limit: u64,
        before_id: Option<i32>,
        include_deleted: bool,
    ) -> Result<Vec<ChatMessage>, DbErr> {
        let mut query = entity::prelude::ChatMessage::find().filter(Column::RideId.eq(ride_id));

        if let Some(before_id) = before_id {
            query = query.filter(Column::Id.lt(before_id));
        }
        if !include_deleted {
            query = query.filter(Column::DeletedAt.is_null());
        }

        let messages = query
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(messages.into_iter().map(ChatMessage::from_entity).collect())
    }

    /// Soft-deletes a message, but only for its author.
    ///
    /// A single conditional update carries the author and not-yet-deleted
    /// predicates, so a non-author (or a repeat delete) is a no-op rather
    /// than an error.
    ///
    /// # Returns
    /// - `Ok(true)`: Message deleted
    /// - `Ok(false)`: No matching live message owned by `user_id`
    /// - `Err(DbErr)`: Database error
    pub async fn soft_delete(&self, message_id: i32, user_id: i64) -> Result<bool, DbErr> {
        let result = entity::prelude::ChatMessage::update_many()
            .col_expr(Column::DeletedAt, Expr::value(Some(Utc::now())))
            .filter(Column::Id.eq(message_id))
            .filter(Column::SenderId.eq(user_id))
            .filter(Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Replaces a message's text, but only for its author.
    ///
    /// # Arguments
    /// - `message_id`: Message to edit
    /// - `user_id`: Caller; must be the author
    /// - `text`: New text, post-moderation
    /// - `is_moderated`: Whether the new text passed moderation
    ///
    /// # Returns
    /// - `Ok(Some(ChatMessage))`: The edited message
    /// - `Ok(None)`: No matching live message owned by `user_id`
    /// - `Err(DbErr)`: Database error
    pub async fn edit(
        &self,
        message_id: i32,
        user_id: i64,
        text: String,
        is_moderated: bool,
    ) -> Result<Option<ChatMessage>, DbErr> {
        let result = entity::prelude::ChatMessage::update_many()
            .col_expr(Column::Text, Expr::value(text))
            .col_expr(Column::EditedAt, Expr::value(Some(Utc::now())))
            .col_expr(Column::IsModerated, Expr::value(is_moderated))
            .filter(Column::Id.eq(message_id))
            .filter(Column::SenderId.eq(user_id))
            .filter(Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        Ok(entity::prelude::ChatMessage::find_by_id(message_id)
            .one(self.db)
            .await?
            .map(ChatMessage::from_entity))
    }
}
