//! Per-ride chat: moderation, rate limiting, history, realtime fan-out.
//!
//! The chat subsystem reads ride rows to resolve access but never writes
//! ride state. Message mutations go through `ChatMessageRepository`; every
//! successful mutation is fanned out to realtime subscribers via the
//! [`ChatHub`](hub::ChatHub).

pub mod hub;
pub mod moderation;
pub mod rate_limit;

use sea_orm::DatabaseConnection;
use tracing::{debug, info};

use crate::{
    data::{chat_message::ChatMessageRepository, ride::RideRepository},
    error::AppError,
    model::chat::{
        ChatEvent, ChatHistoryPage, ChatMessage, ChatRole, ChatStats, SendMessageParams,
        SentMessage,
    },
};

use self::{hub::ChatHub, rate_limit::RateLimiter};

pub struct ChatService<'a> {
    db: &'a DatabaseConnection,
    limiter: &'a RateLimiter,
    hub: &'a ChatHub,
}

impl<'a> ChatService<'a> {
    pub fn new(db: &'a DatabaseConnection, limiter: &'a RateLimiter, hub: &'a ChatHub) -> Self {
        Self { db, limiter, hub }
    }

    /// Moderates, stores and fans out a message.
    ///
    /// # Returns
    /// - `Ok(SentMessage)`: Stored message plus whether it was censored
    /// - `Err(AppError::RateLimited)`: Sender exhausted their message budget
    /// - `Err(AppError::BadRequest)`: Moderation rejected the message
    /// - `Err(AppError::DbErr)`: Database error
    pub async fn send_message(
        &self,
        ride_id: i32,
        sender_id: i64,
        params: SendMessageParams,
    ) -> Result<SentMessage, AppError> {
        if !self.limiter.check(sender_id) {
            debug!(ride_id, sender_id, "chat message rate limited");
            return Err(AppError::RateLimited(format!(
                "Rate limit exceeded. Max {} messages per {}s",
                self.limiter.max_messages(),
                self.limiter.period().num_seconds()
            )));
        }

        let moderation = moderation::moderate(&params.text);
        if !moderation.passed {
            return Err(AppError::BadRequest(
                moderation
                    .reason
                    .unwrap_or_else(|| "Message rejected".to_string()),
            ));
        }
        let censored = moderation.filtered != moderation.original;

        let message = ChatMessageRepository::new(self.db)
            .create(
                ride_id,
                sender_id,
                params.receiver_id,
                moderation.filtered,
                params.message_type,
                params.attachments,
            )
            .await?;

        let delivered = self.hub.publish(
            ride_id,
            ChatEvent::NewMessage {
                message: message.clone(),
            },
        );
        info!(ride_id, sender_id, message_id = message.id, delivered, "chat message sent");

        Ok(SentMessage { message, censored })
    }

    /// Reads one page of chat history in chronological order.
    ///
    /// # Arguments
    /// - `ride_id`: Ride whose chat to read
    /// - `limit`: Page size
    /// - `before_id`: Keyset cursor; only messages older than this id
    ///
    /// # Returns
    /// - `Ok(ChatHistoryPage)`: Messages oldest-first with a `has_more` flag
    /// - `Err(AppError)`: Database error
    pub async fn history(
        &self,
        ride_id: i32,
        limit: u64,
        before_id: Option<i32>,
    ) -> Result<ChatHistoryPage, AppError> {
        // Fetch one row beyond the page to learn whether more remain.
        let mut messages = ChatMessageRepository::new(self.db)
            .list_for_ride(ride_id, limit + 1, before_id, false)
            .await?;

        let has_more = messages.len() as u64 > limit;
        messages.truncate(limit as usize);
        messages.reverse();

        Ok(ChatHistoryPage {
            ride_id,
            messages,
            has_more,
        })
    }

    /// Soft-deletes a message on behalf of its author and notifies
    /// subscribers.
    ///
    /// # Returns
    /// - `Ok(true)`: Deleted
    /// - `Ok(false)`: No live message with this id owned by `user_id`;
    ///   callers map this to 404
    /// - `Err(AppError)`: Database error
    pub async fn delete_message(
        &self,
        ride_id: i32,
        message_id: i32,
        user_id: i64,
    ) -> Result<bool, AppError> {
        let deleted = ChatMessageRepository::new(self.db)
            .soft_delete(message_id, user_id)
            .await?;

        if deleted {
            self.hub.publish(
                ride_id,
                ChatEvent::MessageDeleted {
                    message_id,
                    deleted_by: user_id,
                },
            );
            info!(ride_id, message_id, user_id, "chat message deleted");
        }

        Ok(deleted)
    }

    /// Edits a message on behalf of its author, re-moderating the new text,
    /// and notifies subscribers.
    ///
    /// # Returns
    /// - `Ok(Some(ChatMessage))`: The edited message
    /// - `Ok(None)`: No live message with this id owned by `user_id`
    /// - `Err(AppError::BadRequest)`: Moderation rejected the new text
    /// - `Err(AppError::DbErr)`: Database error
    pub async fn edit_message(
        &self,
        ride_id: i32,
        message_id: i32,
        user_id: i64,
        new_text: &str,
    ) -> Result<Option<ChatMessage>, AppError> {
        let moderation = moderation::moderate(new_text);
        if !moderation.passed {
            return Err(AppError::BadRequest(
                moderation
                    .reason
                    .unwrap_or_else(|| "Message rejected".to_string()),
            ));
        }

        let edited = ChatMessageRepository::new(self.db)
            .edit(message_id, user_id, moderation.filtered, moderation.passed)
            .await?;

        if let Some(message) = &edited {
            self.hub.publish(
                ride_id,
                ChatEvent::MessageEdited {
                    message: message.clone(),
                },
            );
        }

        Ok(edited)
    }

    /// Resolves the role a user holds in a ride's chat.
    ///
    /// # Returns
    /// - `Ok(Some(ChatRole))`: User may participate with the given role
    /// - `Ok(None)`: Ride not found
    /// - `Err(AppError)`: Database error
    pub async fn validate_access(
        &self,
        ride_id: i32,
        user_id: i64,
    ) -> Result<Option<ChatRole>, AppError> {
        let Some(ride) = RideRepository::new(self.db).get_by_id(ride_id).await? else {
            return Ok(None);
        };

        if ride.client_id == user_id {
            return Ok(Some(ChatRole::Client));
        }

        // TODO: resolve the driver's user id through the driver profile
        // service once it exposes a lookup; until then non-clients get the
        // operator role.
        Ok(Some(ChatRole::Operator))
    }

    /// Operational counters for the chat subsystem.
    pub fn stats(&self) -> ChatStats {
        ChatStats {
            tracked_users: self.limiter.tracked_users(),
            rate_limit_messages: self.limiter.max_messages(),
            rate_limit_period_seconds: self.limiter.period().num_seconds(),
            max_message_length: moderation::MAX_MESSAGE_LENGTH,
        }
    }
}
