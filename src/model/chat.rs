//! Domain models for the per-ride chat subsystem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use entity::chat_message::MessageType;

/// One chat message within a ride's conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i32,
    pub ride_id: i32,
    pub sender_id: i64,
    /// Direct recipient, when the message is not addressed to the whole ride.
    pub receiver_id: Option<i64>,
    /// Message text after moderation (censored when a banned word matched).
    pub text: String,
    pub message_type: MessageType,
    pub attachments: Option<Value>,
    pub is_moderated: bool,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    /// Soft-delete marker; deleted messages stay in storage but are hidden
    /// from history by default.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ChatMessage {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::chat_message::Model) -> Self {
        Self {
            id: entity.id,
            ride_id: entity.ride_id,
            sender_id: entity.sender_id,
            receiver_id: entity.receiver_id,
            text: entity.text,
            message_type: entity.message_type,
            attachments: entity.attachments,
            is_moderated: entity.is_moderated,
            created_at: entity.created_at,
            edited_at: entity.edited_at,
            deleted_at: entity.deleted_at,
        }
    }
}

/// Parameters for sending a chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageParams {
    pub text: String,
    pub message_type: MessageType,
    pub receiver_id: Option<i64>,
    pub attachments: Option<Value>,
}

/// A stored message plus whether moderation had to censor it.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub message: ChatMessage,
    pub censored: bool,
}

/// One page of chat history in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatHistoryPage {
    pub ride_id: i32,
    pub messages: Vec<ChatMessage>,
    /// True when older messages exist beyond this page.
    pub has_more: bool,
}

/// Role a user holds within a ride's chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    Client,
    Operator,
}

/// Event fanned out to realtime subscribers of a ride's chat.
///
/// The serde tag mirrors the wire protocol the websocket layer speaks.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    NewMessage { message: ChatMessage },
    MessageDeleted { message_id: i32, deleted_by: i64 },
    MessageEdited { message: ChatMessage },
}

/// Operational counters for the chat subsystem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatStats {
    /// Users currently holding rate-limit state.
    pub tracked_users: usize,
    /// Configured messages-per-window budget.
    pub rate_limit_messages: usize,
    /// Window length in seconds.
    pub rate_limit_period_seconds: i64,
    /// Maximum accepted message length in characters.
    pub max_message_length: usize,
}
