//! Message DTOs

use crate::entities::{Message, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for POST /messages.
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct SendMessageDTO {
    pub chat_id: Option<i64>,

    #[validate(length(
        min = 1,
        max = 5000,
        message = "Message content must be between 1 and 5000 characters"
    ))]
    pub content: String,
}

/// Internal DTO the repository inserts from.
#[derive(Debug, Clone)]
pub struct CreateMessageDTO {
    pub chat_id: i64,
    pub sender_id: i64,
    pub content: String,
}

/// Flat projection of a message joined with its sender's display fields.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageWithSenderRow {
    pub id: i64,
    pub chat_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub sender_name: String,
    pub sender_first_name: Option<String>,
    pub sender_last_name: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct MessageDTO {
    pub id: i64,
    pub chat_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub sender_name: String,
    pub sender_first_name: Option<String>,
    pub sender_last_name: Option<String>,
}

impl From<MessageWithSenderRow> for MessageDTO {
    fn from(value: MessageWithSenderRow) -> Self {
        Self {
            id: value.id,
            chat_id: value.chat_id,
            sender_id: value.sender_id,
            content: value.content,
            created_at: value.created_at,
            read_at: value.read_at,
            sender_name: value.sender_name,
            sender_first_name: value.sender_first_name,
            sender_last_name: value.sender_last_name,
        }
    }
}

impl MessageDTO {
    /// Builds the response for a just-sent message, where the sender is the
    /// authenticated user and no join is needed.
    pub fn from_message(message: Message, sender: &User) -> Self {
        Self {
            id: message.id,
            chat_id: message.chat_id,
            sender_id: message.sender_id,
            content: message.content,
            created_at: message.created_at,
            read_at: message.read_at,
            sender_name: sender.name.clone(),
            sender_first_name: sender.first_name.clone(),
            sender_last_name: sender.last_name.clone(),
        }
    }
}
