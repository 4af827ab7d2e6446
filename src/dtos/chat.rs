//! Chat DTOs

use super::message::MessageDTO;
use super::user::UserSummaryDTO;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Flat projection of a chat joined with the counterpart user and the
/// per-viewer unread/last-message scalars.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChatOverviewRow {
    pub id: i64,
    pub lesson_request_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_first_name: Option<String>,
    pub counterpart_last_name: Option<String>,
    pub counterpart_avatar: Option<String>,
    pub unread_count: i64,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
}

/// List item for GET /chats.
#[derive(Serialize, Debug, Clone)]
pub struct ChatOverviewDTO {
    pub id: i64,
    pub lesson_request_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub counterpart: UserSummaryDTO,
    pub unread_count: i64,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
}

impl From<ChatOverviewRow> for ChatOverviewDTO {
    fn from(value: ChatOverviewRow) -> Self {
        Self {
            id: value.id,
            lesson_request_id: value.lesson_request_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
            counterpart: UserSummaryDTO {
                id: value.counterpart_id,
                name: value.counterpart_name,
                first_name: value.counterpart_first_name,
                last_name: value.counterpart_last_name,
                avatar: value.counterpart_avatar,
            },
            unread_count: value.unread_count,
            last_message: value.last_message,
            last_message_at: value.last_message_at,
        }
    }
}

/// Detail payload for GET /chats/{id}: the full message log plus the other
/// participant. Fetching this marks the viewer's incoming messages as read.
#[derive(Serialize, Debug, Clone)]
pub struct ChatDetailDTO {
    pub id: i64,
    pub lesson_request_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub other_user: UserSummaryDTO,
    pub messages: Vec<MessageDTO>,
}
