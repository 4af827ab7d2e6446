//! MessageRepository - append-only message log with read cursors

use super::Create;
use crate::dtos::{CreateMessageDTO, MessageWithSenderRow};
use crate::entities::Message;
use chrono::{DateTime, Utc};
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

pub struct MessageRepository {
    connection_pool: SqlitePool,
}

impl MessageRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Lists a chat's messages oldest first, with sender display fields.
    #[instrument(skip(self), fields(chat_id = %chat_id))]
    pub async fn find_many_by_chat_id(
        &self,
        chat_id: &i64,
    ) -> Result<Vec<MessageWithSenderRow>, Error> {
        debug!("Listing messages for chat");
        sqlx::query_as::<_, MessageWithSenderRow>(
            "SELECT m.id, m.chat_id, m.sender_id, m.content, m.created_at, m.read_at, \
                    u.name AS sender_name, u.first_name AS sender_first_name, \
                    u.last_name AS sender_last_name \
             FROM messages m \
             JOIN users u ON u.id = m.sender_id \
             WHERE m.chat_id = ? \
             ORDER BY m.created_at ASC, m.id ASC",
        )
        .bind(chat_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    /// Stamps `read_at` on every unread message the viewer received in this
    /// chat. Already-read messages keep their original timestamp.
    #[instrument(skip(self), fields(chat_id = %chat_id, reader_id = %reader_id))]
    pub async fn mark_read(
        &self,
        chat_id: &i64,
        reader_id: &i64,
        now: &DateTime<Utc>,
    ) -> Result<u64, Error> {
        debug!("Marking incoming messages as read");
        let result = sqlx::query(
            "UPDATE messages SET read_at = ? \
             WHERE chat_id = ? AND sender_id != ? AND read_at IS NULL",
        )
        .bind(now)
        .bind(chat_id)
        .bind(reader_id)
        .execute(&self.connection_pool)
        .await?;

        Ok(result.rows_affected())
    }
}

impl Create<Message, CreateMessageDTO> for MessageRepository {
    #[instrument(skip(self, data), fields(chat_id = %data.chat_id, sender_id = %data.sender_id))]
    async fn create(&self, data: &CreateMessageDTO) -> Result<Message, Error> {
        debug!("Creating new message");
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO messages (chat_id, sender_id, content, created_at, read_at) \
             VALUES (?, ?, ?, ?, NULL)",
        )
        .bind(data.chat_id)
        .bind(data.sender_id)
        .bind(&data.content)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Message created with id {}", new_id);

        Ok(Message {
            id: new_id,
            chat_id: data.chat_id,
            sender_id: data.sender_id,
            content: data.content.clone(),
            created_at: now,
            read_at: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(fixtures(
        path = "../../fixtures",
        scripts("users", "requests", "chats", "messages")
    ))]
    async fn mark_read_only_touches_incoming_unread(pool: SqlitePool) {
        let repo = MessageRepository::new(pool);
        let now = Utc::now();

        // Chat 1: Dan (4) has one unread message from Bob (2)
        let marked = repo.mark_read(&1, &4, &now).await.unwrap();
        assert_eq!(marked, 1);

        // Second pass finds nothing left to mark
        let marked_again = repo.mark_read(&1, &4, &now).await.unwrap();
        assert_eq!(marked_again, 0);

        // Dan's own unread message to Bob is untouched
        let messages = repo.find_many_by_chat_id(&1).await.unwrap();
        let outgoing = messages.iter().find(|m| m.id == 3).unwrap();
        assert!(outgoing.read_at.is_none());
    }
}
