//! ChatRepository - chat provisioning and per-viewer overviews

use crate::dtos::ChatOverviewRow;
use crate::entities::{Chat, UserRole};
use chrono::{DateTime, Utc};
use sqlx::{Error, SqliteConnection, SqlitePool};
use tracing::{debug, info, instrument};

const CHAT_COLUMNS: &str =
    "id, student_id, teacher_id, lesson_request_id, created_at, updated_at";

pub struct ChatRepository {
    connection_pool: SqlitePool,
}

impl ChatRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Provisions the chat for a confirmed request, idempotently. The insert
    /// is conflict-tolerant against the unique index on
    /// (student_id, teacher_id, lesson_request_id); the follow-up select
    /// returns the surviving row either way.
    ///
    /// Takes a connection so the confirm path can run it in the same
    /// transaction as the status transition.
    #[instrument(skip(self, conn), fields(student_id = %student_id, teacher_id = %teacher_id, request_id = %lesson_request_id))]
    pub async fn ensure_chat(
        &self,
        conn: &mut SqliteConnection,
        student_id: &i64,
        teacher_id: &i64,
        lesson_request_id: &i64,
    ) -> Result<Chat, Error> {
        debug!("Provisioning chat for confirmed lesson request");
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT OR IGNORE INTO chats \
             (student_id, teacher_id, lesson_request_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(student_id)
        .bind(teacher_id)
        .bind(lesson_request_id)
        .bind(now)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 1 {
            info!("Chat created for lesson request {}", lesson_request_id);
        } else {
            debug!("Chat already exists for lesson request {}", lesson_request_id);
        }

        let sql = format!(
            "SELECT {CHAT_COLUMNS} FROM chats \
             WHERE student_id = ? AND teacher_id = ? AND lesson_request_id = ?"
        );
        sqlx::query_as::<_, Chat>(&sql)
            .bind(student_id)
            .bind(teacher_id)
            .bind(lesson_request_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Reads a chat only if `user_id` is one of its two participants.
    #[instrument(skip(self), fields(chat_id = %id, user_id = %user_id))]
    pub async fn find_for_participant(
        &self,
        id: &i64,
        user_id: &i64,
    ) -> Result<Option<Chat>, Error> {
        debug!("Reading chat for participant");
        let sql = format!(
            "SELECT {CHAT_COLUMNS} FROM chats \
             WHERE id = ? AND (student_id = ? OR teacher_id = ?)"
        );
        sqlx::query_as::<_, Chat>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(user_id)
            .fetch_optional(&self.connection_pool)
            .await
    }

    /// Lists the viewer's chats with counterpart, unread count and last
    /// message preview, most recently active first. Unread counts messages
    /// sent by the other party that have no read timestamp yet.
    #[instrument(skip(self), fields(user_id = %user_id, role = ?role))]
    pub async fn find_overviews_for_user(
        &self,
        user_id: &i64,
        role: &UserRole,
    ) -> Result<Vec<ChatOverviewRow>, Error> {
        debug!("Listing chat overviews for user");
        let (own, other) = match role {
            UserRole::Student => ("student_id", "teacher_id"),
            UserRole::Teacher => ("teacher_id", "student_id"),
        };

        let sql = format!(
            "SELECT c.id, c.lesson_request_id, c.created_at, c.updated_at, \
                    u.id AS counterpart_id, u.name AS counterpart_name, \
                    u.first_name AS counterpart_first_name, \
                    u.last_name AS counterpart_last_name, u.avatar AS counterpart_avatar, \
                    (SELECT COUNT(*) FROM messages m \
                      WHERE m.chat_id = c.id AND m.sender_id != ? AND m.read_at IS NULL) \
                        AS unread_count, \
                    (SELECT m.content FROM messages m WHERE m.chat_id = c.id \
                      ORDER BY m.created_at DESC, m.id DESC LIMIT 1) AS last_message, \
                    (SELECT m.created_at FROM messages m WHERE m.chat_id = c.id \
                      ORDER BY m.created_at DESC, m.id DESC LIMIT 1) AS last_message_at \
             FROM chats c \
             JOIN users u ON u.id = c.{other} \
             WHERE c.{own} = ? \
             ORDER BY c.updated_at DESC, c.id DESC"
        );
        sqlx::query_as::<_, ChatOverviewRow>(&sql)
            .bind(user_id)
            .bind(user_id)
            .fetch_all(&self.connection_pool)
            .await
    }

    /// Bumps the chat's activity timestamp after a new message.
    #[instrument(skip(self), fields(chat_id = %id))]
    pub async fn touch(&self, id: &i64, now: &DateTime<Utc>) -> Result<(), Error> {
        sqlx::query("UPDATE chats SET updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(id)
            .execute(&self.connection_pool)
            .await?;
        Ok(())
    }
}
