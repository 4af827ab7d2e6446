//! NotificationRepository - per-user notification feed

use super::Create;
use crate::dtos::CreateNotificationDTO;
use crate::entities::Notification;
use chrono::Utc;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

const NOTIFICATION_COLUMNS: &str =
    "id, user_id, type, title, message, related_id, related_type, is_read, created_at";

#[derive(Clone)]
pub struct NotificationRepository {
    connection_pool: SqlitePool,
}

impl NotificationRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Lists a user's notifications newest first, optionally filtered by
    /// read state and capped by `limit`. Non-positive limits are ignored;
    /// SQLite would read a negative LIMIT as "no limit".
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn find_many_by_user(
        &self,
        user_id: &i64,
        is_read: Option<bool>,
        limit: Option<i64>,
    ) -> Result<Vec<Notification>, Error> {
        debug!("Listing notifications for user");
        let limit = limit.filter(|l| *l > 0);
        let mut sql =
            format!("SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE user_id = ?");
        if is_read.is_some() {
            sql.push_str(" AND is_read = ?");
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC");
        if limit.is_some() {
            sql.push_str(" LIMIT ?");
        }

        let mut query = sqlx::query_as::<_, Notification>(&sql).bind(user_id);
        if let Some(is_read) = is_read {
            query = query.bind(is_read);
        }
        if let Some(limit) = limit {
            query = query.bind(limit);
        }
        query.fetch_all(&self.connection_pool).await
    }

    /// Marks one notification as read, scoped to its owner. Returns the
    /// updated row, or None if the id does not exist or belongs to someone
    /// else.
    #[instrument(skip(self), fields(notification_id = %id, user_id = %user_id))]
    pub async fn mark_read(
        &self,
        id: &i64,
        user_id: &i64,
    ) -> Result<Option<Notification>, Error> {
        debug!("Marking notification as read");
        let result = sqlx::query(
            "UPDATE notifications SET is_read = 1 WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.connection_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let sql = format!("SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = ?");
        sqlx::query_as::<_, Notification>(&sql)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn mark_all_read(&self, user_id: &i64) -> Result<u64, Error> {
        debug!("Marking all notifications as read");
        let result = sqlx::query(
            "UPDATE notifications SET is_read = 1 WHERE user_id = ? AND is_read = 0",
        )
        .bind(user_id)
        .execute(&self.connection_pool)
        .await?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn unread_count(&self, user_id: &i64) -> Result<i64, Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = ? AND is_read = 0",
        )
        .bind(user_id)
        .fetch_one(&self.connection_pool)
        .await
    }
}

impl Create<Notification, CreateNotificationDTO> for NotificationRepository {
    #[instrument(skip(self, data), fields(user_id = %data.user_id, kind = %data.kind))]
    async fn create(&self, data: &CreateNotificationDTO) -> Result<Notification, Error> {
        debug!("Creating new notification");
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO notifications \
             (user_id, type, title, message, related_id, related_type, is_read, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, 0, ?)",
        )
        .bind(data.user_id)
        .bind(&data.kind)
        .bind(&data.title)
        .bind(&data.message)
        .bind(data.related_id)
        .bind(&data.related_type)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Notification created with id {}", new_id);

        Ok(Notification {
            id: new_id,
            user_id: data.user_id,
            kind: data.kind.clone(),
            title: data.title.clone(),
            message: data.message.clone(),
            related_id: data.related_id,
            related_type: data.related_type.clone(),
            is_read: false,
            created_at: now,
        })
    }
}
