//! LessonRequestRepository - lesson request lifecycle persistence

use super::{Create, Read};
use crate::dtos::{CreateLessonRequestDTO, LessonRequestOverviewRow};
use crate::entities::{LessonRequest, RequestStatus, UserRole};
use chrono::{DateTime, Utc};
use sqlx::{Error, SqliteConnection, SqlitePool};
use tracing::{debug, info, instrument};

const REQUEST_COLUMNS: &str =
    "id, student_id, teacher_id, status, requested_date, requested_time, message, \
     created_at, updated_at";

pub struct LessonRequestRepository {
    connection_pool: SqlitePool,
}

impl LessonRequestRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Reads a request only if `user_id` is one of its two parties.
    #[instrument(skip(self), fields(request_id = %id, user_id = %user_id))]
    pub async fn read_for_participant(
        &self,
        id: &i64,
        user_id: &i64,
    ) -> Result<Option<LessonRequest>, Error> {
        debug!("Reading lesson request for participant");
        let sql = format!(
            "SELECT {REQUEST_COLUMNS} FROM lesson_requests \
             WHERE id = ? AND (student_id = ? OR teacher_id = ?)"
        );
        sqlx::query_as::<_, LessonRequest>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(user_id)
            .fetch_optional(&self.connection_pool)
            .await
    }

    /// Lists the viewer's requests joined with the other party, newest
    /// first. The same query serves both roles: the viewer's role decides
    /// which column is matched and which party is the counterpart.
    #[instrument(skip(self), fields(user_id = %user_id, role = ?role))]
    pub async fn find_for_user(
        &self,
        user_id: &i64,
        role: &UserRole,
        status: Option<&RequestStatus>,
    ) -> Result<Vec<LessonRequestOverviewRow>, Error> {
        debug!("Listing lesson requests for user");
        let (own, other) = match role {
            UserRole::Student => ("student_id", "teacher_id"),
            UserRole::Teacher => ("teacher_id", "student_id"),
        };

        let mut sql = format!(
            "SELECT lr.id, lr.student_id, lr.teacher_id, lr.status, lr.requested_date, \
                    lr.requested_time, lr.message, lr.created_at, lr.updated_at, \
                    u.id AS counterpart_id, u.name AS counterpart_name, \
                    u.first_name AS counterpart_first_name, \
                    u.last_name AS counterpart_last_name, u.avatar AS counterpart_avatar \
             FROM lesson_requests lr \
             JOIN users u ON u.id = lr.{other} \
             WHERE lr.{own} = ?"
        );
        if status.is_some() {
            sql.push_str(" AND lr.status = ?");
        }
        sql.push_str(" ORDER BY lr.created_at DESC, lr.id DESC");

        let mut query = sqlx::query_as::<_, LessonRequestOverviewRow>(&sql).bind(user_id);
        if let Some(status) = status {
            query = query.bind(status);
        }
        query.fetch_all(&self.connection_pool).await
    }

    /// Single-fire status transition: only a pending request is updated.
    /// Returns the number of affected rows; 0 means the request had already
    /// left the pending state.
    ///
    /// Takes a connection so the confirm path can run it in the same
    /// transaction as the chat provisioning.
    #[instrument(skip(self, conn), fields(request_id = %id, to = ?to))]
    pub async fn transition(
        &self,
        conn: &mut SqliteConnection,
        id: &i64,
        to: &RequestStatus,
        now: &DateTime<Utc>,
    ) -> Result<u64, Error> {
        debug!("Transitioning lesson request out of pending");
        let result = sqlx::query(
            "UPDATE lesson_requests SET status = ?, updated_at = ? \
             WHERE id = ? AND status = 'pending'",
        )
        .bind(to)
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }
}

impl Create<LessonRequest, CreateLessonRequestDTO> for LessonRequestRepository {
    #[instrument(skip(self, data), fields(student_id = %data.student_id, teacher_id = %data.teacher_id))]
    async fn create(&self, data: &CreateLessonRequestDTO) -> Result<LessonRequest, Error> {
        debug!("Creating new lesson request");
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO lesson_requests \
             (student_id, teacher_id, status, requested_date, requested_time, message, \
              created_at, updated_at) \
             VALUES (?, ?, 'pending', ?, ?, ?, ?, ?)",
        )
        .bind(data.student_id)
        .bind(data.teacher_id)
        .bind(data.requested_date)
        .bind(&data.requested_time)
        .bind(&data.message)
        .bind(now)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Lesson request created with id {}", new_id);

        Ok(LessonRequest {
            id: new_id,
            student_id: data.student_id,
            teacher_id: data.teacher_id,
            status: RequestStatus::Pending,
            requested_date: data.requested_date,
            requested_time: data.requested_time.clone(),
            message: data.message.clone(),
            created_at: now,
            updated_at: now,
        })
    }
}

impl Read<LessonRequest, i64> for LessonRequestRepository {
    #[instrument(skip(self), fields(request_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<LessonRequest>, Error> {
        debug!("Reading lesson request by id");
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM lesson_requests WHERE id = ?");
        sqlx::query_as::<_, LessonRequest>(&sql)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}
