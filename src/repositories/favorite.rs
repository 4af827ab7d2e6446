//! FavoriteRepository - student bookmarks of teachers

use crate::entities::{Favorite, User};
use chrono::Utc;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

pub struct FavoriteRepository {
    connection_pool: SqlitePool,
}

impl FavoriteRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Lists the teachers a student has bookmarked, most recent first.
    #[instrument(skip(self), fields(student_id = %student_id))]
    pub async fn list_teachers_for_student(
        &self,
        student_id: &i64,
    ) -> Result<Vec<User>, Error> {
        debug!("Listing favorite teachers for student");
        sqlx::query_as::<_, User>(
            "SELECT u.id, u.name, u.role, u.bio, u.avatar, u.first_name, u.last_name, \
                    u.age, u.city, u.experience, u.education, u.specialization, \
                    u.price_per_lesson, u.online_offline_format \
             FROM favorites f \
             JOIN users u ON u.id = f.teacher_id \
             WHERE f.student_id = ? \
             ORDER BY f.created_at DESC, f.id DESC",
        )
        .bind(student_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    #[instrument(skip(self), fields(student_id = %student_id, teacher_id = %teacher_id))]
    pub async fn exists(&self, student_id: &i64, teacher_id: &i64) -> Result<bool, Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM favorites WHERE student_id = ? AND teacher_id = ?",
        )
        .bind(student_id)
        .bind(teacher_id)
        .fetch_one(&self.connection_pool)
        .await?;
        Ok(count > 0)
    }

    /// Inserts the bookmark. A duplicate pair hits the unique constraint,
    /// which the error layer maps to a conflict.
    #[instrument(skip(self), fields(student_id = %student_id, teacher_id = %teacher_id))]
    pub async fn add(&self, student_id: &i64, teacher_id: &i64) -> Result<Favorite, Error> {
        debug!("Adding teacher to favorites");
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO favorites (student_id, teacher_id, created_at) VALUES (?, ?, ?)",
        )
        .bind(student_id)
        .bind(teacher_id)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Favorite created with id {}", new_id);

        Ok(Favorite {
            id: new_id,
            student_id: *student_id,
            teacher_id: *teacher_id,
            created_at: now,
        })
    }

    /// Removes the bookmark; returns the number of deleted rows.
    #[instrument(skip(self), fields(student_id = %student_id, teacher_id = %teacher_id))]
    pub async fn remove(&self, student_id: &i64, teacher_id: &i64) -> Result<u64, Error> {
        debug!("Removing teacher from favorites");
        let result = sqlx::query(
            "DELETE FROM favorites WHERE student_id = ? AND teacher_id = ?",
        )
        .bind(student_id)
        .bind(teacher_id)
        .execute(&self.connection_pool)
        .await?;

        Ok(result.rows_affected())
    }
}
