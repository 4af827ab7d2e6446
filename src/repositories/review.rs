//! ReviewRepository - teacher reviews and the confirmed-lesson check

use super::{Create, Read, Update};
use crate::dtos::{CreateReviewDTO, ReviewWithStudentRow, UpdateReviewDTO};
use crate::entities::Review;
use chrono::Utc;
use sqlx::{Error, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info, instrument};

const REVIEW_COLUMNS: &str =
    "id, teacher_id, student_id, lesson_request_id, rating, comment, created_at, updated_at";

pub struct ReviewRepository {
    connection_pool: SqlitePool,
}

impl ReviewRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Lists a teacher's reviews joined with their authors, newest first.
    #[instrument(skip(self), fields(teacher_id = %teacher_id))]
    pub async fn find_for_teacher(
        &self,
        teacher_id: &i64,
    ) -> Result<Vec<ReviewWithStudentRow>, Error> {
        debug!("Listing reviews for teacher");
        sqlx::query_as::<_, ReviewWithStudentRow>(
            "SELECT r.id, r.rating, r.comment, r.created_at, \
                    u.id AS student_id, u.name AS student_name, \
                    u.first_name AS student_first_name, \
                    u.last_name AS student_last_name, u.avatar AS student_avatar \
             FROM reviews r \
             JOIN users u ON u.id = r.student_id \
             WHERE r.teacher_id = ? \
             ORDER BY r.created_at DESC, r.id DESC",
        )
        .bind(teacher_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    /// True when the request exists, belongs to this student/teacher pair
    /// and was confirmed. Gates reviews that reference a lesson.
    #[instrument(skip(self), fields(request_id = %request_id, student_id = %student_id, teacher_id = %teacher_id))]
    pub async fn has_confirmed_request(
        &self,
        request_id: &i64,
        student_id: &i64,
        teacher_id: &i64,
    ) -> Result<bool, Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM lesson_requests \
             WHERE id = ? AND student_id = ? AND teacher_id = ? AND status = 'confirmed'",
        )
        .bind(request_id)
        .bind(student_id)
        .bind(teacher_id)
        .fetch_one(&self.connection_pool)
        .await?;
        Ok(count > 0)
    }
}

impl Create<Review, CreateReviewDTO> for ReviewRepository {
    #[instrument(skip(self, data), fields(teacher_id = %data.teacher_id, student_id = %data.student_id))]
    async fn create(&self, data: &CreateReviewDTO) -> Result<Review, Error> {
        debug!("Creating new review");
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO reviews \
             (teacher_id, student_id, lesson_request_id, rating, comment, \
              created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(data.teacher_id)
        .bind(data.student_id)
        .bind(data.lesson_request_id)
        .bind(data.rating)
        .bind(&data.comment)
        .bind(now)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Review created with id {}", new_id);

        Ok(Review {
            id: new_id,
            teacher_id: data.teacher_id,
            student_id: data.student_id,
            lesson_request_id: data.lesson_request_id,
            rating: data.rating,
            comment: data.comment.clone(),
            created_at: now,
            updated_at: now,
        })
    }
}

impl Read<Review, i64> for ReviewRepository {
    #[instrument(skip(self), fields(review_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<Review>, Error> {
        let sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?");
        sqlx::query_as::<_, Review>(&sql)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Update<Review, UpdateReviewDTO, i64> for ReviewRepository {
    #[instrument(skip(self, data), fields(review_id = %id))]
    async fn update(&self, id: &i64, data: &UpdateReviewDTO) -> Result<Review, Error> {
        debug!("Updating review");
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("UPDATE reviews SET updated_at = ");
        builder.push_bind(Utc::now());
        if let Some(rating) = data.rating {
            builder.push(", rating = ").push_bind(rating);
        }
        if let Some(comment) = &data.comment {
            builder.push(", comment = ").push_bind(comment.clone());
        }
        builder.push(" WHERE id = ").push_bind(*id);
        builder.build().execute(&self.connection_pool).await?;

        let sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?");
        sqlx::query_as::<_, Review>(&sql)
            .bind(id)
            .fetch_one(&self.connection_pool)
            .await
    }
}
