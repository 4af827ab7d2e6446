//! TeacherRepository - teacher discovery and profile reads
//!
//! Search composes optional filters onto one aggregate query; the review
//! average is rounded to two decimals and defaults to 0.0 for teachers
//! without reviews.

use crate::dtos::{TeacherSearchQuery, TeacherSearchRow};
use crate::entities::Subject;
use sqlx::{Error, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, instrument};

const TEACHER_SELECT: &str =
    "SELECT u.id, u.name, u.first_name, u.last_name, u.bio, u.avatar, u.city, \
            u.experience, u.education, u.specialization, u.price_per_lesson, \
            u.online_offline_format, \
            COALESCE(ROUND(AVG(r.rating), 2), 0.0) AS rating, \
            COUNT(DISTINCT r.id) AS review_count \
     FROM users u \
     LEFT JOIN reviews r ON r.teacher_id = u.id \
     WHERE u.role = 'teacher'";

pub struct TeacherRepository {
    connection_pool: SqlitePool,
}

impl TeacherRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Filtered teacher search, best rated first, name as tiebreaker.
    /// Filters are conjunctive; absent filters do not constrain.
    #[instrument(skip(self, filters))]
    pub async fn search(
        &self,
        filters: &TeacherSearchQuery,
    ) -> Result<Vec<TeacherSearchRow>, Error> {
        debug!("Searching teachers with filters: {:?}", filters);
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(TEACHER_SELECT);

        if let Some(search) = &filters.search {
            // LIKE is case-insensitive for ASCII in SQLite
            let pattern = format!("%{}%", search);
            builder
                .push(" AND (u.name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR u.first_name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR u.last_name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR u.bio LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(subject) = filters.subject {
            builder
                .push(
                    " AND EXISTS (SELECT 1 FROM teacher_subjects ts \
                     WHERE ts.teacher_id = u.id AND ts.subject_id = ",
                )
                .push_bind(subject)
                .push(")");
        }
        if let Some(city) = &filters.city {
            builder
                .push(" AND u.city LIKE ")
                .push_bind(format!("%{}%", city));
        }
        if let Some(min_price) = filters.min_price {
            builder
                .push(" AND u.price_per_lesson >= ")
                .push_bind(min_price);
        }
        if let Some(max_price) = filters.max_price {
            builder
                .push(" AND u.price_per_lesson <= ")
                .push_bind(max_price);
        }
        if let Some(format) = filters.online_offline_format {
            // Teachers offering 'both' match any requested format
            builder
                .push(" AND (u.online_offline_format = ")
                .push_bind(format)
                .push(" OR u.online_offline_format = 'both')");
        }
        if let Some(date) = filters.available_date {
            builder
                .push(
                    " AND EXISTS (SELECT 1 FROM teacher_availability ta \
                     WHERE ta.teacher_id = u.id AND ta.is_available = 1 AND ta.date = ",
                )
                .push_bind(date)
                .push(")");
        }
        if let Some(day) = filters.available_day {
            builder
                .push(
                    " AND EXISTS (SELECT 1 FROM teacher_available_days td \
                     WHERE td.teacher_id = u.id AND td.day_of_week = ",
                )
                .push_bind(day)
                .push(")");
        }

        builder.push(" GROUP BY u.id ORDER BY rating DESC, u.name ASC");

        builder
            .build_query_as::<TeacherSearchRow>()
            .fetch_all(&self.connection_pool)
            .await
    }

    /// Single teacher profile with the same review aggregate as `search`.
    #[instrument(skip(self), fields(teacher_id = %id))]
    pub async fn find_profile(&self, id: &i64) -> Result<Option<TeacherSearchRow>, Error> {
        debug!("Reading teacher profile");
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(TEACHER_SELECT);
        builder
            .push(" AND u.id = ")
            .push_bind(*id)
            .push(" GROUP BY u.id");

        builder
            .build_query_as::<TeacherSearchRow>()
            .fetch_optional(&self.connection_pool)
            .await
    }

    #[instrument(skip(self), fields(teacher_id = %teacher_id))]
    pub async fn subjects_for_teacher(&self, teacher_id: &i64) -> Result<Vec<Subject>, Error> {
        sqlx::query_as::<_, Subject>(
            "SELECT s.id, s.name FROM subjects s \
             JOIN teacher_subjects ts ON ts.subject_id = s.id \
             WHERE ts.teacher_id = ? \
             ORDER BY s.name ASC",
        )
        .bind(teacher_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    /// The global subject catalog.
    #[instrument(skip(self))]
    pub async fn list_subjects(&self) -> Result<Vec<Subject>, Error> {
        sqlx::query_as::<_, Subject>("SELECT id, name FROM subjects ORDER BY name ASC")
            .fetch_all(&self.connection_pool)
            .await
    }
}
