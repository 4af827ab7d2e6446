//! Review entity - a student's rating of a teacher, optionally tied to a
//! confirmed lesson request

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Review {
    pub id: i64,
    pub teacher_id: i64,
    pub student_id: i64,
    pub lesson_request_id: Option<i64>,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
