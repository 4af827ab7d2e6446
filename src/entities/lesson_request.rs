//! LessonRequest entity - a student's proposal to engage a teacher

use super::enums::RequestStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct LessonRequest {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub status: RequestStatus,
    pub requested_date: Option<NaiveDate>,
    // HH:MM, 24-hour; validated at the DTO boundary
    pub requested_time: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
