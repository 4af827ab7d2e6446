//! Lesson request DTOs

use super::TIME_RE;
use super::user::UserSummaryDTO;
use crate::entities::{LessonRequest, RequestStatus, User};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for POST /requests. `teacher_id` is checked by the handler
/// so a missing field yields 400 rather than a body rejection.
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct NewLessonRequestDTO {
    pub teacher_id: Option<i64>,

    pub requested_date: Option<NaiveDate>,

    #[validate(regex(path = *TIME_RE, message = "requested_time must be HH:MM (24-hour)"))]
    pub requested_time: Option<String>,

    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    pub message: Option<String>,
}

/// Internal DTO the repository inserts from, after the handler has resolved
/// the student and validated the teacher.
#[derive(Debug, Clone)]
pub struct CreateLessonRequestDTO {
    pub student_id: i64,
    pub teacher_id: i64,
    pub requested_date: Option<NaiveDate>,
    pub requested_time: Option<String>,
    pub message: Option<String>,
}

/// Request body for PUT /requests/{id}/status.
#[derive(Deserialize, Debug, Clone)]
pub struct UpdateRequestStatusDTO {
    pub status: Option<String>,
}

/// Flat projection of a lesson request joined with its counterpart user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LessonRequestOverviewRow {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub status: RequestStatus,
    pub requested_date: Option<NaiveDate>,
    pub requested_time: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_first_name: Option<String>,
    pub counterpart_last_name: Option<String>,
    pub counterpart_avatar: Option<String>,
}

/// List item for GET /requests: the request plus the other party.
#[derive(Serialize, Debug, Clone)]
pub struct LessonRequestViewDTO {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub status: RequestStatus,
    pub requested_date: Option<NaiveDate>,
    pub requested_time: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub counterpart: UserSummaryDTO,
}

impl From<LessonRequestOverviewRow> for LessonRequestViewDTO {
    fn from(value: LessonRequestOverviewRow) -> Self {
        Self {
            id: value.id,
            student_id: value.student_id,
            teacher_id: value.teacher_id,
            status: value.status,
            requested_date: value.requested_date,
            requested_time: value.requested_time,
            message: value.message,
            created_at: value.created_at,
            updated_at: value.updated_at,
            counterpart: UserSummaryDTO {
                id: value.counterpart_id,
                name: value.counterpart_name,
                first_name: value.counterpart_first_name,
                last_name: value.counterpart_last_name,
                avatar: value.counterpart_avatar,
            },
        }
    }
}

/// Detail payload for GET /requests/{id}: both parties expanded.
#[derive(Serialize, Debug, Clone)]
pub struct LessonRequestDetailDTO {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub status: RequestStatus,
    pub requested_date: Option<NaiveDate>,
    pub requested_time: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub student: UserSummaryDTO,
    pub teacher: UserSummaryDTO,
}

impl LessonRequestDetailDTO {
    pub fn from_parts(request: LessonRequest, student: &User, teacher: &User) -> Self {
        Self {
            id: request.id,
            student_id: request.student_id,
            teacher_id: request.teacher_id,
            status: request.status,
            requested_date: request.requested_date,
            requested_time: request.requested_time,
            message: request.message,
            created_at: request.created_at,
            updated_at: request.updated_at,
            student: UserSummaryDTO::from(student),
            teacher: UserSummaryDTO::from(teacher),
        }
    }
}
