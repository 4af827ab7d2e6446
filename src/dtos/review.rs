//! Review DTOs

use super::user::UserSummaryDTO;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for POST /reviews. Required fields are checked by the
/// handler so a missing field yields 400.
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct NewReviewDTO {
    pub teacher_id: Option<i64>,
    pub lesson_request_id: Option<i64>,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i64>,

    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub comment: Option<String>,
}

/// Internal DTO the repository inserts from.
#[derive(Debug, Clone)]
pub struct CreateReviewDTO {
    pub teacher_id: i64,
    pub student_id: i64,
    pub lesson_request_id: Option<i64>,
    pub rating: i64,
    pub comment: Option<String>,
}

/// Request body for PUT /reviews/{id}: partial update.
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct UpdateReviewDTO {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i64>,

    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub comment: Option<String>,
}

/// Flat projection of a review joined with its author.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewWithStudentRow {
    pub id: i64,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub student_id: i64,
    pub student_name: String,
    pub student_first_name: Option<String>,
    pub student_last_name: Option<String>,
    pub student_avatar: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ReviewDTO {
    pub id: i64,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub student: UserSummaryDTO,
}

impl From<ReviewWithStudentRow> for ReviewDTO {
    fn from(value: ReviewWithStudentRow) -> Self {
        Self {
            id: value.id,
            rating: value.rating,
            comment: value.comment,
            created_at: value.created_at,
            student: UserSummaryDTO {
                id: value.student_id,
                name: value.student_name,
                first_name: value.student_first_name,
                last_name: value.student_last_name,
                avatar: value.student_avatar,
            },
        }
    }
}
