//! Teacher discovery DTOs

use super::review::ReviewDTO;
use crate::entities::{AvailabilitySlot, AvailableDay, LessonFormat, Subject};
use serde::Serialize;

/// Flat projection of a teacher row with its review aggregate.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TeacherSearchRow {
    pub id: i64,
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub city: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub specialization: Option<String>,
    pub price_per_lesson: Option<f64>,
    pub online_offline_format: Option<LessonFormat>,
    pub rating: f64,
    pub review_count: i64,
}

/// List item for GET /teachers.
#[derive(Serialize, Debug, Clone)]
pub struct TeacherDTO {
    pub id: i64,
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub city: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub specialization: Option<String>,
    pub price_per_lesson: Option<f64>,
    pub online_offline_format: Option<LessonFormat>,
    pub rating: f64,
    pub review_count: i64,
    pub subjects: Vec<Subject>,
}

impl TeacherDTO {
    pub fn from_row(row: TeacherSearchRow, subjects: Vec<Subject>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            first_name: row.first_name,
            last_name: row.last_name,
            bio: row.bio,
            avatar: row.avatar,
            city: row.city,
            experience: row.experience,
            education: row.education,
            specialization: row.specialization,
            price_per_lesson: row.price_per_lesson,
            online_offline_format: row.online_offline_format,
            rating: row.rating,
            review_count: row.review_count,
            subjects,
        }
    }
}

/// Detail payload for GET /teachers/{id}.
#[derive(Serialize, Debug, Clone)]
pub struct TeacherDetailDTO {
    #[serde(flatten)]
    pub teacher: TeacherDTO,
    pub availability: Vec<AvailabilitySlot>,
    pub available_days: Vec<AvailableDay>,
    pub reviews: Vec<ReviewDTO>,
}
