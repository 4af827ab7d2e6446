//! User entity - student or teacher profile record
//!
//! Credential issuance lives outside this service; the password column is
//! never selected, so the entity does not carry it. Teacher-only fields
//! (price, format, experience, ...) are null for students.

use super::enums::{LessonFormat, UserRole};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub role: UserRole,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
    pub city: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub specialization: Option<String>,
    pub price_per_lesson: Option<f64>,
    pub online_offline_format: Option<LessonFormat>,
}

/// Column list matching the fields above, for SELECTs against `users`.
pub const USER_COLUMNS: &str =
    "id, name, role, bio, avatar, first_name, last_name, age, city, \
     experience, education, specialization, price_per_lesson, online_offline_format";
