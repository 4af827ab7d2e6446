//! Favorite entity - (student, teacher) bookmark pair

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Favorite {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub created_at: DateTime<Utc>,
}
