//! Chat entity - conversation channel between a student and a teacher
//!
//! A chat is provisioned exactly once per confirmed lesson request; the
//! partial unique index on (student_id, teacher_id, lesson_request_id)
//! backs the conflict-tolerant insert in the repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Chat {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub lesson_request_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    /// The other participant relative to `user_id`.
    pub fn counterpart_of(&self, user_id: i64) -> i64 {
        if user_id == self.student_id {
            self.teacher_id
        } else {
            self.student_id
        }
    }
}
