//! Availability entities - per-date slots and weekly recurring day ranges

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A concrete slot on a calendar date, unique per (teacher, date, start_time).
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct AvailabilitySlot {
    pub id: i64,
    pub teacher_id: i64,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub is_available: bool,
}

/// A single contiguous range per weekday (0=Sunday .. 6=Saturday).
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct AvailableDay {
    pub id: i64,
    pub teacher_id: i64,
    pub day_of_week: i64,
    pub start_time: String,
    pub end_time: String,
}
