//! Availability DTOs

use super::TIME_RE;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

/// Request body for PUT /availability/slots. Upserts on
/// (teacher, date, start_time).
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct UpsertSlotDTO {
    pub date: Option<NaiveDate>,

    #[validate(regex(path = *TIME_RE, message = "start_time must be HH:MM (24-hour)"))]
    pub start_time: Option<String>,

    #[validate(regex(path = *TIME_RE, message = "end_time must be HH:MM (24-hour)"))]
    pub end_time: Option<String>,

    pub is_available: Option<bool>,
}

/// Request body for PUT /availability/days. Upserts on
/// (teacher, day_of_week), 0=Sunday .. 6=Saturday.
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct UpsertDayDTO {
    #[validate(range(min = 0, max = 6, message = "day_of_week must be between 0 and 6"))]
    pub day_of_week: Option<i64>,

    #[validate(regex(path = *TIME_RE, message = "start_time must be HH:MM (24-hour)"))]
    pub start_time: Option<String>,

    #[validate(regex(path = *TIME_RE, message = "end_time must be HH:MM (24-hour)"))]
    pub end_time: Option<String>,
}
