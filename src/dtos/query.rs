//! Query DTOs - query-string parameters for the list endpoints

use crate::entities::{LessonFormat, RequestStatus};
use chrono::NaiveDate;
use serde::Deserialize;

/// Filters for GET /teachers. All optional and combinable.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TeacherSearchQuery {
    /// Case-insensitive substring over name, first/last name and bio
    pub search: Option<String>,
    /// Subject id from the catalog
    pub subject: Option<i64>,
    /// Case-insensitive substring over the city
    pub city: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub online_offline_format: Option<LessonFormat>,
    /// Teachers with an open slot on this date
    pub available_date: Option<NaiveDate>,
    /// Teachers with a recurring range on this weekday (0=Sunday)
    pub available_day: Option<i64>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RequestsQuery {
    pub status: Option<RequestStatus>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct NotificationsQuery {
    pub is_read: Option<bool>,
    pub limit: Option<i64>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct SlotRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
