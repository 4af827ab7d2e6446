//! Notification DTOs

/// Internal DTO for inserting a notification. Responses reuse the entity.
#[derive(Debug, Clone)]
pub struct CreateNotificationDTO {
    pub user_id: i64,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub related_id: Option<i64>,
    pub related_type: Option<String>,
}

impl CreateNotificationDTO {
    pub fn new(
        user_id: i64,
        kind: &str,
        title: &str,
        message: String,
        related_id: Option<i64>,
        related_type: Option<&str>,
    ) -> Self {
        Self {
            user_id,
            kind: kind.to_string(),
            title: title.to_string(),
            message,
            related_id,
            related_type: related_type.map(str::to_string),
        }
    }
}
