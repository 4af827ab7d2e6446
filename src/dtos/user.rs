//! User DTOs - compact user representation embedded in other payloads

use crate::entities::User;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct UserSummaryDTO {
    pub id: i64,
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
}

impl From<&User> for UserSummaryDTO {
    fn from(value: &User) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            first_name: value.first_name.clone(),
            last_name: value.last_name.clone(),
            avatar: value.avatar.clone(),
        }
    }
}
