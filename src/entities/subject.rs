//! Subject entity - global subject catalog

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Subject {
    pub id: i64,
    pub name: String,
}
