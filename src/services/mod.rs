//! Services module - axum handlers, one file per resource

pub mod availability;
pub mod chat;
pub mod favorite;
pub mod message;
pub mod notification;
pub mod request;
pub mod review;
pub mod teacher;

pub use availability::*;
pub use chat::*;
pub use favorite::*;
pub use message::*;
pub use notification::*;
pub use request::*;
pub use review::*;
pub use teacher::*;

use axum::Json;
use serde_json::{Value, json};

/// Health endpoint, the only unauthenticated route.
pub async fn root() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
