//! Entities module - domain entities persisted in the database
//!
//! Each entity corresponds to a table created by the migrations under
//! `migrations/`.

pub mod availability;
pub mod chat;
pub mod enums;
pub mod favorite;
pub mod lesson_request;
pub mod message;
pub mod notification;
pub mod review;
pub mod subject;
pub mod user;

// Re-exports to keep imports short
pub use availability::{AvailabilitySlot, AvailableDay};
pub use chat::Chat;
pub use enums::{LessonFormat, RequestStatus, UserRole};
pub use favorite::Favorite;
pub use lesson_request::LessonRequest;
pub use message::Message;
pub use notification::Notification;
pub use review::Review;
pub use subject::Subject;
pub use user::{User, USER_COLUMNS};
