//! Repositories module - one repository per table
//!
//! Repositories own a clone of the shared pool. Methods that must take part
//! in a caller-managed transaction accept `&mut SqliteConnection` instead.

pub mod availability;
pub mod chat;
pub mod favorite;
pub mod lesson_request;
pub mod message;
pub mod notification;
pub mod review;
pub mod teacher;
pub mod traits;
pub mod user;

pub use availability::AvailabilityRepository;
pub use chat::ChatRepository;
pub use favorite::FavoriteRepository;
pub use lesson_request::LessonRequestRepository;
pub use message::MessageRepository;
pub use notification::NotificationRepository;
pub use review::ReviewRepository;
pub use teacher::TeacherRepository;
pub use traits::{Create, Read, Update};
pub use user::UserRepository;
